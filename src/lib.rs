//! kario: a little personal task tracker.
//!
//! The core is a detail-view session over one task's subtasks
//! ([`store::SubtaskStore`]), a reconciler that merges each mutation back
//! into the durable JSON collection ([`io::PersistenceSync`]), and the
//! date-preset filter logic ([`filter`]). The CLI in [`cli`] is a thin
//! driver over those pieces.

pub mod cli;
pub mod filter;
pub mod io;
pub mod model;
pub mod store;
