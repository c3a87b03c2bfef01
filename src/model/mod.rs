pub mod collection;
pub mod config;
pub mod draft;
pub mod task;

pub use collection::*;
pub use config::*;
pub use draft::*;
pub use task::*;
