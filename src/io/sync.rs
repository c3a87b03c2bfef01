use crate::io::repository::TaskRepository;
use crate::model::Task;

/// What happened to the durable collection after a mutation.
///
/// Never an error: durability is best-effort and the in-memory state stays
/// authoritative, so a mutation path reports one of these instead of
/// propagating a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The collection was rewritten with the updated task in place.
    Saved,
    /// No persisted collection exists yet; nothing to reconcile into.
    NoCollection,
    /// The collection could not be read, parsed, or written.
    Unavailable,
}

/// Reconciles one updated task into the durable collection without
/// disturbing other tasks.
///
/// This is a read-modify-write of the entire collection, not a keyed
/// partial update: the whole value is loaded, the matching entry is
/// swapped, and the whole value is written back. Two sessions writing the
/// same collection race at that granularity (last write wins) — a known,
/// accepted limitation for a single-user local store.
#[derive(Debug)]
pub struct PersistenceSync<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> PersistenceSync<R> {
    pub fn new(repo: R) -> Self {
        PersistenceSync { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    /// Merge `updated` into the persisted collection.
    ///
    /// An id with no matching entry leaves the collection as it was; the
    /// unchanged collection is still written back, matching the original
    /// map-and-rewrite behavior.
    pub fn reconcile(&mut self, updated: &Task) -> SyncOutcome {
        let mut tasks = match self.repo.load_all() {
            Ok(Some(tasks)) => tasks,
            Ok(None) => return SyncOutcome::NoCollection,
            Err(_) => return SyncOutcome::Unavailable,
        };
        tasks.replace(updated);
        match self.repo.save_all(&tasks) {
            Ok(()) => SyncOutcome::Saved,
            Err(_) => SyncOutcome::Unavailable,
        }
    }
}
