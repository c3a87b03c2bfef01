pub mod config_io;
pub mod repository;
pub mod sync;

pub use repository::{
    DEFAULT_STORE_FILE, JsonFileRepository, MemoryRepository, RepositoryError, TaskRepository,
};
pub use sync::{PersistenceSync, SyncOutcome};
