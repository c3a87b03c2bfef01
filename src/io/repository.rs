use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::TaskList;

/// Error type for persisted-collection access
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("persisted collection is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Narrow repository interface over the durable task collection.
///
/// The collection is the unit of transfer: implementations always read and
/// rewrite the whole value. `load_all` returns `Ok(None)` when the
/// collection has never been initialized, which callers treat the same as
/// "nothing to reconcile into" rather than as an error.
pub trait TaskRepository {
    fn load_all(&self) -> Result<Option<TaskList>, RepositoryError>;
    fn save_all(&mut self, tasks: &TaskList) -> Result<(), RepositoryError>;
}

/// File-backed repository: one JSON array of task records per file.
///
/// The app's single storage key ("kario-tasks") maps to a single file,
/// `kario-tasks.json` by default.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

pub const DEFAULT_STORE_FILE: &str = "kario-tasks.json";

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection, creating the file.
    pub fn init(&mut self) -> Result<(), RepositoryError> {
        self.save_all(&TaskList::new())
    }
}

impl TaskRepository for JsonFileRepository {
    fn load_all(&self) -> Result<Option<TaskList>, RepositoryError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let tasks: TaskList = serde_json::from_str(&text)?;
        Ok(Some(tasks))
    }

    fn save_all(&mut self, tasks: &TaskList) -> Result<(), RepositoryError> {
        let content = serde_json::to_string_pretty(tasks)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| RepositoryError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Write via temp file + rename so a crash mid-write never leaves a
/// truncated collection behind.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// In-memory repository holding the raw JSON value, as a real key-value
/// store would. Useful for tests (including seeding a corrupt value) and
/// for embedding without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    value: Option<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    /// Start from an existing collection.
    pub fn with_tasks(tasks: &TaskList) -> Self {
        MemoryRepository {
            value: Some(serde_json::to_string(tasks).expect("task list serializes")),
        }
    }

    /// Seed the stored value verbatim, valid JSON or not.
    pub fn with_raw_value(value: impl Into<String>) -> Self {
        MemoryRepository {
            value: Some(value.into()),
        }
    }

    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl TaskRepository for MemoryRepository {
    fn load_all(&self) -> Result<Option<TaskList>, RepositoryError> {
        match &self.value {
            None => Ok(None),
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
        }
    }

    fn save_all(&mut self, tasks: &TaskList) -> Result<(), RepositoryError> {
        self.value = Some(serde_json::to_string(tasks)?);
        Ok(())
    }
}
