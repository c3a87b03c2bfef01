use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::repository::DEFAULT_STORE_FILE;
use crate::model::config::AppConfig;

/// Error type for config reading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse kario.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

pub const CONFIG_FILE: &str = "kario.toml";

/// Read `kario.toml` from the given directory. A missing file yields the
/// default config; a malformed one is an error (unlike the task
/// collection, config problems should be fixed, not papered over).
pub fn read_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Resolve the store file path: CLI flag, then config, then the default.
pub fn resolve_store_path(flag: Option<&str>, config: &AppConfig, dir: &Path) -> PathBuf {
    if let Some(flag) = flag {
        return PathBuf::from(flag);
    }
    match &config.store.file {
        Some(file) => dir.join(file),
        None => dir.join(DEFAULT_STORE_FILE),
    }
}
