use serde::{Deserialize, Serialize};

/// App configuration, read from `kario.toml` in the working directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

/// `[store]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the task collection file (default: kario-tasks.json)
    #[serde(default)]
    pub file: Option<String>,
}
