use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_history_capacity() -> usize {
    100
}

/// Runtime configuration: defaults overlaid with environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the directory holding persisted state.
    pub data_dir: Option<PathBuf>,
    /// Bound on the pick history list.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_capacity: default_history_capacity(),
        }
    }
}

impl Config {
    /// Builds a config from defaults plus environment overrides.
    pub fn new() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("PICKA_DATA_DIR")
            && !dir.is_empty()
        {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(capacity) = env::var("PICKA_HISTORY_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.history_capacity = capacity;
        }

        config
    }

    /// Directory holding persisted state, following the platform convention
    /// when no override is set.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Ok(dir) = env::var("XDG_DATA_HOME")
            && !dir.is_empty()
        {
            return PathBuf::from(dir).join("picka");
        }
        if let Ok(home) = env::var("HOME")
            && !home.is_empty()
        {
            return PathBuf::from(home).join(".local/share/picka");
        }
        if let Ok(appdata) = env::var("APPDATA")
            && !appdata.is_empty()
        {
            return PathBuf::from(appdata).join("picka");
        }
        PathBuf::from(".")
    }

    /// Path of the store file inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }
}
