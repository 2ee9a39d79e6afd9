//! User settings and path resolution.
//!
//! Everything hangs off a base directory: `$BALANCE_HOME` when set, otherwise
//! the user's home directory. The optional settings file `.balance.json` lives
//! there, and relative paths inside it are resolved against it.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::Deserialize;
use thiserror::Error;

pub const HOME_ENV: &str = "BALANCE_HOME";
const CONFIG_FILE: &str = ".balance.json";
const DEFAULT_STORE_FILE: &str = ".transactions";
const DEFAULT_HISTORY_FILE: &str = ".balance_history";
const DEFAULT_PROMPT: &str = "balance > ";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading configuration: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing store for the ledger.
    pub store_file: PathBuf,
    /// Line-editor history; only used in interactive mode.
    pub history_file: PathBuf,
    pub prompt: String,
    pub screen_reader_mode: bool,
    pub high_contrast_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: PathBuf::from(DEFAULT_STORE_FILE),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            prompt: DEFAULT_PROMPT.into(),
            screen_reader_mode: false,
            high_contrast_mode: false,
        }
    }
}

/// Locates and reads the settings file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(resolve_base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let config_path = base.join(CONFIG_FILE);
        Self {
            base_dir: base,
            config_path,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing settings file means defaults; an unreadable one is an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Parse {
            path: self.config_path.clone(),
            message: err.to_string(),
        })
    }

    pub fn store_path(&self, config: &Config) -> PathBuf {
        self.resolve(&config.store_file)
    }

    pub fn history_path(&self, config: &Config) -> PathBuf {
        self.resolve(&config.history_file)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir().unwrap_or_else(|| PathBuf::from("."))
}
