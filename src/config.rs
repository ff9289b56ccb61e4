//! Configuration loading and management
//!
//! Handles parsing of `todos.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "todos.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory holding the task and user document files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Ownership policy configuration
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            data_dir: default_data_dir(),
            policy: PolicyConfig::default(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Ownership-gate policy for the operations that historically skipped it.
///
/// Update always requires ownership. Note-append and delete default to the
/// permissive behavior; enabling a toggle makes the operation answer with
/// the same not-found shape an update gives a non-owner.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Require the note author to own the task
    #[serde(default)]
    pub note_requires_owner: bool,

    /// Require the deleting user to own the task
    #[serde(default)]
    pub delete_requires_owner: bool,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `todos.toml` in
    /// the working directory is used when present, else defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::InvalidConfig(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let fallback = Path::new(CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
