//! Loads the optional `~/.wavy-prompts/config.toml`.

use crate::api::StoreError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SHARE_ORIGIN: &str = "http://localhost:5173";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the collection lives; defaults to the config directory itself.
    pub data_dir: Option<PathBuf>,
    /// Origin prepended to `#/share/` and `#/view/` links.
    pub share_origin: String,
    /// Encrypt the collection at rest.
    pub sealed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            share_origin: DEFAULT_SHARE_ORIGIN.to_string(),
            sealed: false,
        }
    }
}

impl Config {
    /// `~/.wavy-prompts`
    pub fn default_dir() -> Result<PathBuf, StoreError> {
        let home = env::var("HOME")
            .map_err(|_| StoreError::Init("Unable to determine HOME directory".to_string()))?;
        Ok(PathBuf::from(home).join(".wavy-prompts"))
    }

    /// Reads the config file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| StoreError::Configuration(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
