//! Tomodachi configuration
//!
//! Optional TOML file, by default `config.toml` in the platform config
//! directory. Every key is optional.
//!
//! ```toml
//! pet_name = "Mochi"
//! save_path = "/home/me/mochi.json"
//!
//! [rules]
//! feed_amount = 30
//! hunger_per_hour = 4.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, TomodachiError};
use crate::pet::{Rules, DEFAULT_NAME};
use crate::state::DEFAULT_SAVE_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomodachiConfig {
    /// Name given to a newly adopted pet
    pub pet_name: String,

    /// Default target of `save` and `load`
    pub save_path: PathBuf,

    /// Tuning constants
    pub rules: Rules,
}

impl Default for TomodachiConfig {
    fn default() -> Self {
        Self {
            pet_name: DEFAULT_NAME.to_string(),
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            rules: Rules::default(),
        }
    }
}

impl TomodachiConfig {
    /// Configuration directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tomodachi", "tomodachi")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Path of the default config file
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TomodachiError::configuration(format!("Invalid TOML config: {e}")))?;
        config.rules.validate()?;
        if config.pet_name.trim().is_empty() {
            return Err(TomodachiError::configuration("pet_name must not be empty"));
        }
        Ok(config)
    }
}

/// Load configuration
///
/// An explicit `path` must exist. Without one, the default location is tried
/// and a missing file simply means defaults.
pub fn load_config(path: Option<&Path>) -> Result<TomodachiConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match TomodachiConfig::config_path() {
            Some(p) => (p, false),
            None => return Ok(TomodachiConfig::default()),
        },
    };

    if !required && !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(TomodachiConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        TomodachiError::configuration(format!("Failed to read config {}: {e}", path.display()))
    })?;

    let config = TomodachiConfig::from_toml(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}
