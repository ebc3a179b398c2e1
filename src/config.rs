//! Configuration loading and management
//!
//! Handles parsing of `.taskmark.toml` at the vault root, with a user-level
//! fallback under the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the vault-level configuration file
pub const CONFIG_FILE: &str = ".taskmark.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Reconciliation pass configuration
    #[serde(default)]
    pub sync: SyncConfig,

    /// Indexing configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// Calendar client credentials
    #[serde(default)]
    pub calendar: CalendarConfig,
}

/// Reconciliation-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Delay before a warning or error notice is shown, in milliseconds
    #[serde(default = "default_notice_delay_ms")]
    pub notice_delay_ms: u64,

    /// Quiet period after the last edit before a pass triggers
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_notice_delay_ms() -> u64 {
    crate::notice::NOTICE_DELAY_MS
}

fn default_debounce_ms() -> u64 {
    crate::watch::WATCH_DEBOUNCE_MS
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            notice_delay_ms: default_notice_delay_ms(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Indexing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Glob patterns for vault-relative paths the indexer skips
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Calendar client credentials.
///
/// Persisted for the calendar integration; not consumed by the
/// reconciliation core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,
}

impl Config {
    /// Load configuration for a vault.
    ///
    /// The vault-level file wins over the user-level file; with neither
    /// present, defaults apply.
    pub fn load(vault_root: &Path) -> Result<Self> {
        let local = vault_root.join(CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }
        if let Some(user) = user_config_file() {
            if user.is_file() {
                return Self::from_file(&user);
            }
        }
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Path of the user-level configuration file, when a home directory exists.
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taskmark").map(|dirs| dirs.config_dir().join("config.toml"))
}
