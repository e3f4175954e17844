//! Configuration for the boba demo
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/boba/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::keys::KeyOpts;
use crate::theme::Colors;
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;

#[cfg(test)]
mod tests;

pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ROUTE: &str = "home";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Route the router starts on
    pub start_route: String,

    /// Where popping the last view lands (None = popping the root is a no-op)
    pub default_view: Option<String>,

    /// Key bindings
    pub keys: KeyOpts,

    /// Color overrides for the theme
    pub colors: Colors,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_route: DEFAULT_ROUTE.to_string(),
            default_view: Some(DEFAULT_ROUTE.to_string()),
            keys: KeyOpts::default(),
            colors: Colors::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub start_route: Option<String>,
    pub default_view: Option<String>,

    /// Optional [keys] section (missing keys keep their defaults)
    pub keys: Option<KeyOpts>,

    /// Optional [colors] section
    pub colors: Option<Colors>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/boba/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("boba").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A file that exists but cannot be read or parsed is an error: a broken
    /// config should fail fast, not silently fall back to defaults.
    fn load_file_config() -> anyhow::Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("cannot read {}", path.display())),
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_parts(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_parts(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Start route: env > file > default
        let start_route = env("BOBA_ROUTE")
            .or(file.start_route)
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string());

        // Default view: env > file > default; an empty string disables it
        let default_view = env("BOBA_DEFAULT_VIEW")
            .or(file.default_view)
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string());
        let default_view = (!default_view.is_empty()).then_some(default_view);

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("BOBA_LOG") {
            logging.level = level;
        }

        Self {
            start_route,
            default_view,
            keys: file.keys.unwrap_or_default(),
            colors: file.colors.unwrap_or_default(),
            logging,
        }
    }
}
