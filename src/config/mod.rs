// SPDX-License-Identifier: MPL-2.0
//! This module handles the workbench configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use alitheia_workbench::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Show up to three toasts at once
//! config.notifications.limit = Some(3);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::domain::notifications::{RemoveDelay, ToastLimit};
use crate::domain::telemetry::BufferCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AlitheiaWorkbench";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub remove_delay_ms: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_TOAST_LIMIT),
            remove_delay_ms: Some(DEFAULT_TOAST_REMOVE_DELAY_MS),
        }
    }
}

impl NotificationConfig {
    /// Visible toast limit, clamped into range.
    #[must_use]
    pub fn limit(&self) -> ToastLimit {
        ToastLimit::new(self.limit.unwrap_or(DEFAULT_TOAST_LIMIT))
    }

    /// Removal delay, clamped into range.
    #[must_use]
    pub fn remove_delay(&self) -> RemoveDelay {
        RemoveDelay::from_millis(self.remove_delay_ms.unwrap_or(DEFAULT_TOAST_REMOVE_DELAY_MS))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub buffer_capacity: Option<usize>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            buffer_capacity: Some(DEFAULT_TELEMETRY_BUFFER_CAPACITY),
        }
    }
}

impl TelemetryConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.buffer_capacity
                .unwrap_or(DEFAULT_TELEMETRY_BUFFER_CAPACITY),
        )
    }
}

impl Config {
    /// Log filter directive, falling back to [`DEFAULT_LOG_LEVEL`].
    #[must_use]
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable TOML falls back to defaults with a warning.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
