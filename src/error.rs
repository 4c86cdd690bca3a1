// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Only the edges of the crate can fail: reading configuration, loading the
//! case fixture and exporting telemetry reports. Notification and tracking
//! operations never return errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Fixture Error: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Export Error: {0}")]
    Export(#[from] crate::telemetry::ExportError),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
