// SPDX-License-Identifier: MPL-2.0
//! Telemetry report structure and file export.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::records::{Category, TelemetryRecord};

/// Errors that can occur during report export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Report
// =============================================================================

/// Metadata about a telemetry report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique identifier for this report (UUID v4)
    pub report_id: String,
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    /// Crate version that generated the report
    pub workbench_version: String,
    /// When collection started (RFC 3339)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub record_count: usize,
    /// Records lost to buffer eviction
    pub evicted_count: u64,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        record_count: usize,
        evicted_count: u64,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            workbench_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            record_count,
            evicted_count,
        }
    }
}

/// Record counts by kind and category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetrySummary {
    pub events: usize,
    pub errors: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl TelemetrySummary {
    /// Tallies the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TelemetryRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.category() {
                Some(category) => {
                    summary.events += 1;
                    *summary.by_category.entry(category).or_default() += 1;
                }
                None => summary.errors += 1,
            }
        }
        summary
    }
}

/// A record with its offset from the start of collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableRecord {
    /// Milliseconds since collection started
    pub offset_ms: u64,
    #[serde(flatten)]
    pub record: TelemetryRecord,
}

impl SerializableRecord {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(recorded_at: Instant, collection_start: Instant, record: TelemetryRecord) -> Self {
        let offset_ms = recorded_at
            .saturating_duration_since(collection_start)
            .as_millis() as u64;
        Self { offset_ms, record }
    }
}

/// Complete exported report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryReport {
    pub metadata: ReportMetadata,
    pub summary: TelemetrySummary,
    pub records: Vec<SerializableRecord>,
}

// =============================================================================
// File Export
// =============================================================================

/// Generates a default filename for telemetry reports.
///
/// Format: `alitheia_telemetry_YYYYMMDD_HHMMSS.json` in local time.
#[must_use]
pub fn generate_default_filename() -> String {
    let now = Local::now();
    format!("alitheia_telemetry_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Default directory for reports: Documents, else the current directory.
#[must_use]
pub fn default_export_directory() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}

/// Writes `content` to a sibling temp file, then renames it over `path`.
///
/// # Errors
///
/// Returns the underlying I/O error; the temp file is removed on failure.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}
