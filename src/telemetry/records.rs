// SPDX-License-Identifier: MPL-2.0
//! Telemetry record types.
//!
//! These are the two payload shapes a telemetry sink accepts: free-form
//! event records and error records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Broad grouping of event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Mount and unmount of a component.
    Lifecycle,
    /// Re-renders and prop changes.
    Render,
    /// Clicks, input and form submission.
    Interaction,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Lifecycle => "lifecycle",
            Category::Render => "render",
            Category::Interaction => "interaction",
        };
        f.write_str(name)
    }
}

/// Action names emitted by the tracking helpers.
pub mod actions {
    pub const MOUNT: &str = "component_mount";
    pub const UNMOUNT: &str = "component_unmount";
    pub const RENDER: &str = "component_render";
    pub const PROPS_CHANGE: &str = "props_change";
    pub const CLICK: &str = "click";
    pub const INPUT: &str = "input";
    pub const SUBMIT: &str = "submit";
}

/// A structured event: `{action, category, label, additional_data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub action: String,
    pub category: Category,
    pub label: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub additional_data: Value,
}

impl EventRecord {
    pub fn new(action: impl Into<String>, category: Category, label: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            category,
            label: label.into(),
            additional_data: Value::Null,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.additional_data = data;
        self
    }
}

/// A reported failure: `{action, error, context}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub action: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub context: Value,
}

impl ErrorRecord {
    pub fn new(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            error: error.into(),
            context: Value::Null,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }
}

/// Either kind of record, as stored by the collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryRecord {
    Event(EventRecord),
    Error(ErrorRecord),
}

impl TelemetryRecord {
    /// Category of an event record; `None` for errors.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match self {
            TelemetryRecord::Event(event) => Some(event.category),
            TelemetryRecord::Error(_) => None,
        }
    }

    #[must_use]
    pub fn action(&self) -> &str {
        match self {
            TelemetryRecord::Event(event) => &event.action,
            TelemetryRecord::Error(error) => &error.action,
        }
    }
}
