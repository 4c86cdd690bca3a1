// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` struct, its `Variant`, and the
//! `ToastSpec` used both to create a toast and to patch an existing one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::Instant;

/// Unique identifier for a toast.
///
/// Identifiers are generated from a process-wide counter, so they are unique
/// across stores and strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Neutral styling.
    #[default]
    Default,
    /// Error styling (red).
    Destructive,
    /// Confirmation styling (green).
    Success,
}

/// Fields supplied when creating or updating a toast.
///
/// Every field is optional. On update, only fields that are `Some` are
/// merged into the existing toast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Option<Variant>,
}

impl ToastSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }
}

/// A toast held by the notification store.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: ToastId,
    title: Option<String>,
    description: Option<String>,
    variant: Variant,
    open: bool,
    created_at: Instant,
}

impl Toast {
    /// Creates an open toast from a spec.
    #[must_use]
    pub fn new(id: ToastId, spec: ToastSpec, created_at: Instant) -> Self {
        Self {
            id,
            title: spec.title,
            description: spec.description,
            variant: spec.variant.unwrap_or_default(),
            open: true,
            created_at,
        }
    }

    /// Merges the present fields of `spec` into this toast.
    ///
    /// Returns `true` if any field actually changed.
    pub fn merge(&mut self, spec: ToastSpec) -> bool {
        let mut changed = false;
        if let Some(title) = spec.title {
            changed |= self.title.as_deref() != Some(title.as_str());
            self.title = Some(title);
        }
        if let Some(description) = spec.description {
            changed |= self.description.as_deref() != Some(description.as_str());
            self.description = Some(description);
        }
        if let Some(variant) = spec.variant {
            changed |= self.variant != variant;
            self.variant = variant;
        }
        changed
    }

    /// Hides the toast. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}
