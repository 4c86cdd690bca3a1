// SPDX-License-Identifier: MPL-2.0
//! Per-component tracking state.
//!
//! A `ComponentTracker` lives as long as the component it observes. It
//! reports the mount on creation, counts renders, diffs successive props
//! snapshots and reports the unmount (with lifespan) when dropped.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::Value;

use super::tracker::{PropChange, PropChanges, Tracker};

/// Shallow record of named values passed to a component.
pub type Props = BTreeMap<String, Value>;

/// Compares two shallow snapshots key by key.
///
/// Keys present on only one side are reported with `null` on the other.
#[must_use]
pub fn diff_props(previous: &Props, current: &Props) -> PropChanges {
    let mut changes = PropChanges::new();

    for (key, after) in current {
        match previous.get(key) {
            Some(before) if before == after => {}
            before => {
                changes.insert(
                    key.clone(),
                    PropChange {
                        before: before.cloned().unwrap_or(Value::Null),
                        after: after.clone(),
                    },
                );
            }
        }
    }
    for (key, before) in previous {
        if !current.contains_key(key) {
            changes.insert(
                key.clone(),
                PropChange {
                    before: before.clone(),
                    after: Value::Null,
                },
            );
        }
    }
    changes
}

#[derive(Debug)]
pub struct ComponentTracker {
    tracker: Tracker,
    name: String,
    mounted_at: Instant,
    render_count: u64,
    previous_props: Option<Props>,
}

impl ComponentTracker {
    /// Starts tracking `name` and reports its mount.
    pub fn mount(tracker: &Tracker, name: impl Into<String>) -> Self {
        let name = name.into();
        tracker.on_mount(&name);
        Self {
            tracker: tracker.clone(),
            name,
            mounted_at: Instant::now(),
            render_count: 0,
            previous_props: None,
        }
    }

    /// Counts a render and reports it unless it is the first.
    pub fn render(&mut self) -> u64 {
        self.render_count += 1;
        self.tracker.on_render(&self.name, self.render_count);
        self.render_count
    }

    /// Diffs `props` against the previous call and reports what changed.
    ///
    /// The first call only records the snapshot.
    pub fn props(&mut self, props: Props) -> PropChanges {
        let changes = match &self.previous_props {
            Some(previous) => diff_props(previous, &props),
            None => PropChanges::new(),
        };
        self.tracker.on_props_change(&self.name, &changes);
        self.previous_props = Some(props);
        changes
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn lifespan(&self) -> Duration {
        self.mounted_at.elapsed()
    }

    /// The tracker this component reports through.
    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}

impl Drop for ComponentTracker {
    #[allow(clippy::cast_possible_truncation)] // Lifespan in ms fits comfortably in u64
    fn drop(&mut self) {
        let duration_ms = self.mounted_at.elapsed().as_millis() as u64;
        self.tracker.on_unmount(&self.name, duration_ms);
    }
}
