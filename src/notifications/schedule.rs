// SPDX-License-Identifier: MPL-2.0
//! Delayed removal bookkeeping.
//!
//! A `RemovalSchedule` maps toast ids to the instant they should leave the
//! list. Each id holds at most one deadline; scheduling an id that is already
//! pending keeps the original deadline.

use super::toast::ToastId;
use std::collections::HashMap;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RemovalSchedule {
    deadlines: HashMap<ToastId, Instant>,
}

impl RemovalSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules removal of `id` at `deadline`.
    ///
    /// Returns `false` without touching the existing deadline if the id is
    /// already scheduled.
    pub fn schedule(&mut self, id: ToastId, deadline: Instant) -> bool {
        if self.deadlines.contains_key(&id) {
            return false;
        }
        self.deadlines.insert(id, deadline);
        true
    }

    /// Cancels the pending removal of `id`. Returns `true` if one existed.
    pub fn cancel(&mut self, id: ToastId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    /// Cancels every pending removal and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.deadlines.len();
        self.deadlines.clear();
        count
    }

    /// Removes and returns every id whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<ToastId> {
        let mut due: Vec<(Instant, ToastId)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    #[must_use]
    pub fn is_scheduled(&self, id: ToastId) -> bool {
        self.deadlines.contains_key(&id)
    }

    #[must_use]
    pub fn deadline(&self, id: ToastId) -> Option<Instant> {
        self.deadlines.get(&id).copied()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
