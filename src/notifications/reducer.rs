// SPDX-License-Identifier: MPL-2.0
//! Pure toast list reducer.
//!
//! `ToastState` owns the bounded toast list and applies [`Action`]s to it.
//! It knows nothing about timers or listeners; the store layers those on top.

use super::toast::{Toast, ToastId, ToastSpec};
use crate::domain::notifications::ToastLimit;

/// State transitions accepted by the reducer.
#[derive(Debug, Clone)]
pub enum Action {
    /// Insert a toast at the front, evicting beyond the limit.
    Add(Toast),
    /// Merge fields into the toast with this id.
    Update(ToastId, ToastSpec),
    /// Hide one toast, or every toast when `None`.
    Dismiss(Option<ToastId>),
    /// Drop one toast from the list, or every toast when `None`.
    Remove(Option<ToastId>),
}

/// Result of applying an action.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Whether the visible list changed.
    pub changed: bool,
    /// Toasts pushed out by the limit during an `Add`.
    pub evicted: Vec<ToastId>,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            evicted: Vec::new(),
        }
    }
}

/// The toast list (newest first) and its length limit.
#[derive(Debug, Clone, Default)]
pub struct ToastState {
    toasts: Vec<Toast>,
    limit: ToastLimit,
}

impl ToastState {
    #[must_use]
    pub fn new(limit: ToastLimit) -> Self {
        Self {
            toasts: Vec::new(),
            limit,
        }
    }

    /// Applies an action and reports what changed.
    pub fn reduce(&mut self, action: Action) -> Transition {
        match action {
            Action::Add(toast) => {
                self.toasts.insert(0, toast);
                let evicted = if self.toasts.len() > self.limit.value() {
                    self.toasts
                        .drain(self.limit.value()..)
                        .map(|toast| toast.id())
                        .collect()
                } else {
                    Vec::new()
                };
                Transition {
                    changed: true,
                    evicted,
                }
            }
            Action::Update(id, spec) => match self.find_mut(id) {
                Some(toast) => Transition::changed(toast.merge(spec)),
                None => Transition::unchanged(),
            },
            Action::Dismiss(Some(id)) => match self.find_mut(id) {
                Some(toast) => Transition::changed(toast.close()),
                None => Transition::unchanged(),
            },
            Action::Dismiss(None) => {
                let mut changed = false;
                for toast in &mut self.toasts {
                    changed |= toast.close();
                }
                Transition::changed(changed)
            }
            Action::Remove(Some(id)) => {
                let before = self.toasts.len();
                self.toasts.retain(|toast| toast.id() != id);
                Transition::changed(self.toasts.len() != before)
            }
            Action::Remove(None) => {
                let changed = !self.toasts.is_empty();
                self.toasts.clear();
                Transition::changed(changed)
            }
        }
    }

    /// Returns the toasts, newest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn limit(&self) -> ToastLimit {
        self.limit
    }

    fn find_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id() == id)
    }
}
