// SPDX-License-Identifier: MPL-2.0
//! Notification newtypes.
//!
//! Both the visible-toast limit and the removal delay come from user
//! configuration, so they are clamped into range on construction.

use std::time::Duration;

// =============================================================================
// Toast Limit
// =============================================================================

/// Visible toast limit bounds (1 to 10 toasts).
pub mod toast_limit_bounds {
    /// Minimum limit.
    pub const MIN: usize = 1;
    /// Maximum limit.
    pub const MAX: usize = 10;
    /// Default limit.
    pub const DEFAULT: usize = 1;
}

/// Maximum number of toasts kept in the list.
///
/// Inserting beyond the limit evicts the oldest toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToastLimit(usize);

impl ToastLimit {
    /// Creates a new limit, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(toast_limit_bounds::MIN, toast_limit_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ToastLimit {
    fn default() -> Self {
        Self(toast_limit_bounds::DEFAULT)
    }
}

// =============================================================================
// Remove Delay
// =============================================================================

/// Removal delay bounds in milliseconds (250ms to 1,000,000ms).
pub mod remove_delay_bounds {
    /// Minimum delay in milliseconds.
    pub const MIN_MS: u64 = 250;
    /// Maximum delay in milliseconds.
    pub const MAX_MS: u64 = 1_000_000;
    /// Default delay in milliseconds.
    pub const DEFAULT_MS: u64 = 5_000;
}

/// Time between a toast being dismissed and being removed from the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemoveDelay(u64);

impl RemoveDelay {
    /// Creates a new delay from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(remove_delay_bounds::MIN_MS, remove_delay_bounds::MAX_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for RemoveDelay {
    fn default() -> Self {
        Self(remove_delay_bounds::DEFAULT_MS)
    }
}
