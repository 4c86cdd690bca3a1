// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Visible toast limit and removal delay
//! - **Telemetry**: Collector buffer and channel sizing
//! - **Logging**: Default log filter

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default number of toasts visible at once.
pub const DEFAULT_TOAST_LIMIT: usize = 1;

/// Minimum visible toast limit.
pub const MIN_TOAST_LIMIT: usize = 1;

/// Maximum visible toast limit.
pub const MAX_TOAST_LIMIT: usize = 10;

/// Default delay between dismissing a toast and removing it (in milliseconds).
pub const DEFAULT_TOAST_REMOVE_DELAY_MS: u64 = 5_000;

/// Minimum removal delay (in milliseconds). Never shorter than the reaper period.
pub const MIN_TOAST_REMOVE_DELAY_MS: u64 = 250;

/// Maximum removal delay (in milliseconds).
pub const MAX_TOAST_REMOVE_DELAY_MS: u64 = 1_000_000;

/// How often the background reaper checks for due removals (in milliseconds).
pub const DEFAULT_REAPER_PERIOD_MS: u64 = 250;

// ==========================================================================
// Telemetry Defaults
// ==========================================================================

/// Default telemetry buffer capacity (number of records).
pub const DEFAULT_TELEMETRY_BUFFER_CAPACITY: usize = 1000;

/// Minimum telemetry buffer capacity.
pub const MIN_TELEMETRY_BUFFER_CAPACITY: usize = 100;

/// Maximum telemetry buffer capacity.
pub const MAX_TELEMETRY_BUFFER_CAPACITY: usize = 10_000;

/// Capacity of the channel between sink handles and the collector.
pub const DEFAULT_TELEMETRY_CHANNEL_CAPACITY: usize = 100;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Log filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_limit_default_within_bounds() {
        assert!(DEFAULT_TOAST_LIMIT >= MIN_TOAST_LIMIT);
        assert!(DEFAULT_TOAST_LIMIT <= MAX_TOAST_LIMIT);
    }

    #[test]
    fn remove_delay_default_within_bounds() {
        assert!(DEFAULT_TOAST_REMOVE_DELAY_MS >= MIN_TOAST_REMOVE_DELAY_MS);
        assert!(DEFAULT_TOAST_REMOVE_DELAY_MS <= MAX_TOAST_REMOVE_DELAY_MS);
    }

    #[test]
    fn reaper_period_does_not_exceed_min_delay() {
        assert!(DEFAULT_REAPER_PERIOD_MS > 0);
        assert!(DEFAULT_REAPER_PERIOD_MS <= MIN_TOAST_REMOVE_DELAY_MS);
    }

    #[test]
    fn telemetry_capacity_default_within_bounds() {
        assert!(DEFAULT_TELEMETRY_BUFFER_CAPACITY >= MIN_TELEMETRY_BUFFER_CAPACITY);
        assert!(DEFAULT_TELEMETRY_BUFFER_CAPACITY <= MAX_TELEMETRY_BUFFER_CAPACITY);
        assert!(DEFAULT_TELEMETRY_CHANNEL_CAPACITY > 0);
    }
}
