// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.
//!
//! - [`ToastLimit`]: Maximum number of toasts kept in the list
//! - [`RemoveDelay`]: Delay between dismissal and removal

mod newtypes;

pub use newtypes::{remove_delay_bounds, toast_limit_bounds, RemoveDelay, ToastLimit};
