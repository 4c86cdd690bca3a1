// SPDX-License-Identifier: MPL-2.0
//! Toast notification store for user feedback.
//!
//! Any screen holding a [`NotificationStore`] clone can raise a toast without
//! threading state through its parents. Toasts are kept newest first and the
//! list never grows beyond the configured [`ToastLimit`](crate::domain::notifications::ToastLimit).
//!
//! # Components
//!
//! - [`toast`] - `Toast`, `ToastId`, `Variant` and the `ToastSpec` builder
//! - [`reducer`] - Pure list transitions (`Action` -> `ToastState`)
//! - [`schedule`] - Idempotent per-id removal deadlines
//! - [`store`] - `NotificationStore`, handles and subscriptions
//! - [`reaper`] - Tokio local task that ticks the store
//!
//! # Usage
//!
//! ```
//! use alitheia_workbench::notifications::{NotificationStore, ToastSpec, Variant};
//!
//! let store = NotificationStore::default();
//! let _subscription = store.subscribe(|toasts| println!("{} toast(s)", toasts.len()));
//!
//! let handle = store.notify(ToastSpec::new().title("Saved"));
//! store.notify(ToastSpec::new().title("Error").variant(Variant::Destructive));
//!
//! // Default limit is one: the newest toast wins.
//! assert_eq!(store.toasts()[0].title(), Some("Error"));
//! assert!(store.get(handle.id()).is_none());
//! ```
//!
//! # Lifecycle
//!
//! - `notify` inserts an open toast at the front
//! - `dismiss` closes it immediately and schedules removal once
//! - `tick` (or the reaper) removes toasts whose delay has elapsed

pub mod reaper;
pub mod reducer;
pub mod schedule;
pub mod store;
pub mod toast;

pub use reaper::{spawn_reaper, ReaperGuard};
pub use reducer::{Action, ToastState, Transition};
pub use schedule::RemovalSchedule;
pub use store::{NotificationStore, Subscription, ToastHandle};
pub use toast::{Toast, ToastId, ToastSpec, Variant};
