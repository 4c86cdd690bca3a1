// SPDX-License-Identifier: MPL-2.0
//! Background ticking of a [`NotificationStore`].
//!
//! The store is single-threaded, so the reaper runs as a local task and must
//! be spawned inside a [`tokio::task::LocalSet`].

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::store::NotificationStore;

/// Owns the reaper task. Dropping the guard aborts it.
#[derive(Debug)]
#[must_use = "dropping the guard stops the reaper"]
pub struct ReaperGuard {
    handle: JoinHandle<()>,
}

impl ReaperGuard {
    /// Returns true once the task has stopped (store dropped or aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ReaperGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a local task that calls [`NotificationStore::tick`] every `period`.
///
/// The task holds only a weak reference and exits on its own once every
/// store handle has been dropped.
///
/// # Panics
///
/// Panics if called outside a `LocalSet` context.
pub fn spawn_reaper(store: &NotificationStore, period: Duration) -> ReaperGuard {
    let weak = store.downgrade();
    let handle = tokio::task::spawn_local(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(store) = weak.upgrade() else {
                tracing::debug!("notification store dropped, reaper exiting");
                break;
            };
            let removed = store.tick();
            if removed > 0 {
                tracing::trace!(removed, "reaper removed toasts");
            }
        }
    });
    ReaperGuard { handle }
}
