// SPDX-License-Identifier: MPL-2.0
//! Toast store with listeners and delayed removal.
//!
//! `NotificationStore` is a cheap-to-clone, single-threaded handle. Screens
//! receive a clone instead of reaching for a global, raise toasts with
//! [`NotificationStore::notify`], and observe the list through
//! [`NotificationStore::subscribe`].
//!
//! Dismissed toasts stay in the list (closed) until their removal delay has
//! elapsed and the store is ticked, either manually via
//! [`NotificationStore::tick`] or by a [`spawn_reaper`](super::spawn_reaper)
//! task.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tokio::time::Instant;

use super::reducer::{Action, ToastState};
use super::schedule::RemovalSchedule;
use super::toast::{Toast, ToastId, ToastSpec};
use crate::config::NotificationConfig;
use crate::domain::notifications::{RemoveDelay, ToastLimit};

type Listener = Rc<dyn Fn(&[Toast])>;

struct Inner {
    state: ToastState,
    schedule: RemovalSchedule,
    delay: RemoveDelay,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    /// Bumped on every change of the list.
    version: u64,
}

impl Inner {
    fn is_subscribed(&self, listener_id: u64) -> bool {
        self.listeners.iter().any(|(id, _)| *id == listener_id)
    }
}

/// Shared handle to the toast list.
#[derive(Clone)]
pub struct NotificationStore {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for NotificationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("NotificationStore")
            .field("toasts", &inner.state.toasts())
            .field("limit", &inner.state.limit())
            .field("delay", &inner.delay)
            .field("pending_removals", &inner.schedule.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(ToastLimit::default(), RemoveDelay::default())
    }
}

impl NotificationStore {
    #[must_use]
    pub fn new(limit: ToastLimit, delay: RemoveDelay) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: ToastState::new(limit),
                schedule: RemovalSchedule::new(),
                delay,
                listeners: Vec::new(),
                next_listener_id: 0,
                version: 0,
            })),
        }
    }

    #[must_use]
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.limit(), config.remove_delay())
    }

    /// Non-owning handle, used by toast handles and the reaper task.
    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore(Rc::downgrade(&self.inner))
    }

    /// Raises a new toast at the front of the list.
    ///
    /// Toasts beyond the configured limit are evicted, oldest first.
    pub fn notify(&self, spec: ToastSpec) -> ToastHandle {
        let id = ToastId::next();
        tracing::debug!(%id, title = ?spec.title, "toast raised");
        self.dispatch(Action::Add(Toast::new(id, spec, Instant::now())));
        ToastHandle {
            id,
            store: self.downgrade(),
        }
    }

    /// Hides a toast (or all toasts when `id` is `None`) and schedules its
    /// removal after the configured delay.
    ///
    /// A toast whose removal is already pending keeps its original deadline.
    /// Unknown ids are ignored.
    pub fn dismiss(&self, id: Option<ToastId>) {
        {
            let mut inner = self.inner.borrow_mut();
            let deadline = Instant::now() + inner.delay.as_duration();
            let targets: Vec<ToastId> = match id {
                Some(id) if inner.state.contains(id) => vec![id],
                Some(_) => Vec::new(),
                None => inner.state.toasts().iter().map(Toast::id).collect(),
            };
            for target in targets {
                if inner.schedule.schedule(target, deadline) {
                    tracing::debug!(id = %target, "toast removal scheduled");
                }
            }
        }
        self.dispatch(Action::Dismiss(id));
    }

    /// Hides every toast. Shorthand for `dismiss(None)`.
    pub fn dismiss_all(&self) {
        self.dismiss(None);
    }

    /// Merges the present fields of `spec` into the toast with this id.
    pub fn update(&self, id: ToastId, spec: ToastSpec) {
        self.dispatch(Action::Update(id, spec));
    }

    /// Removes every toast whose removal deadline has passed.
    ///
    /// Returns the number of toasts removed.
    pub fn tick(&self) -> usize {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit notion of "now".
    pub fn tick_at(&self, now: Instant) -> usize {
        let due = self.inner.borrow_mut().schedule.take_due(now);
        let mut removed = 0;
        for id in due {
            if self.dispatch(Action::Remove(Some(id))) {
                tracing::debug!(%id, "toast removed");
                removed += 1;
            }
        }
        removed
    }

    /// Cancels every pending removal. Toasts already in the list stay there.
    ///
    /// Returns how many removals were cancelled.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.inner.borrow_mut().schedule.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "pending toast removals cancelled");
        }
        cancelled
    }

    /// Registers a listener that receives the full list after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, listener: impl Fn(&[Toast]) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Snapshot of the toasts, newest first.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.borrow().state.toasts().to_vec()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.inner.borrow().state.get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().state.toasts().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn limit(&self) -> ToastLimit {
        self.inner.borrow().state.limit()
    }

    #[must_use]
    pub fn remove_delay(&self) -> RemoveDelay {
        self.inner.borrow().delay
    }

    /// Number of removals waiting for their deadline.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.inner.borrow().schedule.len()
    }

    #[must_use]
    pub fn is_removal_scheduled(&self, id: ToastId) -> bool {
        self.inner.borrow().schedule.is_scheduled(id)
    }

    /// Earliest pending removal deadline.
    #[must_use]
    pub fn next_removal_at(&self) -> Option<Instant> {
        self.inner.borrow().schedule.next_deadline()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Applies an action and notifies listeners if the list changed.
    ///
    /// No borrow is held while listeners run, so they may call back into the
    /// store. When a listener changes the list, the nested dispatch delivers
    /// the newer list to everyone and this one stops, so no listener is left
    /// holding a stale snapshot.
    fn dispatch(&self, action: Action) -> bool {
        let (version, snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let transition = inner.state.reduce(action);
            for id in &transition.evicted {
                inner.schedule.cancel(*id);
                tracing::trace!(%id, "toast evicted");
            }
            if !transition.changed {
                return false;
            }
            inner.version += 1;
            (
                inner.version,
                inner.state.toasts().to_vec(),
                inner.listeners.clone(),
            )
        };

        for (listener_id, listener) in listeners {
            let deliver = {
                let inner = self.inner.borrow();
                if inner.version != version {
                    tracing::trace!(version, "superseded broadcast stopped");
                    break;
                }
                // An earlier listener may have unsubscribed this one.
                inner.is_subscribed(listener_id)
            };
            if deliver {
                listener(&snapshot);
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub(crate) struct WeakStore(Weak<RefCell<Inner>>);

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<NotificationStore> {
        self.0.upgrade().map(|inner| NotificationStore { inner })
    }
}

/// Handle to a single toast returned by [`NotificationStore::notify`].
///
/// The handle does not keep the store alive; once the store is gone its
/// methods do nothing.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: ToastId,
    store: WeakStore,
}

impl ToastHandle {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn dismiss(&self) {
        if let Some(store) = self.store.upgrade() {
            store.dismiss(Some(self.id));
        }
    }

    pub fn update(&self, spec: ToastSpec) {
        if let Some(store) = self.store.upgrade() {
            store.update(self.id, spec);
        }
    }
}

/// Listener registration. Unregisters on drop.
#[derive(Debug)]
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    store: Weak<RefCell<Inner>>,
}

impl Subscription {
    /// Unregisters the listener now.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::toast::Variant;
    use std::cell::Cell;
    use std::time::Duration;

    fn store(limit: usize, delay_ms: u64) -> NotificationStore {
        NotificationStore::new(ToastLimit::new(limit), RemoveDelay::from_millis(delay_ms))
    }

    #[test]
    fn notify_then_evict_with_limit_one() {
        let store = store(1, 1000);

        store.notify(ToastSpec::new().title("Saved"));
        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title(), Some("Saved"));
        assert!(toasts[0].is_open());

        store.notify(ToastSpec::new().title("Error").variant(Variant::Destructive));
        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title(), Some("Error"));
        assert_eq!(toasts[0].variant(), Variant::Destructive);
        assert!(toasts[0].is_open());
    }

    #[test]
    fn dismiss_closes_immediately_and_removes_after_delay() {
        let store = store(3, 1000);
        let handle = store.notify(ToastSpec::new().title("Saved"));

        handle.dismiss();
        assert!(!store.get(handle.id()).unwrap().is_open());
        assert!(store.is_removal_scheduled(handle.id()));

        let deadline = store.next_removal_at().unwrap();
        assert_eq!(store.tick_at(deadline - Duration::from_millis(1)), 0);
        assert_eq!(store.len(), 1);

        assert_eq!(store.tick_at(deadline), 1);
        assert!(store.get(handle.id()).is_none());
        assert_eq!(store.pending_removals(), 0);
    }

    #[test]
    fn repeat_dismiss_schedules_once() {
        let store = store(3, 1000);
        let handle = store.notify(ToastSpec::new().title("Saved"));

        handle.dismiss();
        let first_deadline = store.next_removal_at();
        handle.dismiss();

        assert_eq!(store.pending_removals(), 1);
        assert_eq!(store.next_removal_at(), first_deadline);
    }

    #[test]
    fn dismiss_without_id_applies_to_all() {
        let store = store(3, 1000);
        store.notify(ToastSpec::new().title("a"));
        store.notify(ToastSpec::new().title("b"));

        store.dismiss_all();

        assert!(store.toasts().iter().all(|t| !t.is_open()));
        assert_eq!(store.pending_removals(), 2);
    }

    #[test]
    fn dismiss_unknown_id_is_silent() {
        let store = store(3, 1000);
        store.notify(ToastSpec::new().title("a"));

        store.dismiss(Some(ToastId::next()));

        assert_eq!(store.pending_removals(), 0);
        assert!(store.toasts()[0].is_open());
    }

    #[test]
    fn handle_update_merges_fields() {
        let store = store(3, 1000);
        let handle = store.notify(ToastSpec::new().title("Uploading"));

        handle.update(ToastSpec::new().description("3 of 4 documents"));

        let toast = store.get(handle.id()).unwrap();
        assert_eq!(toast.title(), Some("Uploading"));
        assert_eq!(toast.description(), Some("3 of 4 documents"));
    }

    #[test]
    fn evicted_toast_loses_pending_removal() {
        let store = store(1, 1000);
        let first = store.notify(ToastSpec::new().title("first"));
        first.dismiss();
        assert_eq!(store.pending_removals(), 1);

        store.notify(ToastSpec::new().title("second"));

        assert_eq!(store.pending_removals(), 0);
    }

    #[test]
    fn listener_called_once_per_change() {
        let store = store(3, 1000);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let _subscription = store.subscribe(move |_| seen.set(seen.get() + 1));

        let handle = store.notify(ToastSpec::new().title("a"));
        assert_eq!(calls.get(), 1);

        handle.update(ToastSpec::new().title("b"));
        assert_eq!(calls.get(), 2);

        // No-op update does not broadcast
        handle.update(ToastSpec::new().title("b"));
        assert_eq!(calls.get(), 2);

        handle.dismiss();
        assert_eq!(calls.get(), 3);
        handle.dismiss();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let store = store(3, 1000);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| seen.set(seen.get() + 1));
        assert_eq!(store.subscriber_count(), 1);

        subscription.unsubscribe();
        store.notify(ToastSpec::new().title("a"));

        assert_eq!(calls.get(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn listener_may_reenter_store() {
        let store = store(3, 1000);
        let reentrant = store.clone();
        let observed = Rc::new(Cell::new(0));
        let seen = Rc::clone(&observed);
        let _subscription = store.subscribe(move |toasts| {
            seen.set(toasts.len());
            // Reads during delivery must not panic.
            let _ = reentrant.len();
        });

        store.notify(ToastSpec::new().title("a"));
        assert_eq!(observed.get(), 1);
    }

    #[test]
    fn mutation_from_listener_reaches_later_listeners() {
        let store = store(3, 1000);
        let reentrant = store.clone();
        let _first = store.subscribe(move |toasts| {
            if toasts.len() == 1 {
                reentrant.notify(ToastSpec::new().title("follow-up"));
            }
        });
        let last_seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&last_seen);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _second = store.subscribe(move |toasts| {
            counter.set(counter.get() + 1);
            *sink.borrow_mut() = toasts
                .iter()
                .map(|toast| toast.title().unwrap_or_default().to_string())
                .collect();
        });

        store.notify(ToastSpec::new().title("first"));

        let current: Vec<String> = store
            .toasts()
            .iter()
            .map(|toast| toast.title().unwrap_or_default().to_string())
            .collect();
        assert_eq!(current, vec!["follow-up", "first"]);
        assert_eq!(*last_seen.borrow(), current);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn handle_outliving_store_is_inert() {
        let handle = {
            let store = store(3, 1000);
            store.notify(ToastSpec::new().title("orphan"))
        };
        handle.dismiss();
        handle.update(ToastSpec::new().title("still fine"));
    }

    #[test]
    fn shutdown_cancels_pending_removals() {
        let store = store(3, 1000);
        let handle = store.notify(ToastSpec::new().title("a"));
        handle.dismiss();

        assert_eq!(store.shutdown(), 1);
        assert_eq!(store.tick_at(Instant::now() + Duration::from_secs(60)), 0);
        assert_eq!(store.len(), 1);
    }
}
