//! Debounced resize notifications.
//!
//! A [`ResizeHub`] fans one host-level resize signal out to any number of
//! subscribers. The host listener is installed when the first subscriber
//! arrives and removed when the last one leaves; each subscriber debounces
//! the signal on its own [`CoalescingTimer`].
//!
//! The hub does not own an event loop. The host forwards resize events with
//! [`ResizeHub::notify_resize`], runs due callbacks with
//! [`ResizeHub::handle_timers`] and can sleep until
//! [`ResizeHub::next_deadline`] in between.

use std::{
    fmt,
    sync::{Arc, Weak},
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::debounce::{CoalescingTimer, TimerToken};

new_key_type! {
    pub struct SubscriberId;
}

/// The single host-level resize listener a hub manages.
///
/// `install` runs with the hub locked. Neither method may call back into the
/// hub.
pub trait HostListener: Send + Sync {
    fn install(&self);
    fn remove(&self);
}

/// A host that needs no registration, e.g. one that always forwards resizes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHost;

impl HostListener for DetachedHost {
    fn install(&self) {}
    fn remove(&self) {}
}

/// Keeps the host listener installed for as long as it is alive.
struct ListenerGuard {
    host: Arc<dyn HostListener>,
}

impl ListenerGuard {
    fn acquire(host: Arc<dyn HostListener>) -> Self {
        host.install();
        tracing::debug!("resize listener installed");
        Self { host }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.host.remove();
        tracing::debug!("resize listener removed");
    }
}

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Subscriber {
    callback: Callback,
    timer: CoalescingTimer,
}

struct HubState {
    host: Arc<dyn HostListener>,
    subscribers: SlotMap<SubscriberId, Subscriber>,
    listener: Option<ListenerGuard>,
}

impl HubState {
    fn remove(&mut self, id: SubscriberId) -> Option<ListenerGuard> {
        // the subscriber's pending firing goes with its timer
        self.subscribers.remove(id)?;
        tracing::debug!(?id, remaining = self.subscribers.len(), "resize subscriber removed");
        if self.subscribers.is_empty() {
            self.listener.take()
        } else {
            None
        }
    }
}

/// A cloneable handle to a set of resize subscribers.
#[derive(Clone)]
pub struct ResizeHub {
    state: Arc<Mutex<HubState>>,
}

impl ResizeHub {
    pub fn new(host: impl HostListener + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState {
                host: Arc::new(host),
                subscribers: SlotMap::with_key(),
                listener: None,
            })),
        }
    }

    /// Registers `callback` to run once a burst of resizes has been quiet for
    /// `debounce`. The returned [`Subscription`] unsubscribes when dropped.
    pub fn subscribe(
        &self,
        callback: impl Fn() + Send + Sync + 'static,
        debounce: Duration,
    ) -> Subscription {
        let mut state = self.state.lock();
        if state.listener.is_none() {
            state.listener = Some(ListenerGuard::acquire(state.host.clone()));
        }
        let id = state.subscribers.insert(Subscriber {
            callback: Arc::new(callback),
            timer: CoalescingTimer::new(debounce),
        });
        tracing::debug!(?id, ?debounce, "resize subscriber added");

        Subscription {
            hub: Arc::downgrade(&self.state),
            id,
            active: true,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    /// Whether the host listener is currently installed.
    pub fn is_listening(&self) -> bool {
        self.state.lock().listener.is_some()
    }

    /// Forwards one host resize event to every subscriber's timer.
    pub fn notify_resize(&self, now: Instant) {
        let mut state = self.state.lock();
        for subscriber in state.subscribers.values_mut() {
            subscriber.timer.signal(now);
        }
    }

    /// Runs the callbacks whose debounce interval elapsed by `now`.
    ///
    /// Callbacks run after the hub is unlocked, so they may subscribe or
    /// unsubscribe. A subscriber removed by an earlier callback in the same
    /// batch is skipped. Returns how many ran.
    pub fn handle_timers(&self, now: Instant) -> usize {
        let fired: SmallVec<[(SubscriberId, TimerToken); 4]> = {
            let mut state = self.state.lock();
            let fired = state
                .subscribers
                .iter_mut()
                .filter_map(|(id, subscriber)| subscriber.timer.poll(now).map(|token| (id, token)))
                .collect();
            fired
        };

        let mut ran = 0;
        for (id, token) in fired {
            let callback = {
                let state = self.state.lock();
                match state.subscribers.get(id) {
                    Some(subscriber) => subscriber.callback.clone(),
                    None => {
                        tracing::trace!(?id, ?token, "resize subscriber gone before its timer ran");
                        continue;
                    }
                }
            };
            tracing::trace!(?id, ?token, "running debounced resize callback");
            callback();
            ran += 1;
        }
        ran
    }

    /// The earliest pending deadline, for hosts that sleep between events.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .lock()
            .subscribers
            .values()
            .filter_map(|subscriber| subscriber.timer.deadline())
            .min()
    }
}

impl Default for ResizeHub {
    fn default() -> Self {
        Self::new(DetachedHost)
    }
}

impl fmt::Debug for ResizeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ResizeHub")
            .field("subscribers", &state.subscribers.len())
            .field("listening", &state.listener.is_some())
            .finish()
    }
}

/// Keeps a resize callback registered. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    hub: Weak<Mutex<HubState>>,
    id: SubscriberId,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Removes the callback and cancels its pending firing. Safe to repeat.
    pub fn unsubscribe(&mut self) {
        if !std::mem::take(&mut self.active) {
            return;
        }
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let released = hub.lock().remove(self.id);
        // the host listener is removed here, after the hub is unlocked
        drop(released);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
