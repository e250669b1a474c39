//! Testing utilities for floem_breakpoints.
//!
//! This crate provides a harness that drives a [`ResizeHub`] and a
//! [`MockViewport`] on a manual clock, so debounce behaviour can be tested
//! without sleeping.
//!
//! # Example
//!
//! ```rust
//! use floem_breakpoints_test::prelude::*;
//!
//! let mut harness = ResizeHarness::new_with_size(700, 900);
//! let tracker = ChangeTracker::new();
//! let _subscription = harness.hub().subscribe(tracker.callback(), DEFAULT_DEBOUNCE);
//!
//! harness.resize(1200, 900);
//! harness.advance_ms(10);
//! harness.resize(1300, 900);
//! harness.settle();
//!
//! assert_eq!(tracker.count(), 1);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use floem_breakpoints::{
    Breakpoint, HostListener, MockViewport, ResizeHub, Resolver, SharedRegistry, ViewportSource,
};
use parking_lot::Mutex;

/// Prelude module for convenient imports in tests.
pub mod prelude {
    pub use super::{ChangeTracker, CountingHost, ResizeHarness};
    pub use floem_breakpoints::prelude::*;
    pub use floem_breakpoints::{HostListener, Subscription, ViewportSummary};
}

/// A host listener that counts how often it was installed and removed.
#[derive(Clone, Default)]
pub struct CountingHost {
    installs: Arc<AtomicUsize>,
    removes: Arc<AtomicUsize>,
}

impl CountingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Returns true while the listener is installed.
    pub fn is_installed(&self) -> bool {
        self.installs() > self.removes()
    }
}

impl HostListener for CountingHost {
    fn install(&self) {
        self.installs.fetch_add(1, Ordering::SeqCst);
    }

    fn remove(&self) {
        self.removes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts invocations of the callbacks it hands out.
///
/// Optionally records the viewport width seen at each invocation.
#[derive(Clone, Default)]
pub struct ChangeTracker {
    count: Arc<AtomicUsize>,
    widths: Arc<Mutex<Vec<u32>>>,
}

impl ChangeTracker {
    /// Create a new change tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that bumps the counter.
    pub fn callback(&self) -> impl Fn() + Send + Sync + 'static + use<> {
        let count = self.count.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// A callback that bumps the counter and records the width of `viewport`.
    pub fn width_callback<V: ViewportSource + 'static>(
        &self,
        viewport: V,
    ) -> impl Fn() + Send + Sync + 'static + use<V> {
        let count = self.count.clone();
        let widths = self.widths.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            widths.lock().push(viewport.viewport().width());
        }
    }

    /// Returns the number of invocations recorded.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Returns the recorded widths in order.
    pub fn widths(&self) -> Vec<u32> {
        self.widths.lock().clone()
    }

    /// Reset the tracker.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
        self.widths.lock().clear();
    }
}

/// Drives a resize hub and a mock viewport on a manual clock.
pub struct ResizeHarness {
    start: Instant,
    now: Instant,
    viewport: MockViewport,
    host: CountingHost,
    hub: ResizeHub,
    resolver: Resolver,
}

impl ResizeHarness {
    /// An 800x600 portrait viewport with the default breakpoints.
    pub fn new() -> Self {
        Self::new_with_size(800, 600)
    }

    pub fn new_with_size(width: u32, height: u32) -> Self {
        let now = Instant::now();
        let host = CountingHost::new();
        Self {
            start: now,
            now,
            viewport: MockViewport::with_size(width, height),
            hub: ResizeHub::new(host.clone()),
            host,
            resolver: Resolver::new(SharedRegistry::default()),
        }
    }

    pub fn viewport(&self) -> &MockViewport {
        &self.viewport
    }

    pub fn hub(&self) -> &ResizeHub {
        &self.hub
    }

    pub fn host(&self) -> &CountingHost {
        &self.host
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Time passed on the manual clock since the harness was created.
    pub fn elapsed(&self) -> Duration {
        self.now - self.start
    }

    /// A breakpoint over this harness' viewport and registry.
    pub fn breakpoint<T: Clone>(&self) -> Breakpoint<T> {
        Breakpoint::new(self.resolver.clone(), self.viewport.clone())
    }

    /// Resizes the viewport and signals the hub at the current time.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.set_size(width, height);
        self.hub.notify_resize(self.now);
    }

    /// Moves the clock forward and runs due callbacks. Returns how many ran.
    pub fn advance(&mut self, duration: Duration) -> usize {
        self.now += duration;
        self.hub.handle_timers(self.now)
    }

    pub fn advance_ms(&mut self, millis: u64) -> usize {
        self.advance(Duration::from_millis(millis))
    }

    /// Jumps from deadline to deadline until nothing is pending.
    pub fn settle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(deadline) = self.hub.next_deadline() {
            self.now = self.now.max(deadline);
            ran += self.hub.handle_timers(self.now);
        }
        ran
    }
}

impl Default for ResizeHarness {
    fn default() -> Self {
        Self::new()
    }
}
