//! Resize hub tests driven through the harness clock.
//!
//! These tests verify debounce collapse, independent subscriber cadences,
//! reference-counted host listener management and breakpoint recomputation
//! after a debounced resize.

use std::sync::Arc;
use std::time::Duration;

use floem_breakpoints_test::prelude::*;
use parking_lot::Mutex;

// =============================================================================
// Debounce
// =============================================================================

#[test]
fn test_burst_fires_once_after_last_signal() {
    let mut harness = ResizeHarness::new_with_size(700, 900);
    let tracker = ChangeTracker::new();
    let _subscription = harness
        .hub()
        .subscribe(tracker.width_callback(harness.viewport().clone()), DEFAULT_DEBOUNCE);

    for width in (700..1200).step_by(50) {
        harness.resize(width, 900);
        assert_eq!(harness.advance_ms(20), 0);
    }
    let last_signal = harness.elapsed() - Duration::from_millis(20);

    assert_eq!(harness.advance_ms(29), 0);
    assert_eq!(harness.advance_ms(1), 1);
    assert_eq!(harness.elapsed() - last_signal, DEFAULT_DEBOUNCE);
    assert_eq!(tracker.widths(), [1150]);
}

#[test]
fn test_spaced_signals_fire_separately() {
    let mut harness = ResizeHarness::new();
    let tracker = ChangeTracker::new();
    let _subscription = harness.hub().subscribe(tracker.callback(), DEFAULT_DEBOUNCE);

    harness.resize(500, 600);
    harness.advance_ms(60);
    harness.resize(900, 600);
    harness.advance_ms(60);

    assert_eq!(tracker.count(), 2);
}

#[test]
fn test_subscribers_keep_their_own_cadence() {
    let mut harness = ResizeHarness::new();
    let fast = ChangeTracker::new();
    let slow = ChangeTracker::new();
    let _fast = harness
        .hub()
        .subscribe(fast.callback(), Duration::from_millis(10));
    let _slow = harness
        .hub()
        .subscribe(slow.callback(), Duration::from_millis(200));

    harness.resize(1000, 600);
    harness.advance_ms(50);
    harness.resize(1100, 600);
    harness.advance_ms(50);

    assert_eq!(fast.count(), 2);
    assert_eq!(slow.count(), 0);

    harness.settle();
    assert_eq!(slow.count(), 1);
}

// =============================================================================
// Host listener
// =============================================================================

#[test]
fn test_single_host_listener_for_many_subscribers() {
    let harness = ResizeHarness::new();
    let subscriptions: Vec<_> = (0..5)
        .map(|_| harness.hub().subscribe(|| {}, DEFAULT_DEBOUNCE))
        .collect();

    assert_eq!(harness.hub().subscriber_count(), 5);
    assert_eq!(harness.host().installs(), 1);
    assert!(harness.host().is_installed());

    drop(subscriptions);
    assert_eq!(harness.hub().subscriber_count(), 0);
    assert_eq!(harness.host().removes(), 1);
    assert!(!harness.host().is_installed());
}

#[test]
fn test_unsubscribe_twice_is_harmless() {
    let mut harness = ResizeHarness::new();
    let tracker = ChangeTracker::new();
    let mut subscription = harness.hub().subscribe(tracker.callback(), DEFAULT_DEBOUNCE);
    let _other = harness.hub().subscribe(|| {}, DEFAULT_DEBOUNCE);

    harness.resize(400, 600);
    subscription.unsubscribe();
    subscription.unsubscribe();
    harness.settle();

    assert_eq!(tracker.count(), 0);
    assert_eq!(harness.hub().subscriber_count(), 1);
    assert!(harness.host().is_installed());
}

#[test]
fn test_callback_may_unsubscribe_others() {
    let mut harness = ResizeHarness::new();
    let victim = Arc::new(Mutex::new(Some(
        harness.hub().subscribe(|| {}, DEFAULT_DEBOUNCE),
    )));
    let slot = victim.clone();
    let _killer = harness
        .hub()
        .subscribe(move || drop(slot.lock().take()), DEFAULT_DEBOUNCE);

    harness.resize(400, 600);
    harness.settle();

    assert!(victim.lock().is_none());
    assert_eq!(harness.hub().subscriber_count(), 1);
}

#[test]
fn test_unsubscribed_in_same_batch_does_not_fire() {
    let mut harness = ResizeHarness::new();
    let tracker = ChangeTracker::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let killer_slot = slot.clone();
    let _killer = harness
        .hub()
        .subscribe(move || drop(killer_slot.lock().take()), DEFAULT_DEBOUNCE);
    *slot.lock() = Some(harness.hub().subscribe(tracker.callback(), DEFAULT_DEBOUNCE));

    harness.resize(400, 600);
    assert_eq!(harness.settle(), 1);

    assert_eq!(tracker.count(), 0);
    assert!(slot.lock().is_none());
    assert_eq!(harness.hub().subscriber_count(), 1);
}

// =============================================================================
// Breakpoint recomputation
// =============================================================================

#[test]
fn test_breakpoint_updates_after_debounce() {
    let mut harness = ResizeHarness::new_with_size(700, 900);
    let tracker = ChangeTracker::new();
    let mut breakpoint = harness
        .breakpoint()
        .with_default("none")
        .with_candidates(candidates([
            ("mobile-", "compact"),
            ("tablet", "regular"),
            ("small+", "wide"),
        ]));
    let _subscription = breakpoint.watch(harness.hub(), DEFAULT_DEBOUNCE, tracker.callback());

    assert_eq!(breakpoint.get().value(), Some(&"regular"));

    harness.resize(1500, 900);
    harness.advance_ms(10);
    assert_eq!(breakpoint.get().value(), Some(&"regular"));

    harness.settle();
    assert_eq!(tracker.count(), 1);
    assert_eq!(breakpoint.get().value(), Some(&"wide"));

    harness.resize(320, 900);
    harness.settle();
    assert_eq!(breakpoint.get().value(), Some(&"compact"));
}

#[test]
fn test_summary_breakpoint_tracks_density() {
    let mut harness = ResizeHarness::new_with_size(1400, 900);
    let mut breakpoint = harness.breakpoint::<()>();
    let _subscription = breakpoint.watch(harness.hub(), DEFAULT_DEBOUNCE, || {});

    let summary = breakpoint.get().summary().cloned().unwrap();
    assert_eq!(summary.get("Small"), Some(true));
    assert!(!summary.is_hdpi());

    harness.viewport().set_scale_factor(2.0);
    harness.resize(1400, 900);
    harness.settle();

    let summary = breakpoint.get().summary().cloned().unwrap();
    assert_eq!(summary.width, 700);
    assert_eq!(summary.get("Tablet"), Some(true));
    assert!(summary.is_hdpi());
}
