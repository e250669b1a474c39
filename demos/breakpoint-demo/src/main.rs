//! Drags a mock window from phone width to desktop width and back, printing
//! the breakpoint value every time a debounced resize lands.
//!
//! Pass a JSON breakpoint table as the first argument to replace the default
//! one: `{"breakpoints": {"narrow": [0, 800], "wide": [800, 4000]}}`.

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use floem_breakpoints::{BreakpointConfig, prelude::*};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = SharedRegistry::default();
    if let Some(path) = std::env::args().nth(1) {
        let json = std::fs::read_to_string(&path)?;
        BreakpointConfig::from_json(&json)?.apply(&registry)?;
        tracing::info!(%path, "loaded breakpoint table");
    }

    let list = candidates(
        registry
            .snapshot()
            .bases()
            .map(|(name, _)| (name.to_string(), format!("is {name}")))
            .collect::<Vec<_>>(),
    );

    let window = MockViewport::with_size(320, 640);
    let hub = ResizeHub::default();
    let breakpoint = Arc::new(Mutex::new(
        Breakpoint::new(Resolver::new(registry), window.clone())
            .with_default("none".to_string())
            .with_candidates(list),
    ));

    let printer = breakpoint.clone();
    let _subscription = breakpoint
        .lock()
        .watch(&hub, DEFAULT_DEBOUNCE, move || {
            let mut breakpoint = printer.lock();
            let width = breakpoint.viewport().width();
            let value = breakpoint.get().value().cloned().unwrap_or_default();
            println!("{width:>5}px  `{value}` is the current value");
        });

    let value = breakpoint.lock().get().value().cloned().unwrap_or_default();
    println!("  320px  `{value}` is the current value. Resizing...");

    let mut now = Instant::now();
    let drag = (320..=2200).step_by(40).chain((320..=2200).rev().step_by(120));
    for (step, width) in drag.enumerate() {
        window.set_size(width, 900);
        hub.notify_resize(now);
        now += FRAME;
        hub.handle_timers(now);

        // let go of the mouse every so often so the debounce can fire
        if step % 12 == 11 {
            while let Some(deadline) = hub.next_deadline() {
                now = now.max(deadline);
                hub.handle_timers(now);
            }
        }
    }
    while let Some(deadline) = hub.next_deadline() {
        now = now.max(deadline);
        hub.handle_timers(now);
    }

    Ok(())
}
