use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{
    resize::{ResizeHub, Subscription},
    resolve::{Candidate, Resolved, Resolver},
    viewport::{Viewport, ViewportSource},
};

#[derive(Clone, Copy, PartialEq)]
struct Deps {
    viewport: Viewport,
    generation: u64,
}

struct Memo<T> {
    deps: Deps,
    value: Resolved<T>,
}

/// A memoized breakpoint value for one consumer.
///
/// The viewport is sampled when the breakpoint is created and again after
/// every debounced resize delivered through [`watch`](Self::watch) (or an
/// explicit [`refresh`](Self::refresh)). [`get`](Self::get) recomputes only
/// when that sample, the registry, the default or the candidates changed.
pub struct Breakpoint<T> {
    resolver: Resolver,
    source: Arc<dyn ViewportSource>,
    viewport: Viewport,
    stale: Arc<AtomicBool>,
    default: Option<T>,
    candidates: Arc<[Candidate<T>]>,
    memo: Option<Memo<T>>,
}

impl<T: Clone> Breakpoint<T> {
    pub fn new(resolver: Resolver, source: impl ViewportSource + 'static) -> Self {
        let viewport = source.viewport();
        Self {
            resolver,
            source: Arc::new(source),
            viewport,
            stale: Arc::new(AtomicBool::new(false)),
            default: None,
            candidates: Arc::from(Vec::new()),
            memo: None,
        }
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.set_default(Some(default));
        self
    }

    pub fn with_candidates(mut self, candidates: impl Into<Arc<[Candidate<T>]>>) -> Self {
        self.set_candidates(candidates);
        self
    }

    pub fn set_default(&mut self, default: Option<T>) {
        self.default = default;
        self.memo = None;
    }

    pub fn set_candidates(&mut self, candidates: impl Into<Arc<[Candidate<T>]>>) {
        self.candidates = candidates.into();
        self.memo = None;
    }

    /// Samples the viewport on the next [`get`](Self::get).
    pub fn refresh(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// The viewport the current value was computed from.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn get(&mut self) -> &Resolved<T> {
        if self.stale.swap(false, Ordering::AcqRel) {
            self.viewport = self.source.viewport();
        }
        let deps = Deps {
            viewport: self.viewport,
            generation: self.resolver.registry().snapshot().generation(),
        };

        let memo = match self.memo.take() {
            Some(memo) if memo.deps == deps => memo,
            _ => Memo {
                deps,
                value: self.resolver.resolve(
                    &deps.viewport,
                    self.default.clone(),
                    &self.candidates,
                ),
            },
        };
        &self.memo.insert(memo).value
    }

    /// Subscribes to `hub`: each debounced resize marks this breakpoint for a
    /// fresh viewport sample and then runs `on_change`.
    pub fn watch(
        &self,
        hub: &ResizeHub,
        debounce: Duration,
        on_change: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        let stale = self.stale.clone();
        hub.subscribe(
            move || {
                stale.store(true, Ordering::Release);
                on_change();
            },
            debounce,
        )
    }
}
