//! Resolution of the current viewport against the active registry.
//!
//! There are three ways to ask:
//!
//! - with neither a default nor candidates, the answer is a
//!   [`ViewportSummary`]: orientation and density flags plus one flag per base
//!   breakpoint,
//! - with only a default, the default comes back untouched,
//! - with candidates, the first candidate whose key is known, whose
//!   orientation gate admits the current orientation and whose range contains
//!   the current width wins. Without a winner the default is used.

use std::{num::NonZeroUsize, sync::Arc};

use bitflags::bitflags;
use lru::LruCache;
use parking_lot::Mutex;

use crate::{
    error::KeyParseError,
    range::{BreakpointKey, OrientationFilter, legacy_flag_name},
    registry::{Registry, SharedRegistry},
    viewport::{Orientation, Viewport},
};

/// Number of viewport summaries a [`Resolver`] keeps by default.
pub const DEFAULT_SUMMARY_CACHE: NonZeroUsize = NonZeroUsize::new(256).unwrap();

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewportFlags: u8 {
        const LANDSCAPE = 1;
        const PORTRAIT = 2;
        const HDPI = 4;
    }
}

/// Everything a caller can branch on without supplying candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportSummary {
    pub width: u32,
    pub flags: ViewportFlags,
    ranges: Vec<(String, bool)>,
}

impl ViewportSummary {
    pub fn is_landscape(&self) -> bool {
        self.flags.contains(ViewportFlags::LANDSCAPE)
    }

    pub fn is_portrait(&self) -> bool {
        self.flags.contains(ViewportFlags::PORTRAIT)
    }

    pub fn is_hdpi(&self) -> bool {
        self.flags.contains(ViewportFlags::HDPI)
    }

    /// Looks up a range flag by its summary name, e.g. `Tablet`.
    pub fn get(&self, flag: &str) -> Option<bool> {
        self.ranges
            .iter()
            .find(|(name, _)| name == flag)
            .map(|(_, value)| *value)
    }

    /// Range flags in configuration order.
    pub fn ranges(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.ranges.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// The first range flag that is set.
    pub fn active(&self) -> Option<&str> {
        self.ranges
            .iter()
            .find(|(_, value)| *value)
            .map(|(name, _)| name.as_str())
    }
}

/// A value offered for one breakpoint key.
///
/// A candidate without a key never matches, but it still counts towards the
/// list, so a list of only such candidates resolves to the default.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<T> {
    pub key: Option<BreakpointKey>,
    pub value: T,
}

impl<T> Candidate<T> {
    pub fn new(key: BreakpointKey, value: T) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }

    pub fn parse(key: &str, value: T) -> Result<Self, KeyParseError> {
        Ok(Self::new(key.parse()?, value))
    }
}

/// Builds candidates from textual keys. Keys that do not parse are kept as
/// candidates that never match.
pub fn candidates<T, S>(pairs: impl IntoIterator<Item = (S, T)>) -> Vec<Candidate<T>>
where
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            let key = key
                .as_ref()
                .parse::<BreakpointKey>()
                .inspect_err(|err| tracing::debug!(%err, "breakpoint candidate will never match"))
                .ok();
            Candidate { key, value }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resolved<T> {
    Summary(Arc<ViewportSummary>),
    Value(T),
    /// Candidates were given, none matched, and there was no default.
    Unset,
}

impl<T> Resolved<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Resolved::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&ViewportSummary> {
        match self {
            Resolved::Summary(summary) => Some(summary),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct SummaryKey {
    width: u32,
    orientation: Orientation,
    hdpi: bool,
}

struct SummaryCache {
    generation: u64,
    entries: LruCache<SummaryKey, Arc<ViewportSummary>>,
}

/// Resolves viewports against a [`SharedRegistry`].
///
/// Clones share the registry handle and the summary cache.
#[derive(Clone)]
pub struct Resolver {
    registry: SharedRegistry,
    cache: Arc<Mutex<SummaryCache>>,
}

impl Resolver {
    pub fn new(registry: SharedRegistry) -> Self {
        Self::with_cache_capacity(registry, DEFAULT_SUMMARY_CACHE)
    }

    pub fn with_cache_capacity(registry: SharedRegistry, capacity: NonZeroUsize) -> Self {
        Self {
            registry,
            cache: Arc::new(Mutex::new(SummaryCache {
                generation: 0,
                entries: LruCache::new(capacity),
            })),
        }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn cached_summaries(&self) -> usize {
        self.cache.lock().entries.len()
    }

    pub fn resolve<T: Clone>(
        &self,
        viewport: &Viewport,
        default: Option<T>,
        candidates: &[Candidate<T>],
    ) -> Resolved<T> {
        if candidates.is_empty() {
            return match default {
                Some(value) => Resolved::Value(value),
                None => Resolved::Summary(self.summary(viewport)),
            };
        }

        match self.select(viewport, candidates) {
            Some(value) => Resolved::Value(value.clone()),
            None => default.map_or(Resolved::Unset, Resolved::Value),
        }
    }

    /// Returns the value of the first candidate that matches the viewport.
    pub fn select<'a, T>(&self, viewport: &Viewport, candidates: &'a [Candidate<T>]) -> Option<&'a T> {
        let registry = self.registry.snapshot();
        select(&registry, viewport, candidates)
    }

    /// The summary for `viewport`, served from the cache when possible.
    pub fn summary(&self, viewport: &Viewport) -> Arc<ViewportSummary> {
        let registry = self.registry.snapshot();
        let key = SummaryKey {
            width: viewport.width(),
            orientation: viewport.orientation,
            hdpi: viewport.is_hdpi(),
        };

        let mut cache = self.cache.lock();
        if cache.generation != registry.generation() {
            cache.entries.clear();
            cache.generation = registry.generation();
        }
        if let Some(summary) = cache.entries.get(&key) {
            tracing::trace!(width = key.width, "viewport summary cache hit");
            return summary.clone();
        }

        tracing::trace!(width = key.width, "viewport summary cache miss");
        let summary = Arc::new(summarize(&registry, viewport));
        cache.entries.put(key, summary.clone());
        summary
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(SharedRegistry::default())
    }
}

fn summarize(registry: &Registry, viewport: &Viewport) -> ViewportSummary {
    let width = viewport.width();
    let landscape = viewport.orientation.is_landscape();

    let mut flags = ViewportFlags::empty();
    flags.set(ViewportFlags::LANDSCAPE, landscape);
    flags.set(ViewportFlags::PORTRAIT, !landscape);
    flags.set(ViewportFlags::HDPI, viewport.is_hdpi());

    let ranges = registry
        .bases()
        .map(|(name, range)| (legacy_flag_name(name), range.contains(width)))
        .collect();

    ViewportSummary {
        width,
        flags,
        ranges,
    }
}

fn select<'a, T>(
    registry: &Registry,
    viewport: &Viewport,
    candidates: &'a [Candidate<T>],
) -> Option<&'a T> {
    let width = viewport.width();
    let landscape = viewport.orientation.is_landscape();

    candidates.iter().find_map(|candidate| {
        let key = candidate.key.as_ref()?;
        let range = registry.get(key)?;
        match key.orientation {
            OrientationFilter::Portrait if landscape => return None,
            OrientationFilter::Landscape if !landscape => return None,
            _ => {}
        }
        range.contains(width).then_some(&candidate.value)
    })
}
