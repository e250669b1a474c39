use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use strum::IntoEnumIterator;

use crate::{
    error::ConfigError,
    range::{BreakpointKey, Direction, OrientationFilter, RESERVED_SIGILS, WidthRange},
};

/// The breakpoints installed when nothing else is configured.
///
/// Each lower bound is the previous upper bound, so with `from < w <= to` every
/// width up to 10000 lands in exactly one of them (`mobile` is `376..=639`).
/// The `up` variants start one lower than in a table written as
/// `mobile [376, 639]`: `mobile+` contains 376.
pub const DEFAULT_BREAKPOINTS: [(&str, WidthRange); 6] = [
    ("micro", WidthRange::new(0, 375)),
    ("mobile", WidthRange::new(375, 639)),
    ("tablet", WidthRange::new(639, 1023)),
    ("small", WidthRange::new(1023, 1439)),
    ("medium", WidthRange::new(1439, 1919)),
    ("large", WidthRange::new(1919, 10000)),
];

fn next_generation() -> u64 {
    static GENERATION: AtomicU64 = AtomicU64::new(1);
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// An immutable set of named width ranges and all of their derived keys.
///
/// Every base range expands into nine keys: each [`Direction`] crossed with
/// each [`OrientationFilter`]. Expansion always starts from the base ranges,
/// so rebuilding a registry from the same input gives the same keys.
#[derive(Clone, Debug)]
pub struct Registry {
    generation: u64,
    bases: IndexMap<Arc<str>, WidthRange>,
    entries: FxHashMap<BreakpointKey, WidthRange>,
}

impl Registry {
    /// Validates and expands `bases`. A repeated name replaces the earlier one.
    pub fn new<I, S, R>(bases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: Into<WidthRange>,
    {
        let mut validated = IndexMap::new();
        for (name, range) in bases {
            let name = name.as_ref();
            let range = range.into();
            validate(name, range)?;
            validated.insert(Arc::<str>::from(name), range);
        }
        Ok(Self::from_validated(validated))
    }

    fn from_validated(bases: IndexMap<Arc<str>, WidthRange>) -> Self {
        let entries = expand(&bases);
        Self {
            generation: next_generation(),
            bases,
            entries,
        }
    }

    /// Identifies this snapshot. Two registries never share a generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, key: &BreakpointKey) -> Option<WidthRange> {
        self.entries.get(key).copied()
    }

    /// Looks up a key written in the textual form; malformed keys are absent.
    pub fn get_str(&self, key: &str) -> Option<WidthRange> {
        let key = key.parse().ok()?;
        self.get(&key)
    }

    /// Base ranges in configuration order.
    pub fn bases(&self) -> impl Iterator<Item = (&str, WidthRange)> + '_ {
        self.bases.iter().map(|(name, range)| (&**name, *range))
    }

    pub fn keys(&self) -> impl Iterator<Item = &BreakpointKey> + '_ {
        self.entries.keys()
    }

    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_validated(
            DEFAULT_BREAKPOINTS
                .iter()
                .map(|(name, range)| (Arc::<str>::from(*name), *range))
                .collect(),
        )
    }
}

fn validate(name: &str, range: WidthRange) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyName);
    }
    if let Some(sigil) = name.chars().find(|c| RESERVED_SIGILS.contains(c)) {
        return Err(ConfigError::ReservedSigil {
            name: name.to_string(),
            sigil,
        });
    }
    if range.is_empty() {
        return Err(ConfigError::EmptyRange {
            name: name.to_string(),
            from: range.from,
            to: range.to,
        });
    }
    Ok(())
}

fn expand(bases: &IndexMap<Arc<str>, WidthRange>) -> FxHashMap<BreakpointKey, WidthRange> {
    let mut entries = FxHashMap::default();
    entries.reserve(bases.len() * 9);
    for (name, range) in bases {
        for direction in Direction::iter() {
            for orientation in OrientationFilter::iter() {
                let key = BreakpointKey {
                    base: name.clone(),
                    direction,
                    orientation,
                };
                entries.insert(key, range.with_direction(direction));
            }
        }
    }
    entries
}

/// A shared handle to the active registry.
///
/// Readers take a snapshot and never observe a half-replaced registry;
/// [`configure`](Self::configure) swaps in a complete new registry.
#[derive(Clone, Debug, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Arc<Registry>>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// Replaces the active registry with one built from `bases`.
    ///
    /// On error the active registry is left untouched.
    pub fn configure<I, S, R>(&self, bases: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: Into<WidthRange>,
    {
        let registry = Registry::new(bases)?;
        self.replace(registry);
        Ok(())
    }

    pub fn replace(&self, registry: Registry) {
        tracing::debug!(
            generation = registry.generation(),
            bases = registry.base_count(),
            "breakpoint registry replaced"
        );
        *self.inner.write() = Arc::new(registry);
    }

    pub fn snapshot(&self) -> Arc<Registry> {
        self.inner.read().clone()
    }
}
