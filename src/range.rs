//! Width ranges and the keys that name them.
//!
//! A base breakpoint such as `tablet` covers an exact width range. Every base
//! breakpoint is also reachable through directional variants (`Up`, `Down`)
//! and orientation-gated variants (`Landscape`, `Portrait`), which together
//! form a [`BreakpointKey`].
//!
//! Keys also have a textual form, kept compatible with breakpoint tables
//! written for web hooks: an optional orientation sigil as a prefix and an
//! optional direction sigil as a suffix.
//!
//! | text        | orientation | direction |
//! |-------------|-------------|-----------|
//! | `tablet`    | any         | exact     |
//! | `tablet+`   | any         | up        |
//! | `tablet-`   | any         | down      |
//! | `-tablet`   | landscape   | exact     |
//! | `\|tablet-` | portrait    | down      |

use std::{fmt, str::FromStr, sync::Arc};

use strum::EnumIter;

use crate::error::KeyParseError;

/// Suffix marking a key that covers its range and everything above it.
pub const UP: char = '+';
/// Suffix marking a key that covers its range and everything below it.
pub const DOWN: char = '-';
/// Prefix marking a key that only applies in landscape orientation.
pub const LANDSCAPE: char = '-';
/// Prefix marking a key that only applies in portrait orientation.
pub const PORTRAIT: char = '|';

pub(crate) const RESERVED_SIGILS: [char; 3] = [UP, DOWN, PORTRAIT];

/// Widths in logical pixels.
///
/// A width `w` is inside the range when `from < w <= to`. A range that starts
/// at `0` is anchored to the floor and also contains `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WidthRange {
    pub from: u32,
    pub to: u32,
}

impl WidthRange {
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// This range and everything above it.
    pub const fn up(self) -> Self {
        Self {
            from: self.from,
            to: u32::MAX,
        }
    }

    /// This range and everything below it.
    pub const fn down(self) -> Self {
        Self {
            from: 0,
            to: self.to,
        }
    }

    pub const fn contains(&self, width: u32) -> bool {
        (self.from == 0 || self.from < width) && width <= self.to
    }

    pub const fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        match direction {
            Direction::Exact => self,
            Direction::Up => self.up(),
            Direction::Down => self.down(),
        }
    }
}

impl From<[u32; 2]> for WidthRange {
    fn from([from, to]: [u32; 2]) -> Self {
        Self { from, to }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    #[default]
    Exact,
    Up,
    Down,
}

impl Direction {
    pub const fn sigil(self) -> Option<char> {
        match self {
            Direction::Exact => None,
            Direction::Up => Some(UP),
            Direction::Down => Some(DOWN),
        }
    }
}

/// Which display orientations a key applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum OrientationFilter {
    #[default]
    Any,
    Landscape,
    Portrait,
}

impl OrientationFilter {
    pub const fn sigil(self) -> Option<char> {
        match self {
            OrientationFilter::Any => None,
            OrientationFilter::Landscape => Some(LANDSCAPE),
            OrientationFilter::Portrait => Some(PORTRAIT),
        }
    }
}

/// A base breakpoint name qualified by direction and orientation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BreakpointKey {
    pub base: Arc<str>,
    pub direction: Direction,
    pub orientation: OrientationFilter,
}

impl BreakpointKey {
    /// The exact, orientation-independent key for `base`.
    pub fn new(base: impl Into<Arc<str>>) -> Self {
        Self {
            base: base.into(),
            direction: Direction::Exact,
            orientation: OrientationFilter::Any,
        }
    }

    pub fn up(mut self) -> Self {
        self.direction = Direction::Up;
        self
    }

    pub fn down(mut self) -> Self {
        self.direction = Direction::Down;
        self
    }

    pub fn landscape(mut self) -> Self {
        self.orientation = OrientationFilter::Landscape;
        self
    }

    pub fn portrait(mut self) -> Self {
        self.orientation = OrientationFilter::Portrait;
        self
    }
}

impl fmt::Display for BreakpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sigil) = self.orientation.sigil() {
            write!(f, "{sigil}")?;
        }
        f.write_str(&self.base)?;
        if let Some(sigil) = self.direction.sigil() {
            write!(f, "{sigil}")?;
        }
        Ok(())
    }
}

impl FromStr for BreakpointKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let (orientation, rest) = if let Some(rest) = s.strip_prefix(LANDSCAPE) {
            (OrientationFilter::Landscape, rest)
        } else if let Some(rest) = s.strip_prefix(PORTRAIT) {
            (OrientationFilter::Portrait, rest)
        } else {
            (OrientationFilter::Any, s)
        };

        let (direction, base) = if let Some(base) = rest.strip_suffix(UP) {
            (Direction::Up, base)
        } else if let Some(base) = rest.strip_suffix(DOWN) {
            (Direction::Down, base)
        } else {
            (Direction::Exact, rest)
        };

        if base.is_empty() {
            return Err(KeyParseError::MissingName(s.to_string()));
        }
        if base.contains(RESERVED_SIGILS) {
            return Err(KeyParseError::InvalidName(s.to_string()));
        }

        Ok(Self {
            base: base.into(),
            direction,
            orientation,
        })
    }
}

/// Turns a breakpoint name into the flag name used by viewport summaries.
///
/// `mobile` becomes `Mobile`. Names that carry an orientation sigil keep the
/// sigil and capitalize the character after it instead, so `-tablet` becomes
/// `-Tablet`.
pub fn legacy_flag_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let Some(second) = chars.next() else {
        return first.to_uppercase().collect();
    };
    let rest = chars.as_str();

    let mut out = String::with_capacity(name.len());
    if first == LANDSCAPE || second == PORTRAIT {
        out.push(first);
        out.extend(second.to_uppercase());
    } else {
        out.extend(first.to_uppercase());
        out.push(second);
    }
    out.push_str(rest);
    out
}
