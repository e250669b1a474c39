//! # Floem Breakpoints
//! Maps the current viewport width and orientation to a value chosen by the caller, and keeps that
//! value current as the window is resized.
//!
//! ## Example
//! ```rust
//! use floem_breakpoints::prelude::*;
//!
//! let resolver = Resolver::default();
//! let viewport = Viewport::with_width(700, Orientation::Portrait);
//!
//! let columns = candidates([("large+", 4), ("tablet", 2), ("mobile-", 1)]);
//! assert_eq!(resolver.resolve(&viewport, Some(3), &columns), Resolved::Value(2));
//!
//! let summary = resolver.summary(&viewport);
//! assert_eq!(summary.get("Tablet"), Some(true));
//! ```
//!
//! ## Breakpoints
//! A breakpoint is a named width range. Width `w` is inside `from..to` when `from < w <= to`.
//! The default table has six of them:
//!
//! | name     | `[from, to]`    | widths         |
//! |----------|-----------------|----------------|
//! | `micro`  | `[0, 375]`      | `0..=375`      |
//! | `mobile` | `[375, 639]`    | `376..=639`    |
//! | `tablet` | `[639, 1023]`   | `640..=1023`   |
//! | `small`  | `[1023, 1439]`  | `1024..=1439`  |
//! | `medium` | `[1439, 1919]`  | `1440..=1919`  |
//! | `large`  | `[1919, 10000]` | `1920..=10000` |
//!
//! Every breakpoint can also be addressed as "this and up" (`tablet+`), "this and down"
//! (`tablet-`), and restricted to landscape (`-tablet`) or portrait (`|tablet`) orientation.
//! See [`BreakpointKey`] for the typed form of these keys.
//!
//! A table is replaced as a whole through [`SharedRegistry::configure`]. Every [`Resolver`] built
//! on the same [`SharedRegistry`] sees the replacement on its next call.
//!
//! ## Resolving
//! [`Resolver::resolve`] answers in one of three ways:
//! - no default and no candidates: a [`ViewportSummary`] with orientation and density flags and
//!   one flag per breakpoint,
//! - a default but no candidates: the default,
//! - candidates: the value of the first candidate whose breakpoint contains the current width
//!   and whose orientation matches, otherwise the default.
//!
//! ## Resizing
//! A [`ResizeHub`] turns host resize events into debounced callbacks. A [`Breakpoint`] watches a
//! hub and memoizes its value between debounced resizes:
//!
//! ```rust
//! use std::time::Instant;
//! use floem_breakpoints::prelude::*;
//!
//! let window = MockViewport::with_size(700, 900);
//! let hub = ResizeHub::default();
//! let mut label = Breakpoint::new(Resolver::default(), window.clone())
//!     .with_default("none")
//!     .with_candidates(candidates([("tablet", "is tablet"), ("small", "is small")]));
//! let _subscription = label.watch(&hub, DEFAULT_DEBOUNCE, || {});
//!
//! let now = Instant::now();
//! window.set_size(1200, 900);
//! hub.notify_resize(now);
//! hub.handle_timers(now + DEFAULT_DEBOUNCE);
//! assert_eq!(label.get().value(), Some(&"is small"));
//! ```

pub mod breakpoint;
#[cfg(feature = "serde")]
pub mod config;
pub mod debounce;
pub mod error;
pub mod mock_viewport;
pub mod range;
pub mod registry;
pub mod resize;
pub mod resolve;
pub mod viewport;

pub use breakpoint::Breakpoint;
#[cfg(feature = "serde")]
pub use config::BreakpointConfig;
pub use debounce::{CoalescingTimer, DEFAULT_DEBOUNCE, TimerToken};
pub use error::{ConfigError, KeyParseError};
pub use mock_viewport::MockViewport;
pub use range::{BreakpointKey, Direction, OrientationFilter, WidthRange};
pub use registry::{DEFAULT_BREAKPOINTS, Registry, SharedRegistry};
pub use resize::{DetachedHost, HostListener, ResizeHub, SubscriberId, Subscription};
pub use resolve::{Candidate, Resolved, Resolver, ViewportFlags, ViewportSummary, candidates};
pub use viewport::{Orientation, Viewport, ViewportSource};

pub mod prelude {
    pub use crate::breakpoint::Breakpoint;
    pub use crate::debounce::DEFAULT_DEBOUNCE;
    pub use crate::mock_viewport::MockViewport;
    pub use crate::range::BreakpointKey;
    pub use crate::registry::SharedRegistry;
    pub use crate::resize::ResizeHub;
    pub use crate::resolve::{Candidate, Resolved, Resolver, candidates};
    pub use crate::viewport::{Orientation, Viewport, ViewportSource};
}
