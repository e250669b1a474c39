//! Mock viewport for headless testing.
//!
//! Stands in for a real window: tests and demos change its size, scale factor
//! and orientation, and every read through [`ViewportSource`] sees the latest
//! values.

use std::fmt;
use std::sync::Arc;

use dpi::PhysicalSize;
use parking_lot::Mutex;

use crate::viewport::{Orientation, Viewport, ViewportSource};

/// A cloneable, shared mock viewport.
#[derive(Clone)]
pub struct MockViewport {
    state: Arc<Mutex<Viewport>>,
}

impl MockViewport {
    /// An 800x600 portrait viewport at scale factor 1.
    pub fn new() -> Self {
        Self::with_size(800, 600)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(Viewport::new(
                PhysicalSize::new(width, height),
                1.0,
                Orientation::Portrait,
            ))),
        }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.state.lock().size = PhysicalSize::new(width, height);
    }

    pub fn set_scale_factor(&self, scale: f64) {
        self.state.lock().scale_factor = scale;
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.state.lock().orientation = orientation;
    }
}

impl Default for MockViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockViewport")
            .field("size", &state.size)
            .field("scale_factor", &state.scale_factor)
            .field("orientation", &state.orientation)
            .finish()
    }
}

impl ViewportSource for MockViewport {
    fn viewport(&self) -> Viewport {
        *self.state.lock()
    }
}
