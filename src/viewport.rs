use dpi::{LogicalSize, PhysicalSize, validate_scale_factor};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    #[default]
    Portrait,
}

impl Orientation {
    /// Reads a host orientation type such as `landscape-primary`.
    ///
    /// Hosts that report no orientation are treated as `portrait-primary`.
    pub fn from_type(orientation: Option<&str>) -> Self {
        match orientation {
            Some(ty) if ty.contains("landscape") => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }

    pub fn is_landscape(self) -> bool {
        self == Orientation::Landscape
    }
}

/// What the host reports about the viewport at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: PhysicalSize<u32>,
    pub scale_factor: f64,
    pub orientation: Orientation,
}

impl Viewport {
    pub fn new(size: PhysicalSize<u32>, scale_factor: f64, orientation: Orientation) -> Self {
        Self {
            size,
            scale_factor,
            orientation,
        }
    }

    /// A viewport at scale factor 1 whose logical width is `width`.
    pub fn with_width(width: u32, orientation: Orientation) -> Self {
        Self::new(PhysicalSize::new(width, 0), 1.0, orientation)
    }

    /// Hosts occasionally report a zero or non-finite scale while a window
    /// moves between monitors; such reports are read at scale factor 1.
    pub fn logical_size(&self) -> LogicalSize<u32> {
        let scale = if validate_scale_factor(self.scale_factor) {
            self.scale_factor
        } else {
            1.0
        };
        self.size.to_logical(scale)
    }

    /// The width breakpoints are matched against, in logical pixels.
    pub fn width(&self) -> u32 {
        self.logical_size().width
    }

    pub fn is_hdpi(&self) -> bool {
        self.scale_factor > 1.0
    }
}

/// Supplies the current viewport. Read fresh on every computation.
pub trait ViewportSource: Send + Sync {
    fn viewport(&self) -> Viewport;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}
