//! World-to-screen transform for the graph view.
//!
//! A screen point is `margin + scale * (world + offset)`, so `offset` is kept
//! in world units and panning moves it by a fraction of the visible range.

use levelgen::{BoundingBox, XY};

/// Fraction of the shorter window side left blank around an auto-scaled graph.
pub const MARGIN_FRACTION: f64 = 0.05;
pub const ZOOM_FACTOR: f64 = 1.1;
/// Pan step as a fraction of the visible range.
pub const PAN_FRACTION: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub scale: f64,
    pub offset: XY,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, offset: XY::ZERO }
    }
}

impl Camera {
    /// Fits `bounds` into a square viewport of side `range`. Returns `None` for
    /// an empty or zero-sized box, where any scale would do.
    pub fn fit(bounds: &BoundingBox, range: f64) -> Option<Self> {
        let min = bounds.min()?;
        let size = bounds.diagonal();
        let usable = range * (1.0 - 2.0 * MARGIN_FRACTION);
        let scale = [size.x, size.y]
            .into_iter()
            .filter(|extent| *extent > 0.0)
            .map(|extent| usable / extent)
            .reduce(f64::min)?;
        Some(Self { scale, offset: -min })
    }

    pub fn margin(range: f64) -> f64 {
        range * MARGIN_FRACTION
    }

    pub fn to_screen(&self, world: XY, range: f64) -> XY {
        let margin = Self::margin(range);
        (world + self.offset) * self.scale + XY::new(margin, margin)
    }

    /// Lengths such as radii and half-widths.
    pub fn to_screen_length(&self, length: f64) -> f64 {
        length * self.scale
    }

    pub fn zoom_in(&mut self) {
        self.scale *= ZOOM_FACTOR;
        self.offset = self.offset / ZOOM_FACTOR;
    }

    pub fn zoom_out(&mut self) {
        self.scale /= ZOOM_FACTOR;
        self.offset = self.offset * ZOOM_FACTOR;
    }

    /// Moves the view by `steps` pan steps along each axis.
    pub fn pan(&mut self, steps: XY, range: f64) {
        let step = range / self.scale * PAN_FRACTION;
        self.offset = self.offset + steps * step;
    }
}
