//! Geometry primitives for the crop editor.
//!
//! All coordinates are in source-display pixel units.

use serde::{Deserialize, Serialize};

/// Minimum crop rectangle edge length in display pixels.
pub const MIN_CROP_SIZE: f64 = 100.0;

/// Clamp a value to `[lo, hi]`.
///
/// Written as a max/min chain so that an inverted range (possible when a
/// display is smaller than the minimum crop size) resolves to `hi` instead
/// of panicking like `f64::clamp`.
pub fn clamp_f64(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// A 2D vector in display pixels. Also used for sizes (width in `x`,
/// height in `y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

impl XY {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise multiplication, used for screen-to-display ratios.
    pub fn scaled(&self, factor: XY) -> XY {
        XY {
            x: self.x * factor.x,
            y: self.y * factor.y,
        }
    }
}

impl std::ops::Add for XY {
    type Output = XY;

    fn add(self, rhs: XY) -> XY {
        XY {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for XY {
    type Output = XY;

    fn sub(self, rhs: XY) -> XY {
        XY {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A crop rectangle within the source display.
///
/// Invariants (enforced by [`CropRect::clamp_to`] at every mutation site):
/// `position >= 0`, `position + size <= display`, and each size axis is at
/// least [`MIN_CROP_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Top-left corner.
    pub position: XY,
    /// Width (`x`) and height (`y`).
    pub size: XY,
}

impl CropRect {
    pub fn new(position: XY, size: XY) -> Self {
        Self { position, size }
    }

    /// The full display bounds (no crop).
    pub fn full(display: XY) -> Self {
        Self {
            position: XY::new(0.0, 0.0),
            size: display,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    /// Enforce the crop invariants against the given display bounds.
    ///
    /// Size is clamped first, then position is clamped to keep the
    /// rectangle inside the display at that size.
    pub fn clamp_to(&self, display: XY) -> Self {
        let size = XY::new(
            clamp_f64(self.size.x, MIN_CROP_SIZE, display.x),
            clamp_f64(self.size.y, MIN_CROP_SIZE, display.y),
        );
        let position = XY::new(
            clamp_f64(self.position.x, 0.0, display.x - size.x),
            clamp_f64(self.position.y, 0.0, display.y - size.y),
        );
        Self { position, size }
    }

    /// Whether the rectangle satisfies the crop invariants for `display`.
    pub fn is_valid_for(&self, display: XY) -> bool {
        self.position.x >= 0.0
            && self.position.y >= 0.0
            && self.right() <= display.x
            && self.bottom() <= display.y
            && self.size.x >= MIN_CROP_SIZE
            && self.size.y >= MIN_CROP_SIZE
    }
}
