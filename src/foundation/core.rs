pub use kurbo::{Point, Rect, Size};

/// Integer pixel dimensions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Zero-area size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Construct a size from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by this size.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Resolve a real-valued size to pixels, rounding to nearest.
    ///
    /// Returns `None` for non-finite or non-positive dimensions and for dimensions that do not
    /// fit into `u32` after rounding.
    pub fn from_size(size: Size) -> Option<Self> {
        fn to_px(v: f64) -> Option<u32> {
            if !v.is_finite() || v <= 0.0 {
                return None;
            }
            let r = v.round();
            if r < 1.0 || r > f64::from(u32::MAX) {
                return None;
            }
            Some(r as u32)
        }

        Some(Self {
            width: to_px(size.width)?,
            height: to_px(size.height)?,
        })
    }

    /// Convert to a real-valued size.
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Integer pixel position; may be negative.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelPoint {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl PixelPoint {
    /// Origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a real-valued point to pixels.
    pub fn from_point(p: Point) -> Self {
        Self {
            x: round_i32(p.x),
            y: round_i32(p.y),
        }
    }
}

/// Integer pixel rectangle. Width or height `<= 0` means the rect is empty.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width; non-positive is empty.
    pub width: i32,
    /// Height; non-positive is empty.
    pub height: i32,
}

impl PixelRect {
    /// Construct a rectangle from origin and extent.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`.
    pub fn from_size(size: PixelSize) -> Self {
        Self::new(0, 0, clamp_i32(size.width), clamp_i32(size.height))
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Extent as a [`PixelSize`]; empty rects yield [`PixelSize::ZERO`].
    pub fn size(self) -> PixelSize {
        if self.is_empty() {
            return PixelSize::ZERO;
        }
        PixelSize::new(self.width as u32, self.height as u32)
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Intersection of two rectangles; empty when they do not overlap.
    pub fn intersect(self, other: Self) -> Self {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Round a real-valued rectangle to pixels.
    pub fn from_rect(r: Rect) -> Self {
        let r = r.abs();
        let x0 = round_i32(r.x0);
        let y0 = round_i32(r.y0);
        let x1 = round_i32(r.x1);
        let y1 = round_i32(r.y1);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }
}

pub(crate) fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

fn round_i32(v: f64) -> i32 {
    if !v.is_finite() {
        return 0;
    }
    v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
