use crate::foundation::core::{PixelRect, PixelSize};
use crate::render::pixmap::Pixmap;

/// Binary hit region derived from an alpha channel.
///
/// Only fully opaque pixels are inside; any partial transparency is outside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameMask {
    width: u32,
    height: u32,
    inside: Vec<bool>,
}

/// Horizontal run of inside pixels on one row, `[x0, x1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskSpan {
    /// Row.
    pub y: u32,
    /// First inside column.
    pub x0: u32,
    /// One past the last inside column.
    pub x1: u32,
}

impl FrameMask {
    /// Threshold the alpha channel of `pixmap`.
    pub fn from_alpha(pixmap: &Pixmap) -> Self {
        let inside = pixmap
            .data()
            .chunks_exact(4)
            .map(|px| px[3] == u8::MAX)
            .collect();
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            inside,
        }
    }

    /// Dimensions of the mask bitmap.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Return `true` when the region contains no pixel.
    pub fn is_empty(&self) -> bool {
        !self.inside.iter().any(|&b| b)
    }

    /// Return `true` when `(x, y)` is inside the region. Out-of-bounds is outside.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.inside[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Smallest rectangle covering the region; empty rect for an empty region.
    pub fn bounding_rect(&self) -> PixelRect {
        let mut x0 = u32::MAX;
        let mut y0 = u32::MAX;
        let mut x1 = 0u32;
        let mut y1 = 0u32;
        for span in self.spans() {
            x0 = x0.min(span.x0);
            x1 = x1.max(span.x1);
            y0 = y0.min(span.y);
            y1 = y1.max(span.y + 1);
        }
        if x0 == u32::MAX {
            return PixelRect::default();
        }
        PixelRect::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32)
    }

    /// Iterate inside runs row by row, left to right.
    pub fn spans(&self) -> impl Iterator<Item = MaskSpan> + '_ {
        let w = self.width as usize;
        (0..self.height).flat_map(move |y| {
            let row = &self.inside[(y as usize) * w..(y as usize + 1) * w];
            RowSpans { row, x: 0, y }
        })
    }
}

struct RowSpans<'a> {
    row: &'a [bool],
    x: usize,
    y: u32,
}

impl Iterator for RowSpans<'_> {
    type Item = MaskSpan;

    fn next(&mut self) -> Option<MaskSpan> {
        let start = self.x + self.row[self.x..].iter().position(|&b| b)?;
        let len = self.row[start..]
            .iter()
            .position(|&b| !b)
            .unwrap_or(self.row.len() - start);
        self.x = start + len;
        Some(MaskSpan {
            y: self.y,
            x0: start as u32,
            x1: (start + len) as u32,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
