//! 9-slice background compositing.
//!
//! The output is always the variant's target size. Center, corners and edges are drawn in
//! replace mode onto a transparent buffer so partially transparent theme pieces never blend
//! with each other.

use crate::foundation::core::{PixelPoint, PixelRect, PixelSize, clamp_i32};
use crate::frame::borders::EnabledBorders;
use crate::frame::variant::FrameVariant;
use crate::render::pixmap::Pixmap;
use crate::source::ElementSource;

/// Composite the background of `variant` for the normalized `prefix`.
///
/// `compose_mask` is the alpha source used to clip the center when the variant composes over
/// its borders; it is ignored otherwise. Returns `None` for an empty target size.
#[tracing::instrument(
    level = "debug",
    skip(source, variant, compose_mask),
    fields(size = ?variant.target_size, borders = variant.borders.bits())
)]
pub fn composite_background(
    source: &dyn ElementSource,
    prefix: &str,
    variant: &FrameVariant,
    compose_mask: Option<&Pixmap>,
) -> Option<Pixmap> {
    let size = variant.target_size;
    if size.is_empty() {
        return None;
    }

    let m = &variant.metrics;
    let borders = variant.borders;
    let w = clamp_i32(size.width);
    let h = clamp_i32(size.height);
    let lw = clamp_i32(m.left_width);
    let rw = clamp_i32(m.right_width);
    let th = clamp_i32(m.top_height);
    let bh = clamp_i32(m.bottom_height);

    let content_w = w - lw - rw;
    let content_h = h - th - bh;
    let right_x = lw + content_w;
    let bottom_y = th + content_h;

    let mut p = Painter {
        source,
        prefix,
        out: Pixmap::new(size),
    };

    // Center.
    if content_w > 0 && content_h > 0 {
        let area = if m.compose_over_border {
            PixelRect::new(0, 0, w, h)
        } else {
            PixelRect::new(lw, th, content_w, content_h)
        };
        if m.tile_center {
            let natural = source.element_size(&p.id("center"));
            p.tile("center", natural, area);
        } else {
            p.place("center", area);
        }
    }
    if m.compose_over_border
        && let Some(mask) = compose_mask
    {
        p.out.apply_alpha_mask(mask);
    }

    // Corners, flush to the output edges and never scaled.
    let top_left = borders.contains(EnabledBorders::TOP | EnabledBorders::LEFT)
        && p.place("topleft", PixelRect::new(0, 0, lw, th));
    let top_right = borders.contains(EnabledBorders::TOP | EnabledBorders::RIGHT)
        && p.place("topright", PixelRect::new(right_x, 0, rw, th));
    let bottom_left = borders.contains(EnabledBorders::BOTTOM | EnabledBorders::LEFT)
        && p.place("bottomleft", PixelRect::new(0, bottom_y, lw, bh));
    let bottom_right = borders.contains(EnabledBorders::BOTTOM | EnabledBorders::RIGHT)
        && p.place("bottomright", PixelRect::new(right_x, bottom_y, rw, bh));

    // Edges span the gap between placed corners, or the full side without one.
    let x0_top = if top_left { lw } else { 0 };
    let x1_top = if top_right { right_x } else { w };
    let x0_bottom = if bottom_left { lw } else { 0 };
    let x1_bottom = if bottom_right { right_x } else { w };
    let y0_left = if top_left { th } else { 0 };
    let y1_left = if bottom_left { bottom_y } else { h };
    let y0_right = if top_right { th } else { 0 };
    let y1_right = if bottom_right { bottom_y } else { h };

    let edges = [
        (
            EnabledBorders::LEFT,
            "left",
            PixelRect::new(0, y0_left, lw, y1_left - y0_left),
        ),
        (
            EnabledBorders::RIGHT,
            "right",
            PixelRect::new(right_x, y0_right, rw, y1_right - y0_right),
        ),
        (
            EnabledBorders::TOP,
            "top",
            PixelRect::new(x0_top, 0, x1_top - x0_top, th),
        ),
        (
            EnabledBorders::BOTTOM,
            "bottom",
            PixelRect::new(x0_bottom, bottom_y, x1_bottom - x0_bottom, bh),
        ),
    ];

    for (flag, suffix, rect) in edges {
        if !borders.contains(flag) || rect.is_empty() {
            continue;
        }
        if m.stretch_borders {
            p.place(suffix, rect);
        } else {
            let natural = source.element_size(&p.id(suffix));
            let tile = if flag.intersects(EnabledBorders::TOP | EnabledBorders::BOTTOM) {
                PixelSize::new(natural.width, rect.size().height)
            } else {
                PixelSize::new(rect.size().width, natural.height)
            };
            p.tile(suffix, tile, rect);
        }
    }

    Some(p.out)
}

struct Painter<'a> {
    source: &'a dyn ElementSource,
    prefix: &'a str,
    out: Pixmap,
}

impl Painter<'_> {
    fn id(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.prefix)
    }

    /// Render the element stretched to `rect`; returns `true` when something was drawn.
    fn place(&mut self, suffix: &str, rect: PixelRect) -> bool {
        if rect.is_empty() {
            return false;
        }
        let Some(px) = self.source.render(&self.id(suffix), rect.size()) else {
            return false;
        };
        self.out.draw_source(&px, PixelPoint::new(rect.x, rect.y));
        true
    }

    /// Render one `tile`-sized copy of the element and repeat it across `rect`.
    fn tile(&mut self, suffix: &str, tile: PixelSize, rect: PixelRect) {
        if rect.is_empty() || tile.is_empty() {
            return;
        }
        if let Some(px) = self.source.render(&self.id(suffix), tile) {
            self.out.draw_source_tiled(&px, rect);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
