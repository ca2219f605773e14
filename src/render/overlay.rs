//! Decorative overlay placement.
//!
//! The overlay is an optional `<prefix>overlay` element drawn on top of the background and
//! clipped to the frame's alpha. Placement is driven by hint elements, checked in priority
//! order: random position, right, bottom, stretch, then horizontal/vertical tiling.

use crate::foundation::core::{PixelPoint, PixelRect, PixelSize, clamp_i32};
use crate::render::pixmap::Pixmap;
use crate::source::ElementSource;

/// Frame-sized layer holding the clipped overlay and where it was placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayLayer {
    /// Transparent outside the placement rect and outside the alpha mask.
    pub pixmap: Pixmap,
    /// Resolved top-left of the overlay, used in the overlay cache key.
    pub position: PixelPoint,
}

/// Return `true` when `prefix` carries an overlay. Mask variants never do.
pub fn has_overlay(source: &dyn ElementSource, prefix: &str) -> bool {
    !prefix.starts_with("mask-") && source.has_element(&format!("{prefix}overlay"))
}

/// Resolve the overlay rectangle inside a frame of `frame` size.
///
/// `random_pos` is only consulted when the theme asks for externally chosen placement.
pub fn overlay_rect(
    source: &dyn ElementSource,
    prefix: &str,
    frame: PixelSize,
    random_pos: PixelPoint,
) -> PixelRect {
    let hint = |name: &str| source.has_element(&format!("{prefix}hint-overlay-{name}"));
    let natural = source.element_size(&format!("{prefix}overlay"));
    let fw = clamp_i32(frame.width);
    let fh = clamp_i32(frame.height);
    let mut rect = PixelRect::new(
        0,
        0,
        clamp_i32(natural.width),
        clamp_i32(natural.height),
    );

    if hint("random-pos") {
        rect.x = random_pos.x;
        rect.y = random_pos.y;
    } else if hint("pos-right") {
        rect.x = fw - rect.width;
    } else if hint("pos-bottom") {
        rect.y = fh - rect.height;
    } else if hint("stretch") {
        rect.width = fw;
        rect.height = fh;
    } else {
        if hint("tile-horizontal") {
            rect.width = fw;
        }
        if hint("tile-vertical") {
            rect.height = fh;
        }
    }
    rect
}

/// Render the overlay for `prefix` into a frame-sized layer, source-in masked by `alpha`.
///
/// Returns `None` when there is no overlay or it resolves to an empty rect.
pub fn render_overlay(
    source: &dyn ElementSource,
    prefix: &str,
    frame: PixelSize,
    alpha: &Pixmap,
    random_pos: PixelPoint,
) -> Option<OverlayLayer> {
    if frame.is_empty() || !has_overlay(source, prefix) {
        return None;
    }
    let rect = overlay_rect(source, prefix, frame, random_pos);
    if rect.is_empty() {
        return None;
    }

    let id = format!("{prefix}overlay");
    let tiled = source.has_element(&format!("{prefix}hint-overlay-tile-horizontal"))
        || source.has_element(&format!("{prefix}hint-overlay-tile-vertical"));

    let mut layer = Pixmap::new(frame);
    if tiled {
        let tile = source.render(&id, source.element_size(&id))?;
        layer.draw_source_tiled(&tile, rect);
    } else {
        let px = source.render(&id, rect.size())?;
        layer.draw_source(&px, PixelPoint::new(rect.x, rect.y));
    }
    layer.apply_alpha_mask(alpha);

    Some(OverlayLayer {
        pixmap: layer,
        position: PixelPoint::new(rect.x, rect.y),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
