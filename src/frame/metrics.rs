use crate::frame::borders::EnabledBorders;
use crate::source::ElementSource;

/// Border thickness, layout margins and theme hints for one prefix.
///
/// Thicknesses are the natural sizes of the edge elements along their cross axis. Margins equal
/// the thickness unless a `hint-<edge>-margin` element overrides them, which lets the visual
/// border differ from the clearance reported to layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameMetrics {
    /// Height of the top border in pixels.
    pub top_height: u32,
    /// Width of the left border in pixels.
    pub left_width: u32,
    /// Width of the right border in pixels.
    pub right_width: u32,
    /// Height of the bottom border in pixels.
    pub bottom_height: u32,

    /// Top inset reported to layout.
    pub top_margin: u32,
    /// Left inset reported to layout.
    pub left_margin: u32,
    /// Right inset reported to layout.
    pub right_margin: u32,
    /// Bottom inset reported to layout.
    pub bottom_margin: u32,

    /// All margins are reported as zero.
    pub no_border_padding: bool,
    /// Edges are stretched instead of tiled.
    pub stretch_borders: bool,
    /// The center is tiled instead of stretched.
    pub tile_center: bool,
    /// The center covers the whole frame and is clipped by the `mask-` variant.
    pub compose_over_border: bool,
}

impl FrameMetrics {
    /// Resolve metrics for `prefix` (already normalized, e.g. `"hover-"` or `""`).
    pub fn compute(source: &dyn ElementSource, prefix: &str, borders: EnabledBorders) -> Self {
        let mut m = FrameMetrics::default();

        if borders.contains(EnabledBorders::TOP) {
            m.top_height = source.element_size(&format!("{prefix}top")).height;
            m.top_margin = margin_hint(source, prefix, "top")
                .map(|s| s.height)
                .unwrap_or(m.top_height);
        }
        if borders.contains(EnabledBorders::LEFT) {
            m.left_width = source.element_size(&format!("{prefix}left")).width;
            m.left_margin = margin_hint(source, prefix, "left")
                .map(|s| s.width)
                .unwrap_or(m.left_width);
        }
        if borders.contains(EnabledBorders::RIGHT) {
            m.right_width = source.element_size(&format!("{prefix}right")).width;
            m.right_margin = margin_hint(source, prefix, "right")
                .map(|s| s.width)
                .unwrap_or(m.right_width);
        }
        if borders.contains(EnabledBorders::BOTTOM) {
            m.bottom_height = source.element_size(&format!("{prefix}bottom")).height;
            m.bottom_margin = margin_hint(source, prefix, "bottom")
                .map(|s| s.height)
                .unwrap_or(m.bottom_height);
        }

        m.tile_center = has_hint(source, prefix, "hint-tile-center");
        m.no_border_padding = has_hint(source, prefix, "hint-no-border-padding");
        m.stretch_borders = has_hint(source, prefix, "hint-stretch-borders");
        m.compose_over_border = source.has_element(&format!("{prefix}hint-compose-over-border"))
            && source.has_element(&format!("mask-{prefix}center"));

        m
    }
}

/// A prefix can be composited only when its center element exists.
pub fn is_drawable(source: &dyn ElementSource, prefix: &str) -> bool {
    source.has_element(&format!("{prefix}center"))
}

fn margin_hint(
    source: &dyn ElementSource,
    prefix: &str,
    edge: &str,
) -> Option<crate::foundation::core::PixelSize> {
    let id = format!("{prefix}hint-{edge}-margin");
    source
        .has_element(&id)
        .then(|| source.element_size(&id))
}

// Layout hints may be scoped to the prefix or declared once for the whole theme.
fn has_hint(source: &dyn ElementSource, prefix: &str, hint: &str) -> bool {
    (!prefix.is_empty() && source.has_element(&format!("{prefix}{hint}")))
        || source.has_element(hint)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/metrics.rs"]
mod tests;
