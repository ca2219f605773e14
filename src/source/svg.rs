use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{ThemeFrameError, ThemeFrameResult};
use crate::render::pixmap::Pixmap;
use crate::source::ElementSource;

// Same guard as the frame size limit: a single element raster never needs to be larger.
const MAX_ELEMENT_DIM: u32 = 16_384;

/// Element source backed by a parsed SVG document (plain or gzip-compressed).
///
/// Elements are looked up by their `id` attribute. Natural sizes are the element's absolute
/// bounding box rounded to whole pixels.
#[derive(Clone, Debug)]
pub struct SvgElementSource {
    tree: Arc<usvg::Tree>,
    identity: String,
}

impl SvgElementSource {
    /// Read and parse an SVG file. The path becomes the source identity.
    pub fn from_path(path: impl AsRef<Path>) -> ThemeFrameResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_data(&bytes, path.display().to_string())
    }

    /// Parse SVG bytes with an explicit identity string.
    pub fn from_data(bytes: &[u8], identity: impl Into<String>) -> ThemeFrameResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| ThemeFrameError::source(format!("parse svg tree: {e}")))?;
        Ok(Self {
            tree: Arc::new(tree),
            identity: identity.into(),
        })
    }

    /// Size of the whole document.
    pub fn document_size(&self) -> PixelSize {
        let size = self.tree.size();
        PixelSize::new(round_px(size.width()), round_px(size.height()))
    }
}

impl ElementSource for SvgElementSource {
    fn has_element(&self, id: &str) -> bool {
        !id.is_empty() && self.tree.node_by_id(id).is_some()
    }

    fn element_size(&self, id: &str) -> PixelSize {
        if id.is_empty() {
            return PixelSize::ZERO;
        }
        let Some(node) = self.tree.node_by_id(id) else {
            return PixelSize::ZERO;
        };
        let bbox = node.abs_bounding_box();
        PixelSize::new(round_px(bbox.width()), round_px(bbox.height()))
    }

    fn render(&self, id: &str, size: PixelSize) -> Option<Pixmap> {
        if size.is_empty() || id.is_empty() {
            return None;
        }
        if size.width > MAX_ELEMENT_DIM || size.height > MAX_ELEMENT_DIM {
            tracing::warn!(id, ?size, "element raster size too large");
            return None;
        }
        let node = self.tree.node_by_id(id)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)?;
        // Elements without visible extent (e.g. hint markers) render as transparent.
        if let Some(bbox) = node.abs_layer_bounding_box() {
            let sx = (size.width as f32) / bbox.width();
            let sy = (size.height as f32) / bbox.height();
            let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
            resvg::render_node(node, xform, &mut pixmap.as_mut());
        }

        Pixmap::from_premul_rgba8(size.width, size.height, pixmap.take()).ok()
    }

    fn source_identity(&self) -> String {
        self.identity.clone()
    }
}

fn round_px(v: f32) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg.rs"]
mod tests;
