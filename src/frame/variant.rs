use crate::foundation::core::PixelSize;
use crate::frame::borders::EnabledBorders;
use crate::frame::metrics::FrameMetrics;
use crate::render::mask::FrameMask;
use crate::render::overlay::OverlayLayer;
use crate::render::pixmap::Pixmap;
use crate::source::ElementSource;

/// Per-prefix frame state: geometry inputs plus the memoized composites.
///
/// A present `cached_base` is always the overlay-free composite of the current
/// `(borders, target_size, prefix, source content)`; `cached_background` additionally carries
/// the overlay for the current overlay position. Every mutator here clears the caches before
/// changing an input; recompute happens lazily on the next read.
#[derive(Clone, Debug, Default)]
pub struct FrameVariant {
    pub(crate) borders: EnabledBorders,
    pub(crate) metrics: FrameMetrics,
    pub(crate) target_size: PixelSize,
    pub(crate) cached_base: Option<Pixmap>,
    pub(crate) cached_background: Option<Pixmap>,
    pub(crate) cached_overlay: Option<OverlayLayer>,
    pub(crate) cached_mask: Option<FrameMask>,
}

impl FrameVariant {
    /// Fresh variant for `prefix` with the given inputs and resolved metrics.
    pub fn new(
        source: &dyn ElementSource,
        prefix: &str,
        borders: EnabledBorders,
        target_size: PixelSize,
    ) -> Self {
        Self {
            borders,
            metrics: FrameMetrics::compute(source, prefix, borders),
            target_size,
            ..Self::default()
        }
    }

    /// Copy the geometry inputs (not the caches) into a variant for another prefix.
    pub fn derive(&self, source: &dyn ElementSource, prefix: &str) -> Self {
        Self::new(source, prefix, self.borders, self.target_size)
    }

    /// Enabled borders.
    pub fn borders(&self) -> EnabledBorders {
        self.borders
    }

    /// Resolved metrics.
    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    /// Requested frame size in pixels.
    pub fn target_size(&self) -> PixelSize {
        self.target_size
    }

    /// Memoized composite including the overlay, if any.
    pub fn cached_background(&self) -> Option<&Pixmap> {
        self.cached_background.as_ref()
    }

    /// Memoized composite without the overlay, if any.
    pub fn cached_base(&self) -> Option<&Pixmap> {
        self.cached_base.as_ref()
    }

    /// Drop every memoized buffer.
    pub fn invalidate(&mut self) {
        self.cached_base = None;
        self.invalidate_overlay();
    }

    /// Drop the buffers that depend on overlay placement; the overlay-free composite survives.
    pub fn invalidate_overlay(&mut self) {
        self.cached_background = None;
        self.cached_overlay = None;
        self.cached_mask = None;
    }

    /// Invalidate and resolve metrics again, e.g. after a theme reload.
    pub fn refresh(&mut self, source: &dyn ElementSource, prefix: &str) {
        self.invalidate();
        self.metrics = FrameMetrics::compute(source, prefix, self.borders);
    }

    /// Change enabled borders; returns `false` when unchanged.
    pub fn set_borders(
        &mut self,
        source: &dyn ElementSource,
        prefix: &str,
        borders: EnabledBorders,
    ) -> bool {
        if borders == self.borders {
            return false;
        }
        self.borders = borders;
        self.refresh(source, prefix);
        true
    }

    /// Change the target size; returns `false` when unchanged.
    ///
    /// Metrics do not depend on size, so only the buffers are dropped.
    pub fn set_target_size(&mut self, size: PixelSize) -> bool {
        if size == self.target_size {
            return false;
        }
        self.target_size = size;
        self.invalidate();
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/variant.rs"]
mod tests;
