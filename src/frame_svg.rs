use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::key::{background_key, overlay_key};
use crate::cache::store::FrameCache;
use crate::cache::write_back::WriteBackQueue;
use crate::foundation::core::{PixelPoint, PixelRect, PixelSize, Point, Rect, Size};
use crate::foundation::error::ThemeFrameResult;
use crate::frame::borders::{EnabledBorders, Location, MarginEdge};
use crate::frame::metrics::{FrameMetrics, is_drawable};
use crate::frame::store::VariantStore;
use crate::frame::variant::FrameVariant;
use crate::render::compositor::composite_background;
use crate::render::mask::FrameMask;
use crate::render::overlay::{OverlayLayer, has_overlay, overlay_rect, render_overlay};
use crate::render::pixmap::Pixmap;
use crate::source::ElementSource;
use crate::source::svg::SvgElementSource;

const MASK_PREFIX: &str = "mask-";

/// Options for [`FrameSvg`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSvgOpts {
    /// Keep every variant ever selected instead of evicting the previous one on switch.
    pub cache_all_rendered_frames: bool,
    /// Idle time between the last composite and the persistent cache write.
    pub write_back_delay: Duration,
    /// Frames at least this large in either dimension are refused.
    pub max_frame_size: u32,
}

impl Default for FrameSvgOpts {
    fn default() -> Self {
        Self {
            cache_all_rendered_frames: false,
            write_back_delay: Duration::from_millis(300),
            max_frame_size: 100_000,
        }
    }
}

impl FrameSvgOpts {
    /// Defaults with `THEMEFRAME_WRITE_BACK_DELAY_MS` and `THEMEFRAME_MAX_FRAME_SIZE` applied.
    ///
    /// Unparseable values are ignored. A zero frame size limit is ignored as well.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(ms) = std::env::var("THEMEFRAME_WRITE_BACK_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            opts.write_back_delay = Duration::from_millis(ms);
        }
        if let Some(max) = std::env::var("THEMEFRAME_MAX_FRAME_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.max_frame_size = max;
        }
        opts
    }
}

/// Layout insets of a frame, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    /// Top inset.
    pub top: f64,
    /// Left inset.
    pub left: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
}

/// Resizable themed frame built from the named elements of an [`ElementSource`].
///
/// A frame keeps one variant per element prefix (`""`, `"hover-"`, ...). Each variant memoizes
/// its composite until borders, size or theme content change. With a [`FrameCache`] attached,
/// composites are looked up before rendering and written back after an idle delay that the
/// owner drives through [`FrameSvg::poll_write_back`].
pub struct FrameSvg {
    source: Box<dyn ElementSource>,
    cache: Option<Arc<dyn FrameCache>>,
    opts: FrameSvgOpts,
    store: VariantStore,
    location: Location,
    overlay_pos: PixelPoint,
    write_back: WriteBackQueue,
    image_path: Option<PathBuf>,
    // After an in-place theme change only keys written since then are trusted.
    fresh_keys: Option<HashSet<String>>,
}

impl std::fmt::Debug for FrameSvg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSvg")
            .field("source", &self.source.source_identity())
            .field("has_cache", &self.cache.is_some())
            .field("opts", &self.opts)
            .field("active_prefix", &self.store.active_prefix())
            .field("variants", &self.store.len())
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl FrameSvg {
    /// Frame over `source` with the default prefix, all borders and a 0x0 size.
    pub fn new(source: impl ElementSource + 'static, opts: FrameSvgOpts) -> Self {
        let source: Box<dyn ElementSource> = Box::new(source);
        let store = VariantStore::new(source.as_ref());
        Self {
            source,
            cache: None,
            opts,
            store,
            location: Location::Floating,
            overlay_pos: PixelPoint::ZERO,
            write_back: WriteBackQueue::new(opts.write_back_delay),
            image_path: None,
            fresh_keys: None,
        }
    }

    /// Attach a persistent cache.
    pub fn with_cache(mut self, cache: Arc<dyn FrameCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Frame over an SVG theme file.
    pub fn from_svg_path(path: impl AsRef<Path>, opts: FrameSvgOpts) -> ThemeFrameResult<Self> {
        let path = path.as_ref();
        let mut frame = Self::new(SvgElementSource::from_path(path)?, opts);
        frame.image_path = Some(path.to_path_buf());
        Ok(frame)
    }

    /// Options this frame was built with.
    pub fn opts(&self) -> &FrameSvgOpts {
        &self.opts
    }

    /// Current element source.
    pub fn element_source(&self) -> &dyn ElementSource {
        self.source.as_ref()
    }

    /// Load an SVG theme. Does nothing when `path` is already the current image.
    pub fn set_image_source(&mut self, path: impl AsRef<Path>) -> ThemeFrameResult<()> {
        let path = path.as_ref();
        if self.image_path.as_deref() == Some(path) {
            return Ok(());
        }
        let source = SvgElementSource::from_path(path)?;
        self.set_element_source(source);
        self.image_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the element source. Drops every variant but the active one and resolves metrics
    /// against the new theme.
    ///
    /// A source reporting the same identity as the old one is treated like
    /// [`FrameSvg::source_changed`].
    pub fn set_element_source(&mut self, source: impl ElementSource + 'static) {
        let old_identity = self.source.source_identity();
        self.source = Box::new(source);
        self.image_path = None;
        self.store.retain_active();
        self.store.refresh_all(self.source.as_ref());
        self.fresh_keys = (self.source.source_identity() == old_identity).then(HashSet::new);
    }

    /// The theme content behind the current source changed in place.
    ///
    /// Persistent entries written before this call are ignored from now on, since their keys
    /// cannot tell the old content from the new.
    pub fn source_changed(&mut self) {
        tracing::debug!(identity = %self.source.source_identity(), "theme source changed");
        self.store.refresh_all(self.source.as_ref());
        self.fresh_keys = Some(HashSet::new());
    }

    /// Path of the loaded SVG theme, if the source came from one.
    pub fn image_source(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    /// Choose which borders the active variant draws.
    pub fn set_enabled_borders(&mut self, borders: EnabledBorders) {
        let prefix = self.store.active_prefix().to_string();
        self.store
            .active_mut()
            .set_borders(self.source.as_ref(), &prefix, borders);
    }

    /// Borders drawn by the active variant.
    pub fn enabled_borders(&self) -> EnabledBorders {
        self.store
            .active()
            .map(|v| v.borders())
            .unwrap_or(EnabledBorders::empty())
    }

    /// Switch to the element set named `name` (`"hover"` selects `hover-center`, ...).
    ///
    /// Falls back to the default elements when the theme has no `<name>-center`.
    pub fn set_element_prefix(&mut self, name: &str) {
        let old = self.store.active_prefix().to_string();
        let cache_all = self.opts.cache_all_rendered_frames;
        let new = self
            .store
            .select_prefix(name, self.source.as_ref(), cache_all)
            .to_string();
        let old_mask = format!("{MASK_PREFIX}{old}");
        if !cache_all && old != new {
            self.store.remove(&old_mask);
        }
        self.discard_evicted([old, old_mask]);
        self.location = Location::Floating;
    }

    /// Switch to the element set for a screen edge (`north`, `south`, `west`, `east`).
    pub fn set_element_prefix_location(&mut self, location: Location) {
        self.set_element_prefix(location.prefix_name());
        self.location = location;
    }

    /// Active prefix without its trailing dash; empty for the default elements.
    pub fn prefix(&self) -> &str {
        let p = self.store.active_prefix();
        p.strip_suffix('-').unwrap_or(p)
    }

    /// Active prefix as used in element ids, e.g. `"hover-"` or `""`.
    pub fn actual_prefix(&self) -> &str {
        self.store.active_prefix()
    }

    /// Screen edge last selected through [`FrameSvg::set_element_prefix_location`].
    pub fn location(&self) -> Location {
        self.location
    }

    /// Return `true` when the theme carries a center element for `name`.
    pub fn has_element_prefix(&self, name: &str) -> bool {
        if name.is_empty() {
            self.source.has_element("center")
        } else {
            self.source.has_element(&format!("{name}-center"))
        }
    }

    /// [`FrameSvg::has_element_prefix`] for a screen edge.
    pub fn has_element_prefix_location(&self, location: Location) -> bool {
        self.has_element_prefix(location.prefix_name())
    }

    /// Return `true` when the active prefix can be composited.
    pub fn is_drawable(&self) -> bool {
        is_drawable(self.source.as_ref(), self.store.active_prefix())
    }

    /// Set the frame size. Sizes are rounded to pixels; empty or non-finite sizes are ignored.
    pub fn resize_frame(&mut self, size: Size) {
        let Some(px) = PixelSize::from_size(size) else {
            tracing::warn!(width = size.width, height = size.height, "invalid frame size");
            return;
        };
        self.store.active_mut().set_target_size(px);
    }

    /// Frame size of the active variant.
    pub fn frame_size(&self) -> Size {
        self.store
            .active()
            .map(|v| v.target_size().to_size())
            .unwrap_or(Size::ZERO)
    }

    /// Resolved metrics of the active variant.
    pub fn metrics(&self) -> FrameMetrics {
        self.store
            .active()
            .map(|v| *v.metrics())
            .unwrap_or_default()
    }

    /// Layout inset on one edge.
    pub fn margin_size(&self, edge: MarginEdge) -> f64 {
        let m = self.margins();
        match edge {
            MarginEdge::Top => m.top,
            MarginEdge::Bottom => m.bottom,
            MarginEdge::Left => m.left,
            MarginEdge::Right => m.right,
        }
    }

    /// Layout insets on all edges; all zero when the theme opts out of border padding.
    pub fn margins(&self) -> Margins {
        let m = self.metrics();
        if m.no_border_padding {
            return Margins::default();
        }
        Margins {
            top: f64::from(m.top_margin),
            left: f64::from(m.left_margin),
            right: f64::from(m.right_margin),
            bottom: f64::from(m.bottom_margin),
        }
    }

    /// Frame rectangle shrunk by the margins; empty when the frame has no size.
    pub fn contents_rect(&self) -> Rect {
        let size = self.frame_size();
        if size.is_zero_area() {
            return Rect::ZERO;
        }
        let m = self.margins();
        Rect::new(m.left, m.top, size.width - m.right, size.height - m.bottom)
    }

    /// Composited frame for the active variant; empty when it cannot be drawn.
    pub fn frame_pixmap(&mut self) -> Pixmap {
        let prefix = self.store.active_prefix().to_string();
        self.ensure_background(&prefix).unwrap_or_default()
    }

    /// Draw the frame over `target`, mapping `source_rect` of the frame onto `target_rect`.
    ///
    /// Without a valid `source_rect` the target rect is used in frame coordinates as well.
    pub fn paint_frame(
        &mut self,
        target: &mut Pixmap,
        target_rect: Rect,
        source_rect: Option<Rect>,
    ) {
        let frame = self.frame_pixmap();
        if frame.is_empty() {
            return;
        }
        let src = source_rect
            .filter(|r| r.area() > 0.0)
            .unwrap_or(target_rect);
        let src = PixelRect::from_rect(src).intersect(PixelRect::from_size(frame.size()));
        let dst = PixelRect::from_rect(target_rect);
        if src.is_empty() || dst.is_empty() {
            return;
        }

        let mut piece = Pixmap::new(src.size());
        piece.draw_source(&frame, PixelPoint::new(-src.x, -src.y));
        let piece = piece.scaled(dst.size());
        target.draw_over(&piece, PixelPoint::new(dst.x, dst.y));
    }

    /// Draw the whole frame over `target` with its top-left at `pos`.
    pub fn paint_frame_at(&mut self, target: &mut Pixmap, pos: Point) {
        let frame = self.frame_pixmap();
        if frame.is_empty() {
            return;
        }
        target.draw_over(&frame, PixelPoint::from_point(pos));
    }

    /// Buffer whose alpha defines the frame silhouette.
    ///
    /// This is the `mask-` variant when the theme has one, else the frame itself.
    pub fn alpha_mask(&mut self) -> Pixmap {
        let prefix = self.store.active_prefix().to_string();
        self.alpha_source(&prefix).unwrap_or_default()
    }

    /// Hit region of the frame: the fully opaque pixels of [`FrameSvg::alpha_mask`].
    pub fn mask(&mut self) -> FrameMask {
        if let Some(mask) = self.store.active().and_then(|v| v.cached_mask.clone()) {
            return mask;
        }
        let mask = FrameMask::from_alpha(&self.alpha_mask());
        self.store.active_mut().cached_mask = Some(mask.clone());
        mask
    }

    /// Position used by themes that place their overlay externally.
    pub fn set_overlay_position(&mut self, pos: Point) {
        let pos = PixelPoint::from_point(pos);
        if pos == self.overlay_pos {
            return;
        }
        self.overlay_pos = pos;
        let random = format!("{}hint-overlay-random-pos", self.store.active_prefix());
        if self.source.has_element(&random) {
            self.store.active_mut().invalidate_overlay();
        }
    }

    /// Position used by themes that place their overlay externally.
    pub fn overlay_position(&self) -> Point {
        Point::new(f64::from(self.overlay_pos.x), f64::from(self.overlay_pos.y))
    }

    /// Keep every selected variant around instead of evicting on prefix switch.
    ///
    /// Turning this off drops all inactive variants.
    pub fn set_cache_all_rendered_frames(&mut self, cache_all: bool) {
        if self.opts.cache_all_rendered_frames && !cache_all {
            self.clear_cache();
        }
        self.opts.cache_all_rendered_frames = cache_all;
    }

    /// Whether every selected variant is kept.
    pub fn cache_all_rendered_frames(&self) -> bool {
        self.opts.cache_all_rendered_frames
    }

    /// Drop every variant except the active one and the default prefix.
    pub fn clear_cache(&mut self) {
        let before = self.cached_prefixes();
        self.store.retain_active();
        self.discard_evicted(before);
    }

    /// Prefixes with a live variant, in creation order.
    pub fn cached_prefixes(&self) -> Vec<String> {
        self.store.prefixes().map(str::to_string).collect()
    }

    /// Write pending composites to the persistent cache if the idle deadline passed at `now`.
    ///
    /// Returns the number of entries stored.
    pub fn poll_write_back(&mut self, now: Instant) -> usize {
        let due = self.write_back.take_due(now);
        self.write_pending(due)
    }

    /// Write every pending composite now. Returns the number of entries stored.
    pub fn flush_write_back(&mut self) -> usize {
        let all = self.write_back.take_all();
        self.write_pending(all)
    }

    /// Return `true` while composites wait for write-back.
    pub fn has_pending_write_back(&self) -> bool {
        self.write_back.has_pending()
    }

    /// Deadline of the pending write-back, if any.
    pub fn write_back_deadline(&self) -> Option<Instant> {
        self.write_back.deadline()
    }

    fn discard_evicted(&mut self, prefixes: impl IntoIterator<Item = String>) {
        for prefix in prefixes {
            if !self.store.contains(&prefix) {
                self.write_back.discard(&prefix);
            }
        }
    }

    fn write_pending(&mut self, prefixes: Vec<String>) -> usize {
        let Some(cache) = self.cache.clone() else {
            return 0;
        };
        let identity = self.source.source_identity();
        let mut written = Vec::new();
        for prefix in prefixes {
            let Some(variant) = self.store.get(&prefix) else {
                tracing::debug!(prefix = %prefix, "write-back skipped, variant evicted");
                continue;
            };
            let Some(base) = variant.cached_base() else {
                tracing::debug!(prefix = %prefix, "write-back skipped, variant invalidated");
                continue;
            };

            let size = variant.target_size();
            let key = background_key(variant.borders(), size, &prefix, &identity);
            let mut entries = vec![(key, base)];
            if let Some(layer) = &variant.cached_overlay {
                let key = overlay_key(layer.position, variant.borders(), size, &prefix, &identity);
                entries.push((key, &layer.pixmap));
            }
            for (key, pixmap) in entries {
                match cache.put(&key, pixmap) {
                    Ok(()) => written.push(key),
                    Err(e) => tracing::warn!(key = %key, "frame cache write failed: {e}"),
                }
            }
        }
        if !written.is_empty() {
            tracing::debug!(entries = written.len(), "frame cache write-back flushed");
        }
        let count = written.len();
        if let Some(fresh) = &mut self.fresh_keys {
            fresh.extend(written);
        }
        count
    }

    fn cache_lookup(&self, key: &str, size: PixelSize) -> Option<Pixmap> {
        let cache = self.cache.as_ref()?;
        if self.fresh_keys.as_ref().is_some_and(|fresh| !fresh.contains(key)) {
            tracing::debug!(key, "frame cache entry predates theme change, ignored");
            return None;
        }
        match cache.get(key) {
            Ok(Some(px)) if px.size() == size => {
                tracing::debug!(key, "frame cache hit");
                Some(px)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key, "frame cache read failed: {e}");
                None
            }
        }
    }

    /// Memoized composite of the variant for `prefix`, creating it on a miss.
    ///
    /// The overlay-free composite and the overlay layer are looked up and cached separately, so
    /// moving the overlay never serves a stale placement.
    #[tracing::instrument(level = "debug", skip(self))]
    fn ensure_background(&mut self, prefix: &str) -> Option<Pixmap> {
        let variant = self.store.get(prefix)?;
        if let Some(bg) = variant.cached_background() {
            return Some(bg.clone());
        }
        let variant = variant.clone();

        let size = variant.target_size();
        if size.is_empty() {
            return None;
        }
        let max = self.opts.max_frame_size;
        if size.width >= max || size.height >= max {
            tracing::warn!(
                width = size.width,
                height = size.height,
                max,
                "refusing to composite oversized frame"
            );
            return None;
        }
        if !is_drawable(self.source.as_ref(), prefix) {
            return None;
        }

        let identity = self.source.source_identity();
        let mut rendered = false;
        let base = match variant.cached_base() {
            Some(base) => base.clone(),
            None => {
                let key = background_key(variant.borders(), size, prefix, &identity);
                match self.cache_lookup(&key, size) {
                    Some(hit) => hit,
                    None => {
                        let compose_mask = if variant.metrics().compose_over_border {
                            self.mask_background(prefix)
                        } else {
                            None
                        };
                        rendered = true;
                        composite_background(
                            self.source.as_ref(),
                            prefix,
                            &variant,
                            compose_mask.as_ref(),
                        )?
                    }
                }
            }
        };

        let mut background = base.clone();
        let overlay = match self.compose_overlay(prefix, &variant, &base, &identity) {
            Some((layer, fresh)) => {
                background.draw_over(&layer.pixmap, PixelPoint::ZERO);
                rendered |= fresh;
                Some(layer)
            }
            None => None,
        };

        let v = self.store.get_mut(prefix)?;
        v.cached_base = Some(base);
        v.cached_background = Some(background.clone());
        v.cached_overlay = overlay;
        if rendered && self.cache.is_some() {
            self.write_back.schedule(prefix, Instant::now());
        }
        Some(background)
    }

    /// Overlay layer for `prefix` and whether it had to be rendered.
    fn compose_overlay(
        &mut self,
        prefix: &str,
        variant: &FrameVariant,
        base: &Pixmap,
        identity: &str,
    ) -> Option<(OverlayLayer, bool)> {
        if !has_overlay(self.source.as_ref(), prefix) {
            return None;
        }
        let size = variant.target_size();
        let rect = overlay_rect(self.source.as_ref(), prefix, size, self.overlay_pos);
        let position = PixelPoint::new(rect.x, rect.y);
        let key = overlay_key(position, variant.borders(), size, prefix, identity);
        if let Some(pixmap) = self.cache_lookup(&key, size) {
            return Some((OverlayLayer { pixmap, position }, false));
        }

        let alpha = self
            .mask_background(prefix)
            .unwrap_or_else(|| base.clone());
        render_overlay(self.source.as_ref(), prefix, size, &alpha, self.overlay_pos)
            .map(|layer| (layer, true))
    }

    /// Buffer backing the silhouette of `prefix`.
    fn alpha_source(&mut self, prefix: &str) -> Option<Pixmap> {
        match self.mask_background(prefix) {
            Some(mask) => Some(mask),
            None => self.ensure_background(prefix),
        }
    }

    /// Composite of the `mask-` variant of `prefix`, synced to its borders and size.
    ///
    /// `None` when the theme has no mask elements for `prefix`.
    fn mask_background(&mut self, prefix: &str) -> Option<Pixmap> {
        if prefix.starts_with(MASK_PREFIX) {
            return None;
        }
        let mask_prefix = format!("{MASK_PREFIX}{prefix}");
        if !self.source.has_element(&format!("{mask_prefix}center")) {
            return None;
        }

        let source = self.source.as_ref();
        self.store.ensure_derived(&mask_prefix, prefix, source);
        let (borders, size) = {
            let base = self.store.get(prefix)?;
            (base.borders(), base.target_size())
        };
        let mask = self.store.get_mut(&mask_prefix)?;
        mask.set_borders(source, &mask_prefix, borders);
        mask.set_target_size(size);

        self.ensure_background(&mask_prefix)
    }
}
