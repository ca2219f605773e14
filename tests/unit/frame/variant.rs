use super::*;
use crate::foundation::core::PixelSize;
use crate::source::solid::SolidElementSource;

const OPAQUE: [u8; 4] = [0, 0, 0, 255];

fn bordered() -> SolidElementSource {
    SolidElementSource::new("theme")
        .with_element("center", PixelSize::new(10, 10), OPAQUE)
        .with_element("top", PixelSize::new(10, 3), OPAQUE)
}

#[test]
fn resize_drops_buffers_but_keeps_metrics() {
    let src = bordered();
    let mut v = FrameVariant::new(&src, "", EnabledBorders::all(), PixelSize::new(20, 20));
    v.cached_base = Some(Pixmap::new(PixelSize::new(20, 20)));
    v.cached_background = Some(Pixmap::new(PixelSize::new(20, 20)));

    // Metrics are only resolved again on refresh, never on resize.
    src.insert("top", PixelSize::new(10, 7), OPAQUE);
    assert!(v.set_target_size(PixelSize::new(40, 20)));
    assert_eq!(v.metrics().top_height, 3);
    assert!(v.cached_base().is_none());
    assert!(v.cached_background().is_none());

    assert!(!v.set_target_size(PixelSize::new(40, 20)));

    v.refresh(&src, "");
    assert_eq!(v.metrics().top_height, 7);
}

#[test]
fn overlay_invalidation_keeps_base() {
    let src = bordered();
    let mut v = FrameVariant::new(&src, "", EnabledBorders::all(), PixelSize::new(4, 4));
    v.cached_base = Some(Pixmap::new(PixelSize::new(4, 4)));
    v.cached_background = Some(Pixmap::new(PixelSize::new(4, 4)));

    v.invalidate_overlay();
    assert!(v.cached_base().is_some());
    assert!(v.cached_background().is_none());

    v.invalidate();
    assert!(v.cached_base().is_none());
}

#[test]
fn border_change_resolves_metrics() {
    let src = bordered();
    let mut v = FrameVariant::new(&src, "", EnabledBorders::all(), PixelSize::new(4, 4));
    assert!(v.set_borders(&src, "", EnabledBorders::LEFT));
    assert_eq!(v.metrics().top_height, 0);
    assert!(!v.set_borders(&src, "", EnabledBorders::LEFT));
}
