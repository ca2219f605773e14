use super::*;
use crate::source::solid::SolidElementSource;

const CENTER: [u8; 4] = [0, 0, 255, 255];
const EDGE: [u8; 4] = [0, 255, 0, 255];
const CORNER: [u8; 4] = [255, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn nine_slice() -> SolidElementSource {
    SolidElementSource::new("theme")
        .with_element("center", PixelSize::new(10, 10), CENTER)
        .with_element("top", PixelSize::new(10, 2), EDGE)
        .with_element("bottom", PixelSize::new(10, 2), EDGE)
        .with_element("left", PixelSize::new(3, 10), EDGE)
        .with_element("right", PixelSize::new(3, 10), EDGE)
        .with_element("topleft", PixelSize::new(3, 2), CORNER)
        .with_element("topright", PixelSize::new(3, 2), CORNER)
        .with_element("bottomleft", PixelSize::new(3, 2), CORNER)
        .with_element("bottomright", PixelSize::new(3, 2), CORNER)
}

fn variant(src: &SolidElementSource, borders: EnabledBorders, w: u32, h: u32) -> FrameVariant {
    FrameVariant::new(src, "", borders, PixelSize::new(w, h))
}

#[test]
fn empty_target_renders_nothing() {
    let src = nine_slice();
    let v = variant(&src, EnabledBorders::all(), 0, 0);
    assert!(composite_background(&src, "", &v, None).is_none());
    assert_eq!(src.render_count(), 0);
}

#[test]
fn full_frame_places_every_piece() {
    let src = nine_slice();
    let v = variant(&src, EnabledBorders::all(), 20, 10);
    let out = composite_background(&src, "", &v, None).unwrap();

    assert_eq!(out.size(), PixelSize::new(20, 10));
    assert_eq!(out.pixel(0, 0), Some(CORNER));
    assert_eq!(out.pixel(19, 0), Some(CORNER));
    assert_eq!(out.pixel(0, 9), Some(CORNER));
    assert_eq!(out.pixel(19, 9), Some(CORNER));
    assert_eq!(out.pixel(10, 0), Some(EDGE));
    assert_eq!(out.pixel(10, 9), Some(EDGE));
    assert_eq!(out.pixel(0, 5), Some(EDGE));
    assert_eq!(out.pixel(19, 5), Some(EDGE));
    assert_eq!(out.pixel(10, 5), Some(CENTER));
    assert_eq!(out.pixel(3, 2), Some(CENTER));
    assert_eq!(out.pixel(16, 7), Some(CENTER));
}

#[test]
fn disabled_borders_leave_no_trace() {
    let src = nine_slice();
    let v = variant(&src, EnabledBorders::TOP | EnabledBorders::LEFT, 20, 10);
    let out = composite_background(&src, "", &v, None).unwrap();

    assert_eq!(out.pixel(0, 0), Some(CORNER));
    // Top edge spans from the corner to the right edge of the frame.
    assert_eq!(out.pixel(3, 0), Some(EDGE));
    assert_eq!(out.pixel(19, 0), Some(EDGE));
    // Left edge spans from the corner to the bottom of the frame.
    assert_eq!(out.pixel(0, 2), Some(EDGE));
    assert_eq!(out.pixel(0, 9), Some(EDGE));
    // Center fills everything else.
    assert_eq!(out.pixel(19, 9), Some(CENTER));
    assert_eq!(out.pixel(3, 2), Some(CENTER));

    assert_eq!(src.render_count_for("topright"), 0);
    assert_eq!(src.render_count_for("bottomleft"), 0);
    assert_eq!(src.render_count_for("bottomright"), 0);
    assert_eq!(src.render_count_for("right"), 0);
    assert_eq!(src.render_count_for("bottom"), 0);
}

#[test]
fn edges_cover_corner_area_when_corner_missing() {
    let src = nine_slice();
    src.remove("topleft");
    let v = variant(&src, EnabledBorders::all(), 20, 10);
    let out = composite_background(&src, "", &v, None).unwrap();
    assert_eq!(out.pixel(0, 0), Some(EDGE));
    assert_eq!(out.pixel(19, 0), Some(CORNER));
}

#[test]
fn center_only_when_no_border_elements() {
    let src = SolidElementSource::new("plain").with_element("center", PixelSize::new(4, 4), CENTER);
    let v = variant(&src, EnabledBorders::all(), 7, 5);
    let out = composite_background(&src, "", &v, None).unwrap();
    assert!(out.data().chunks_exact(4).all(|px| px == CENTER));
    assert_eq!(src.render_count(), 1);
}

#[test]
fn frame_smaller_than_borders_skips_center() {
    let src = nine_slice();
    let v = variant(&src, EnabledBorders::all(), 5, 3);
    let out = composite_background(&src, "", &v, None).unwrap();
    assert_eq!(out.size(), PixelSize::new(5, 3));
    assert_eq!(src.render_count_for("center"), 0);
}

#[test]
fn tiled_edges_render_one_natural_tile() {
    let src = nine_slice();
    let v = variant(&src, EnabledBorders::all(), 40, 10);
    composite_background(&src, "", &v, None).unwrap();
    assert_eq!(src.render_count_for("top"), 1);

    src.insert("hint-stretch-borders", PixelSize::new(1, 1), CLEAR);
    src.reset_counts();
    let v = variant(&src, EnabledBorders::all(), 40, 10);
    assert!(v.metrics().stretch_borders);
    let out = composite_background(&src, "", &v, None).unwrap();
    assert_eq!(src.render_count_for("top"), 1);
    assert_eq!(out.pixel(20, 0), Some(EDGE));
}

#[test]
fn tiled_center_repeats_natural_tile() {
    let src = SolidElementSource::new("tiles")
        .with_element("center", PixelSize::new(2, 2), CENTER)
        .with_element("hint-tile-center", PixelSize::new(1, 1), CLEAR);
    let v = variant(&src, EnabledBorders::all(), 9, 9);
    assert!(v.metrics().tile_center);
    let out = composite_background(&src, "", &v, None).unwrap();
    assert_eq!(out.pixel(8, 8), Some(CENTER));
    assert_eq!(src.render_count_for("center"), 1);
}

#[test]
fn compose_over_border_clips_center_by_mask() {
    let src = nine_slice()
        .with_element("hint-compose-over-border", PixelSize::new(1, 1), CLEAR)
        .with_element("mask-center", PixelSize::new(10, 10), [0, 0, 0, 255]);
    let v = variant(&src, EnabledBorders::all(), 20, 10);
    assert!(v.metrics().compose_over_border);

    // Mask is opaque only on its left half.
    let mut mask = Pixmap::new(PixelSize::new(20, 10));
    mask.draw_source(
        &Pixmap::solid(PixelSize::new(10, 10), [0, 0, 0, 255]),
        PixelPoint::ZERO,
    );
    src.remove("top");
    src.remove("topleft");
    src.remove("topright");
    let v = variant(&src, EnabledBorders::all(), 20, 10);
    let out = composite_background(&src, "", &v, Some(&mask)).unwrap();

    assert_eq!(out.pixel(5, 0), Some(CENTER));
    assert_eq!(out.pixel(15, 0), Some(CLEAR));
}
