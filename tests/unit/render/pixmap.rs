use super::*;

const RED: PremulRgba8 = [255, 0, 0, 255];
const BLUE: PremulRgba8 = [0, 0, 255, 255];

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], RED), RED);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn from_premul_rejects_wrong_length() {
    assert!(Pixmap::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Pixmap::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn draw_source_replaces_and_clips() {
    let mut dst = Pixmap::solid(PixelSize::new(4, 4), BLUE);
    let src = Pixmap::solid(PixelSize::new(3, 3), [0, 0, 0, 0]);
    dst.draw_source(&src, PixelPoint::new(2, 2));

    // Replace mode writes transparent pixels through.
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(3, 3), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(1, 1), Some(BLUE));
}

#[test]
fn draw_source_negative_offset_is_clipped() {
    let mut dst = Pixmap::new(PixelSize::new(2, 2));
    let src = Pixmap::solid(PixelSize::new(2, 2), RED);
    dst.draw_source(&src, PixelPoint::new(-1, -1));
    assert_eq!(dst.pixel(0, 0), Some(RED));
    assert_eq!(dst.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn tiling_repeats_from_rect_origin() {
    let tile = Pixmap::from_premul_rgba8(2, 1, [RED, BLUE].concat()).unwrap();
    let mut dst = Pixmap::new(PixelSize::new(6, 1));
    dst.draw_source_tiled(&tile, PixelRect::new(1, 0, 5, 1));

    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(1, 0), Some(RED));
    assert_eq!(dst.pixel(2, 0), Some(BLUE));
    assert_eq!(dst.pixel(3, 0), Some(RED));
    assert_eq!(dst.pixel(5, 0), Some(RED));
}

#[test]
fn alpha_mask_zeroes_outside_silhouette() {
    let mut layer = Pixmap::solid(PixelSize::new(2, 1), RED);
    let mask = Pixmap::from_premul_rgba8(2, 1, [[0, 0, 0, 255], [0, 0, 0, 0]].concat()).unwrap();
    layer.apply_alpha_mask(&mask);
    assert_eq!(layer.pixel(0, 0), Some(RED));
    assert_eq!(layer.pixel(1, 0), Some([0, 0, 0, 0]));
}

#[test]
fn clones_share_until_written() {
    let a = Pixmap::solid(PixelSize::new(1, 1), RED);
    let mut b = a.clone();
    b.draw_source(&Pixmap::solid(PixelSize::new(1, 1), BLUE), PixelPoint::ZERO);
    assert_eq!(a.pixel(0, 0), Some(RED));
    assert_eq!(b.pixel(0, 0), Some(BLUE));
}

#[test]
fn scaled_keeps_opaque_color() {
    let src = Pixmap::solid(PixelSize::new(2, 2), RED);
    let out = src.scaled(PixelSize::new(5, 3));
    assert_eq!(out.size(), PixelSize::new(5, 3));
    assert_eq!(out.pixel(4, 2), Some(RED));
}

#[test]
fn straight_roundtrip_for_opaque_and_transparent() {
    let px = Pixmap::from_straight_rgba8(2, 1, vec![10, 20, 30, 255, 99, 99, 99, 0]).unwrap();
    assert_eq!(px.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(px.to_straight_rgba8(), vec![10, 20, 30, 255, 0, 0, 0, 0]);
}
