use super::*;

#[test]
fn from_size_rounds_and_rejects_degenerate() {
    assert_eq!(
        PixelSize::from_size(Size::new(10.4, 20.6)),
        Some(PixelSize::new(10, 21))
    );
    assert_eq!(PixelSize::from_size(Size::new(0.0, 10.0)), None);
    assert_eq!(PixelSize::from_size(Size::new(10.0, -1.0)), None);
    assert_eq!(PixelSize::from_size(Size::new(f64::NAN, 10.0)), None);
    assert_eq!(PixelSize::from_size(Size::new(0.3, 10.0)), None);
}

#[test]
fn rect_intersection_and_emptiness() {
    let a = PixelRect::new(0, 0, 10, 10);
    let b = PixelRect::new(5, 5, 10, 10);
    assert_eq!(a.intersect(b), PixelRect::new(5, 5, 5, 5));

    let c = PixelRect::new(20, 20, 4, 4);
    assert!(a.intersect(c).is_empty());
    assert_eq!(PixelRect::new(0, 0, -3, 4).size(), PixelSize::ZERO);
}

#[test]
fn rect_from_real_rect_normalizes() {
    let r = PixelRect::from_rect(Rect::new(10.0, 8.0, 2.0, 2.0));
    assert_eq!(r, PixelRect::new(2, 2, 8, 6));
}
