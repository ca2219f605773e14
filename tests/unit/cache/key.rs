use super::*;

#[test]
fn background_key_layout_is_stable() {
    let key = background_key(
        EnabledBorders::all(),
        PixelSize::new(30, 20),
        "hover-",
        "theme",
    );
    assert_eq!(key, "15_20_30_hover-_theme_");

    let key = background_key(
        EnabledBorders::TOP | EnabledBorders::LEFT,
        PixelSize::new(8, 4),
        "",
        "/usr/share/themes/panel.svg",
    );
    assert_eq!(key, "5_4_8__/usr/share/themes/panel.svg_");
}

#[test]
fn overlay_key_layout_is_stable() {
    let key = overlay_key(
        PixelPoint::new(3, 7),
        EnabledBorders::all(),
        PixelSize::new(30, 20),
        "",
        "theme",
    );
    assert_eq!(key, "overlay_7_3_15_20_30__theme_");
}

#[test]
fn keys_differ_per_input() {
    let base = background_key(EnabledBorders::all(), PixelSize::new(10, 10), "", "a");
    assert_ne!(
        base,
        background_key(EnabledBorders::TOP, PixelSize::new(10, 10), "", "a")
    );
    assert_ne!(
        base,
        background_key(EnabledBorders::all(), PixelSize::new(10, 11), "", "a")
    );
    assert_ne!(
        base,
        background_key(EnabledBorders::all(), PixelSize::new(10, 10), "x-", "a")
    );
    assert_ne!(
        base,
        background_key(EnabledBorders::all(), PixelSize::new(10, 10), "", "b")
    );
}
