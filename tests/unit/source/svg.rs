use super::*;

const THEME: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30">
  <rect id="center" x="10" y="10" width="20" height="10" fill="#ff0000"/>
  <rect id="top" x="10" y="0" width="20" height="10" fill="#00ff00"/>
  <rect id="topleft" x="0" y="0" width="10" height="10" fill="#0000ff"/>
</svg>"##;

fn theme() -> SvgElementSource {
    SvgElementSource::from_data(THEME.as_bytes(), "inline:theme").unwrap()
}

#[test]
fn parse_ok_and_err() {
    assert!(SvgElementSource::from_data(b"<svg", "bad").is_err());
    assert_eq!(theme().document_size(), PixelSize::new(40, 30));
}

#[test]
fn element_lookup_and_natural_size() {
    let src = theme();
    assert!(src.has_element("center"));
    assert!(!src.has_element("bottom"));
    assert!(!src.has_element(""));
    assert_eq!(src.element_size("center"), PixelSize::new(20, 10));
    assert_eq!(src.element_size("topleft"), PixelSize::new(10, 10));
    assert_eq!(src.element_size("bottom"), PixelSize::ZERO);
    assert_eq!(src.source_identity(), "inline:theme");
}

#[test]
fn render_stretches_to_requested_size() {
    let src = theme();
    let px = src.render("topleft", PixelSize::new(16, 16)).unwrap();
    assert_eq!(px.size(), PixelSize::new(16, 16));

    let mid = px.pixel(8, 8).unwrap();
    assert_eq!(mid[3], 255);
    assert!(mid[2] > 200);
    assert!(mid[0] < 50);
}

#[test]
fn render_absent_or_empty_is_none() {
    let src = theme();
    assert!(src.render("bottom", PixelSize::new(4, 4)).is_none());
    assert!(src.render("center", PixelSize::ZERO).is_none());
}
