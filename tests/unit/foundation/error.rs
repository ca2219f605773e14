use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThemeFrameError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ThemeFrameError::source("x")
            .to_string()
            .contains("element source error:")
    );
    assert!(
        ThemeFrameError::cache("x")
            .to_string()
            .contains("cache error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThemeFrameError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
