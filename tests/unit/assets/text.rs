use super::*;

fn engine() -> Option<TextLayoutEngine> {
    let font = crate::assets::font::system_sans_serif()?;
    TextLayoutEngine::new(font.bytes.as_slice()).ok()
}

#[test]
fn garbage_bytes_register_no_family() {
    assert!(TextLayoutEngine::new(b"not a font").is_err());
}

#[test]
fn shaping_reports_family_and_extent() {
    let Some(mut engine) = engine() else {
        return;
    };
    assert!(!engine.family_name().trim().is_empty());

    let one = engine.shape("A", 40.0).unwrap();
    let two = engine.shape("AA", 40.0).unwrap();
    assert!(one.width > 0.0);
    assert!(one.height > 0.0);
    assert!(two.width > one.width);
    assert_eq!(one.glyphs.len(), 1);
}

#[test]
fn trailing_space_counts_toward_width() {
    let Some(mut engine) = engine() else {
        return;
    };
    let a = engine.shape("A", 40.0).unwrap();
    let a_space = engine.shape("A ", 40.0).unwrap();
    assert!(a_space.width > a.width);
}

#[test]
fn invalid_size_is_rejected() {
    let Some(mut engine) = engine() else {
        return;
    };
    assert!(engine.shape("A", 0.0).is_err());
    assert!(engine.shape("A", f32::NAN).is_err());
}
