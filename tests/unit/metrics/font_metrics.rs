use super::*;
use crate::assets::font::{FontOrigin, OutlineFont};

#[test]
fn block_face_is_monospaced() {
    let mut m = FontMetrics::new(FontFace::Blocks, 40.0);
    assert_eq!(m.width(""), 0.0);
    assert_eq!(m.width("A"), 24.0);
    assert_eq!(m.width("A B"), 72.0);
    assert_eq!(m.glyph_height('W'), 40.0);

    let shaped = m.shape("A B");
    assert_eq!(shaped.glyphs.len(), 2);
    assert_eq!(shaped.glyphs[1].x, 48.0);
    assert_eq!(shaped.glyphs[0].y, 32.0);
}

#[test]
fn unusable_outline_degrades_to_blocks() {
    let bogus = FontFace::Outline(OutlineFont {
        origin: FontOrigin::File("bogus.ttf".into()),
        bytes: Arc::new(b"not a font".to_vec()),
        index: 0,
    });
    let mut m = FontMetrics::new(bogus, 20.0);
    assert!(matches!(m.face(), FontFace::Blocks));
    assert_eq!(m.width("AB"), 24.0);
}

#[test]
fn shaped_strings_are_cached() {
    let mut m = FontMetrics::new(FontFace::Blocks, 10.0);
    let a = m.shape("cache");
    let b = m.shape("cache");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn outline_widths_grow_with_prefix() {
    let Some(font) = crate::assets::font::system_sans_serif() else {
        return;
    };
    let mut m = FontMetrics::new(FontFace::Outline(font), 40.0);
    if !matches!(m.face(), FontFace::Outline(_)) {
        return;
    }
    let w1 = m.width("D");
    let w2 = m.width("DE");
    let w3 = m.width("DEC");
    assert!(w1 > 0.0 && w2 > w1 && w3 > w2);
    assert!(m.glyph_height('D') > 0.0);
}
