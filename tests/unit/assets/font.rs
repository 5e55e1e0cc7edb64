use super::*;

#[test]
fn missing_font_file_never_errors() {
    let face = load_font(Some(Path::new("definitely/not/here/font.ttf")));
    match face {
        FontFace::Outline(f) => assert!(matches!(f.origin, FontOrigin::System(_))),
        FontFace::Blocks => {}
    }
}

#[test]
fn explicit_font_bytes_are_used_when_readable() {
    let Some(system) = system_sans_serif() else {
        return;
    };
    if system.index != 0 {
        return;
    }

    let tmp = std::env::temp_dir().join(format!("decodefx_font_test_{}.ttf", std::process::id()));
    std::fs::write(&tmp, system.bytes.as_slice()).unwrap();

    let face = load_font(Some(&tmp));
    let FontFace::Outline(f) = face else {
        panic!("expected outline font");
    };
    assert_eq!(f.origin, FontOrigin::File(tmp.clone()));
    assert_eq!(f.bytes.len(), system.bytes.len());

    std::fs::remove_file(&tmp).ok();
}

#[test]
fn describe_names_the_source() {
    assert_eq!(FontFace::Blocks.describe(), "built-in block face");
    let f = FontFace::Outline(OutlineFont {
        origin: FontOrigin::File(PathBuf::from("a.ttf")),
        bytes: Arc::new(Vec::new()),
        index: 0,
    });
    assert_eq!(f.describe(), "file 'a.ttf'");
}
