use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::whole(60).unwrap();
    assert!((fps.frame_duration_secs() - 1.0 / 60.0).abs() < 1e-12);
}

#[test]
fn canvas_center_and_rgb_len() {
    let c = Canvas {
        width: 800,
        height: 450,
    };
    assert_eq!(c.center(), Point::new(400.0, 225.0));
    assert_eq!(c.rgb_len(), 800 * 450 * 3);
    assert_eq!(c.to_u16().unwrap(), (800, 450));
    assert!(
        Canvas {
            width: 70_000,
            height: 1
        }
        .to_u16()
        .is_err()
    );
}

#[test]
fn rgb8_hex_parses_with_and_without_hash() {
    assert_eq!(Rgb8::parse_hex("#33e32c").unwrap(), Rgb8::new(51, 227, 44));
    assert_eq!(Rgb8::parse_hex("f5fff5").unwrap(), Rgb8::new(245, 255, 245));
    assert!(Rgb8::parse_hex("#12345").is_err());
    assert!(Rgb8::parse_hex("#zzzzzz").is_err());
    assert_eq!(Rgb8::new(51, 227, 44).to_hex(), "#33e32c");
}

#[test]
fn rgb8_serde_accepts_hex_and_array() {
    let a: Rgb8 = serde_json::from_str("\"#000000\"").unwrap();
    let b: Rgb8 = serde_json::from_str("[51, 227, 44]").unwrap();
    assert_eq!(a, Rgb8::new(0, 0, 0));
    assert_eq!(b, Rgb8::new(51, 227, 44));
    assert_eq!(serde_json::to_string(&b).unwrap(), "\"#33e32c\"");
}
