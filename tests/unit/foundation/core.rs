use super::*;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(Rgb8::parse_hex("#FF006E").unwrap(), Rgb8::new(255, 0, 110));
    assert_eq!(Rgb8::parse_hex("8338ec").unwrap(), Rgb8::new(131, 56, 236));
    assert_eq!(" #3A86FF ".parse::<Rgb8>().unwrap(), Rgb8::new(58, 134, 255));
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "#fff", "#12345", "#1234567", "#gg0000", "#ff00é0"] {
        let err = Rgb8::parse_hex(bad).unwrap_err();
        assert!(
            matches!(err, AvatarError::Validation(_)),
            "{bad:?} -> {err}"
        );
    }
}

#[test]
fn hex_serializes_lowercase() {
    let c = Rgb8::new(0xFF, 0x00, 0x6E);
    assert_eq!(c.to_hex(), "#ff006e");
    assert_eq!(serde_json::to_value(c).unwrap(), serde_json::json!("#ff006e"));

    let back: Rgb8 = serde_json::from_value(serde_json::json!("#FF006E")).unwrap();
    assert_eq!(back, c);
}

#[test]
fn avatar_canvas_is_square() {
    let c = Canvas::AVATAR;
    assert_eq!(c.width, c.height);
    assert_eq!(c.width, CANVAS_SIZE);
    assert_eq!(c.center(), Point::new(500.0, 500.0));
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 1000.0, 1000.0));
}
