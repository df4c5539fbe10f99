use super::*;

fn avatar_with_transparent_corner() -> RasterImage {
    let n = CANVAS_SIZE as usize;
    let mut data = vec![0u8; n * n * 4];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        if i == 0 {
            continue;
        }
        px.copy_from_slice(&[(i % 251) as u8, 40, 200, 255]);
    }
    RasterImage::from_straight_rgba8(CANVAS_SIZE, CANVAS_SIZE, data).unwrap()
}

#[test]
fn png_bytes_start_with_signature() {
    let bytes = export_png(&avatar_with_transparent_corner()).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn decode_preserves_pixels_and_alpha() {
    let img = avatar_with_transparent_corner();
    let decoded = decode_png(&export_png(&img).unwrap()).unwrap();
    assert_eq!(decoded.pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(decoded, img);
}

#[test]
fn garbage_is_an_encoding_error() {
    let err = decode_png(b"not a png").unwrap_err();
    assert!(matches!(err, AvatarError::Encoding(_)));
}

#[test]
fn wrong_size_png_is_rejected() {
    let small = RasterImage::from_straight_rgba8(4, 4, vec![255; 64]).unwrap();
    let bytes = export_png(&small).unwrap();
    let err = decode_png(&bytes).unwrap_err();
    assert!(matches!(err, AvatarError::Validation(_)));
}

#[test]
fn save_creates_parent_dirs() {
    let path = std::path::PathBuf::from("target")
        .join("png_save_test")
        .join("nested")
        .join(DEFAULT_FILENAME);
    let _ = std::fs::remove_file(&path);
    save_png(&avatar_with_transparent_corner(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(decode_png(&bytes).unwrap().pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn write_png_stores_bytes_verbatim() {
    let path = std::path::PathBuf::from("target")
        .join("png_write_test")
        .join("deeper")
        .join("raw.png");
    let _ = std::fs::remove_file(&path);
    let bytes = export_png(&avatar_with_transparent_corner()).unwrap();
    write_png(&bytes, &path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
