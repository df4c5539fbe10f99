use super::*;
use crate::render::backend::RenderSettings;
use crate::text::font::resolve_font;

#[test]
fn garbage_bytes_register_no_family() {
    let mut engine = TextLayoutEngine::new();
    let err = engine.register_font(b"definitely not a font", 0).unwrap_err();
    assert!(matches!(err, AvatarError::Font(_)));
}

#[test]
fn non_positive_sizes_are_rejected() {
    let mut engine = TextLayoutEngine::new();
    for size in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        let err = engine.layout_line("EDIT", "sans-serif", size).unwrap_err();
        assert!(matches!(err, AvatarError::Validation(_)), "{size}");
    }
}

#[test]
fn single_line_layout_with_system_font() {
    let Ok(font) = resolve_font(&RenderSettings::default()) else {
        eprintln!("skipping: no usable font on this system");
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let family = engine.register_font(&font.bytes, font.index).unwrap();

    let line = engine.layout_line("EDIT", &family, 200.0).unwrap();
    assert!(line.width > 0.0);
    assert!(line.height > 0.0);
    let glyphs: usize = line.runs.iter().map(|r| r.glyphs.len()).sum();
    assert!(glyphs > 0);
    assert!(line.runs.iter().all(|r| r.font_size == 200.0));

    let wider = engine.layout_line("EDITEDITED", &family, 200.0).unwrap();
    assert!(wider.width > line.width);
}

#[test]
fn runs_carry_the_face_they_were_shaped_with() {
    let Ok(font) = resolve_font(&RenderSettings::default()) else {
        eprintln!("skipping: no usable font on this system");
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let family = engine.register_font(&font.bytes, font.index).unwrap();

    let line = engine.layout_line("EDIT", &family, 120.0).unwrap();
    assert!(!line.runs.is_empty());
    for run in &line.runs {
        // Only registered bytes are visible to the shaper, so every run draws from them.
        assert_eq!(run.font_blob.data(), font.bytes.as_slice());
        assert_eq!(run.font_size, 120.0);
        if let Some(deg) = run.skew_deg {
            assert!(deg.is_finite());
        }
    }
}
