use super::*;

#[test]
fn missing_font_file_reports_path() {
    let settings = RenderSettings {
        font_path: Some(PathBuf::from("does/not/exist/Bold.ttf")),
        ..RenderSettings::default()
    };
    let err = resolve_font(&settings).unwrap_err();
    assert!(matches!(err, AvatarError::Other(_)));
    assert!(err.to_string().contains("does/not/exist/Bold.ttf"));
}

#[test]
fn unreadable_font_dirs_are_skipped() {
    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, Path::new("does/not/exist"));
    assert_eq!(db.faces().count(), 0);
    assert!(query_caption_face(&db).is_none());
}

#[test]
fn non_font_files_are_ignored() {
    let dir = PathBuf::from("target").join("font_dir_filter");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("notes.txt"), b"not a font").unwrap();

    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, &dir);
    assert_eq!(db.faces().count(), 0);
}

#[test]
fn explicit_font_file_is_loaded_verbatim_at_face_zero() {
    let dir = PathBuf::from("target").join("font_explicit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("Caption.ttf");
    std::fs::write(&path, b"font bytes").unwrap();

    let loaded = resolve_font(&RenderSettings {
        font_path: Some(path),
        ..RenderSettings::default()
    })
    .unwrap();
    assert_eq!(loaded.bytes, b"font bytes");
    assert_eq!(loaded.index, 0);
}
