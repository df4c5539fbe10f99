use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{AvatarError, AvatarResult},
    render::backend::RenderSettings,
};

const PREFERRED_FAMILIES: [&str; 4] = ["Arial", "Helvetica", "DejaVu Sans", "Liberation Sans"];

/// Font bytes selected for caption rendering.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Raw font file bytes (may be a collection).
    pub bytes: Vec<u8>,
    /// Face index within `bytes`.
    pub index: u32,
}

/// Resolve the caption font: explicit file, then configured directories, then system fonts.
///
/// Prefers a bold sans-serif face; falls back to any available face before giving up.
pub fn resolve_font(settings: &RenderSettings) -> AvatarResult<LoadedFont> {
    if let Some(path) = &settings.font_path {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "using configured font file");
        return Ok(LoadedFont { bytes, index: 0 });
    }

    let db = build_fontdb(&settings.font_dirs);
    let id = query_caption_face(&db)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| {
            AvatarError::font(format!(
                "no font faces found (searched {} configured dirs and system fonts)",
                settings.font_dirs.len()
            ))
        })?;

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| AvatarError::font("font face data is not readable"))?;

    tracing::debug!(family = %family, index, "resolved font");
    Ok(LoadedFont { bytes, index })
}

fn build_fontdb(dirs: &[PathBuf]) -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    for dir in dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    db.load_system_fonts();
    db
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "font dir not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

fn query_caption_face(db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
        .iter()
        .map(|name| usvg::fontdb::Family::Name(*name))
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    db.query(&usvg::fontdb::Query {
        families: &families,
        weight: usvg::fontdb::Weight::BOLD,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
