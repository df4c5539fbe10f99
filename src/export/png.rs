use std::path::Path;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::{
    foundation::core::CANVAS_SIZE,
    foundation::error::{AvatarError, AvatarResult},
    render::backend::RasterImage,
};

/// Suggested download filename for an exported avatar.
pub const DEFAULT_FILENAME: &str = "profile-picture.png";
/// Media type of exported bytes.
pub const PNG_MIME: &str = "image/png";

/// Encode a rendered avatar as lossless RGBA PNG bytes.
///
/// Transparent corners of circle avatars survive as alpha 0.
#[tracing::instrument(level = "debug", skip(image), fields(w = image.width(), h = image.height()))]
pub fn export_png(image: &RasterImage) -> AvatarResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            image.data(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| AvatarError::encoding(format!("png encode failed: {e}")))?;
    tracing::debug!(bytes = out.len(), "encoded png");
    Ok(out)
}

/// Decode PNG bytes produced by [`export_png`] back into a [`RasterImage`].
///
/// Rejects anything that is not a square avatar-sized image.
pub fn decode_png(bytes: &[u8]) -> AvatarResult<RasterImage> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| AvatarError::encoding(format!("png decode failed: {e}")))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    if width != height || width != CANVAS_SIZE {
        return Err(AvatarError::validation(format!(
            "expected a {CANVAS_SIZE}x{CANVAS_SIZE} avatar, got {width}x{height}"
        )));
    }
    RasterImage::from_straight_rgba8(width, height, img.into_raw())
}

/// Encode `image` and write it to `path`, creating parent directories.
pub fn save_png(image: &RasterImage, path: &Path) -> AvatarResult<()> {
    write_png(&export_png(image)?, path)
}

/// Write already-encoded PNG bytes to `path`, creating parent directories.
pub fn write_png(bytes: &[u8], path: &Path) -> AvatarResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
