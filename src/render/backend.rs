use std::path::PathBuf;

use crate::{
    foundation::core::Canvas,
    foundation::error::{AvatarError, AvatarResult},
};

/// A rendered avatar as straight (non-premultiplied) RGBA8 pixels.
///
/// Owned and produced fresh by every render; always square at canvas size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap tightly packed, row-major straight RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, data: Vec<u8>) -> AvatarResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| AvatarError::validation("raster dimensions overflow"))?;
        if data.len() != expected {
            return Err(AvatarError::validation(format!(
                "raster byte length {} does not match {width}x{height} RGBA8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas this image covers.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw byte buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Renderer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Caption font file. Takes precedence over directory and system lookup.
    pub font_path: Option<PathBuf>,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` faces before system fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Fixed seed for randomized designs. `None` draws fresh entropy per render.
    pub glitch_seed: Option<u64>,
}
