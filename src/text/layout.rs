use crate::foundation::error::{AvatarError, AvatarResult};

/// Shaped glyphs sharing one face and size, positioned relative to the layout origin.
///
/// Carries the face the shaper actually picked plus the synthesis it expects, so drawing never
/// pairs glyph ids with a different face.
#[derive(Clone, Debug)]
pub(crate) struct ShapedRun {
    pub(crate) font_blob: parley::fontique::Blob<u8>,
    pub(crate) font_index: u32,
    pub(crate) font_size: f32,
    pub(crate) embolden: bool,
    pub(crate) skew_deg: Option<f32>,
    pub(crate) glyphs: Vec<ShapedGlyph>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// A laid-out single line of caption text.
#[derive(Clone, Debug)]
pub(crate) struct ShapedLine {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) runs: Vec<ShapedRun>,
}

/// Text shaping and layout engine used by the caption pass.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the family name of the face at `index`.
    ///
    /// Collections register every face, but layouts request the family the chosen face belongs
    /// to; the first family is used when no registered face reports `index`.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8], index: u32) -> AvatarResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| AvatarError::font("no font families registered from font bytes"))?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AvatarError::font("registered font family has no name"))?
            .to_string())
    }

    /// Shape `text` as one bold, unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
    ) -> AvatarResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AvatarError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font = run.run().font();
                let synthesis = run.run().synthesis();
                runs.push(ShapedRun {
                    font_blob: font.data.clone(),
                    font_index: font.index,
                    font_size: run.run().font_size(),
                    embolden: synthesis.embolden(),
                    skew_deg: synthesis.skew(),
                    glyphs: run
                        .positioned_glyphs()
                        .map(|g| ShapedGlyph {
                            id: u32::from(g.id),
                            x: g.x,
                            y: g.y,
                        })
                        .collect(),
                });
            }
        }

        Ok(ShapedLine {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            runs,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
