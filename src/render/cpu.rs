use std::collections::HashMap;

use kurbo::Shape as _;

use crate::{
    compile::plan::{BackgroundPass, ClipShape, TextPass},
    foundation::core::{Affine, BezPath, Canvas, Rect},
    foundation::error::{AvatarError, AvatarResult},
    foundation::math::unpremultiply_rgba8_in_place,
    foundation::rng::RandomSource,
    render::backend::{RasterImage, RenderSettings},
    render::designs,
    render::passes::PassBackend,
    text::font::resolve_font,
    text::layout::{ShapedRun, TextLayoutEngine},
};

const CLIP_TOLERANCE: f64 = 0.1;
/// Extra stroke applied to faces the shaper wants synthetically emboldened, as a fraction of the
/// font size.
pub(crate) const EMBOLDEN_FRAC: f64 = 0.02;

/// CPU raster backend built on `vello_cpu`.
///
/// The render context and the caption font are kept between renders; everything else is drawn
/// fresh on each [`PassBackend::begin`].
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    canvas: Option<Canvas>,
    family: Option<String>,
    faces: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    text_engine: TextLayoutEngine,
}

impl CpuBackend {
    /// Create a backend; fonts are not touched until a caption is drawn.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            canvas: None,
            family: None,
            faces: HashMap::new(),
            text_engine: TextLayoutEngine::new(),
        }
    }

    fn ctx_mut(&mut self) -> AvatarResult<(&mut vello_cpu::RenderContext, Canvas)> {
        match (self.ctx.as_mut(), self.canvas) {
            (Some(ctx), Some(canvas)) => Ok((ctx, canvas)),
            _ => Err(AvatarError::render("cpu backend used before begin()")),
        }
    }

    fn ensure_family(&mut self) -> AvatarResult<String> {
        if let Some(family) = &self.family {
            return Ok(family.clone());
        }
        let loaded = resolve_font(&self.settings)?;
        let family = self.text_engine.register_font(&loaded.bytes, loaded.index)?;
        tracing::debug!(family = %family, index = loaded.index, "registered caption font");
        self.family = Some(family.clone());
        Ok(family)
    }

    /// `vello_cpu` handle for the face a run was shaped with, built once per face.
    fn face_for(&mut self, run: &ShapedRun) -> vello_cpu::peniko::FontData {
        self.faces
            .entry((run.font_blob.id(), run.font_index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(run.font_blob.data().to_vec()),
                    run.font_index,
                )
            })
            .clone()
    }
}

impl PassBackend for CpuBackend {
    fn begin(&mut self, canvas: Canvas) -> AvatarResult<()> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| AvatarError::render("canvas width exceeds u16"))?;
        let height = u16::try_from(canvas.height)
            .map_err(|_| AvatarError::render("canvas height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        self.ctx = Some(ctx);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn push_clip(&mut self, clip: &ClipShape) -> AvatarResult<()> {
        let (ctx, _) = self.ctx_mut()?;
        let path = match clip {
            ClipShape::Circle(c) => c.to_path(CLIP_TOLERANCE),
        };
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&bezpath_to_cpu(&path));
        Ok(())
    }

    fn pop_clip(&mut self) -> AvatarResult<()> {
        let (ctx, _) = self.ctx_mut()?;
        ctx.pop_layer();
        Ok(())
    }

    fn draw_background(
        &mut self,
        pass: &BackgroundPass,
        rng: &mut dyn RandomSource,
    ) -> AvatarResult<()> {
        let (ctx, canvas) = self.ctx_mut()?;
        designs::draw_background(ctx, canvas, pass, rng);
        Ok(())
    }

    fn draw_text(&mut self, pass: &TextPass) -> AvatarResult<()> {
        let family = self.ensure_family()?;
        let line = self
            .text_engine
            .layout_line(&pass.text, &family, pass.font_size_px)?;
        let runs: Vec<(vello_cpu::peniko::FontData, &ShapedRun)> = line
            .runs
            .iter()
            .map(|run| (self.face_for(run), run))
            .collect();

        let origin = Affine::translate((
            pass.center.x - line.width / 2.0,
            pass.center.y - line.height / 2.0,
        ));

        let (ctx, _) = self.ctx_mut()?;
        ctx.set_transform(affine_to_cpu(origin));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(designs::rgba(pass.outline_rgba));
        for (font, run) in &runs {
            let width = pass.outline_width_px + embolden_width(run);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
            draw_glyphs(ctx, font, run, GlyphMode::Stroke);
        }

        ctx.set_paint(designs::rgba(pass.fill_rgba));
        for (font, run) in &runs {
            draw_glyphs(ctx, font, run, GlyphMode::Fill);
            if run.embolden {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(embolden_width(run)));
                draw_glyphs(ctx, font, run, GlyphMode::Stroke);
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn finish(&mut self) -> AvatarResult<RasterImage> {
        let (ctx, canvas) = self.ctx_mut()?;
        let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut data);
        RasterImage::from_straight_rgba8(canvas.width, canvas.height, data)
    }
}

#[derive(Clone, Copy)]
enum GlyphMode {
    Fill,
    Stroke,
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    run: &ShapedRun,
    mode: GlyphMode,
) {
    let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
        id: g.id,
        x: g.x,
        y: g.y,
    });
    let builder = ctx
        .glyph_run(font)
        .font_size(run.font_size)
        .glyph_transform(skew_transform(run.skew_deg));
    match mode {
        GlyphMode::Fill => builder.fill_glyphs(glyphs),
        GlyphMode::Stroke => builder.stroke_glyphs(glyphs),
    }
}

/// Per-glyph shear for synthetic italics; identity when the face needs none.
pub(crate) fn skew_transform(skew_deg: Option<f32>) -> vello_cpu::kurbo::Affine {
    match skew_deg {
        Some(deg) => vello_cpu::kurbo::Affine::skew(f64::from(deg).to_radians().tan(), 0.0),
        None => vello_cpu::kurbo::Affine::IDENTITY,
    }
}

pub(crate) fn embolden_width(run: &ShapedRun) -> f64 {
    if run.embolden {
        f64::from(run.font_size) * EMBOLDEN_FRAC
    } else {
        0.0
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
