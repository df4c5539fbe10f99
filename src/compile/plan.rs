use crate::{
    foundation::core::{Canvas, Circle, Point},
    foundation::error::AvatarResult,
    params::model::{Design, Palette, RenderParams, Shape},
};

/// Caption font size as a fraction of the canvas side.
pub const TEXT_SIZE_FRAC: f64 = 0.2;
/// Caption outline stroke width as a fraction of the canvas side.
pub const TEXT_OUTLINE_FRAC: f64 = 0.008;
/// Caption fill: white at 95% alpha (straight RGBA8).
pub const TEXT_FILL_RGBA: [u8; 4] = [255, 255, 255, 242];
/// Caption outline: black at 50% alpha (straight RGBA8).
pub const TEXT_OUTLINE_RGBA: [u8; 4] = [0, 0, 0, 128];

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic, ordered description of a single avatar render.
///
/// The pass order is the compositing order. Clip decisions are made here, before anything is
/// drawn, so backends never need to undo earlier work.
pub struct RenderPlan {
    /// Target canvas.
    pub canvas: Canvas,
    /// Passes in execution order.
    pub passes: Vec<Pass>,
}

#[derive(Clone, Debug, PartialEq)]
/// A single step in a [`RenderPlan`].
pub enum Pass {
    /// Restrict subsequent drawing to a region until the matching [`Pass::PopClip`].
    PushClip(ClipShape),
    /// Draw a background variant.
    Background(BackgroundPass),
    /// Release the innermost clip.
    PopClip,
    /// Composite the outlined caption.
    Text(TextPass),
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Clip geometry.
pub enum ClipShape {
    /// Circular clip.
    Circle(Circle),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Background variant plus the colors it reads.
pub struct BackgroundPass {
    /// Variant to draw.
    pub design: Design,
    /// User colors.
    pub palette: Palette,
}

#[derive(Clone, Debug, PartialEq)]
/// Centered caption with an outline stroke under a solid fill.
pub struct TextPass {
    /// Caption text, never empty.
    pub text: String,
    /// Layout box center.
    pub center: Point,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Outline stroke width in pixels.
    pub outline_width_px: f64,
    /// Outline color (straight RGBA8), drawn first.
    pub outline_rgba: [u8; 4],
    /// Fill color (straight RGBA8), drawn over the outline.
    pub fill_rgba: [u8; 4],
}

/// Compile validated params into a [`RenderPlan`] for the fixed avatar canvas.
#[tracing::instrument(level = "debug")]
pub fn compile_plan(params: &RenderParams) -> AvatarResult<RenderPlan> {
    params.validate()?;

    let canvas = Canvas::AVATAR;
    let side = canvas.side();
    let mut passes = Vec::with_capacity(4);

    let clip = match params.shape {
        Shape::Circle => Some(ClipShape::Circle(Circle::new(canvas.center(), side / 2.0))),
        Shape::Square => None,
    };

    if let Some(clip) = clip {
        passes.push(Pass::PushClip(clip));
    }
    passes.push(Pass::Background(BackgroundPass {
        design: params.design,
        palette: params.palette(),
    }));
    if clip.is_some() {
        passes.push(Pass::PopClip);
    }

    if params.has_text() {
        passes.push(Pass::Text(TextPass {
            text: params.text.clone(),
            center: canvas.center(),
            font_size_px: (side * TEXT_SIZE_FRAC) as f32,
            outline_width_px: side * TEXT_OUTLINE_FRAC,
            outline_rgba: TEXT_OUTLINE_RGBA,
            fill_rgba: TEXT_FILL_RGBA,
        }));
    }

    Ok(RenderPlan { canvas, passes })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
