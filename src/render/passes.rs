use crate::{
    compile::plan::{BackgroundPass, ClipShape, Pass, RenderPlan, TextPass},
    foundation::core::Canvas,
    foundation::error::{AvatarError, AvatarResult},
    foundation::rng::RandomSource,
    render::backend::RasterImage,
};

/// Executes the individual passes of a [`RenderPlan`].
///
/// Most callers go through [`crate::Renderer`] or [`crate::render`] instead of driving a backend
/// directly.
pub trait PassBackend {
    /// Start a fresh, fully transparent target of the given size.
    fn begin(&mut self, canvas: Canvas) -> AvatarResult<()>;

    /// Restrict subsequent drawing to `clip`.
    fn push_clip(&mut self, clip: &ClipShape) -> AvatarResult<()>;

    /// Release the innermost clip.
    fn pop_clip(&mut self) -> AvatarResult<()>;

    /// Draw a background variant, drawing random samples from `rng` where the variant needs them.
    fn draw_background(
        &mut self,
        pass: &BackgroundPass,
        rng: &mut dyn RandomSource,
    ) -> AvatarResult<()>;

    /// Composite a caption.
    fn draw_text(&mut self, pass: &TextPass) -> AvatarResult<()>;

    /// Rasterize everything drawn since [`PassBackend::begin`] and read it back.
    fn finish(&mut self) -> AvatarResult<RasterImage>;
}

/// Run every pass of `plan` on `backend` in order and return the finished image.
pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &RenderPlan,
    rng: &mut dyn RandomSource,
) -> AvatarResult<RasterImage> {
    backend.begin(plan.canvas)?;

    let mut clip_depth = 0usize;
    for pass in &plan.passes {
        match pass {
            Pass::PushClip(clip) => {
                backend.push_clip(clip)?;
                clip_depth += 1;
            }
            Pass::Background(p) => backend.draw_background(p, rng)?,
            Pass::PopClip => {
                clip_depth = clip_depth
                    .checked_sub(1)
                    .ok_or_else(|| AvatarError::render("PopClip without a matching PushClip"))?;
                backend.pop_clip()?;
            }
            Pass::Text(p) => backend.draw_text(p)?,
        }
    }
    if clip_depth != 0 {
        return Err(AvatarError::render("render plan left a clip pushed"));
    }

    backend.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
