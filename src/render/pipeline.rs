use crate::{
    compile::plan::compile_plan,
    foundation::error::AvatarResult,
    foundation::rng::{RandomSource, SplitMix64},
    params::model::RenderParams,
    render::backend::{RasterImage, RenderSettings},
    render::cpu::CpuBackend,
    render::passes::execute_plan,
};

/// Reusable renderer: owns a CPU backend so repeated renders share its context and loaded font.
///
/// Each call to [`Renderer::render`] is independent; nothing drawn by one render leaks into
/// the next.
pub struct Renderer {
    backend: CpuBackend,
    settings: RenderSettings,
}

impl Renderer {
    /// Create a renderer. Fonts are resolved on the first caption, not here.
    pub fn new(settings: RenderSettings) -> AvatarResult<Self> {
        Ok(Self {
            backend: CpuBackend::new(settings.clone()),
            settings,
        })
    }

    /// Settings this renderer was created with.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `params`. Randomized designs use [`RenderSettings::glitch_seed`] when set and
    /// fresh entropy otherwise.
    pub fn render(&mut self, params: &RenderParams) -> AvatarResult<RasterImage> {
        let mut rng = match self.settings.glitch_seed {
            Some(seed) => SplitMix64::new(seed),
            None => SplitMix64::from_entropy(),
        };
        self.render_with_rng(params, &mut rng)
    }

    /// Render `params`, drawing every random sample from `rng`.
    #[tracing::instrument(level = "debug", skip(self, rng), fields(design = %params.design))]
    pub fn render_with_rng(
        &mut self,
        params: &RenderParams,
        rng: &mut dyn RandomSource,
    ) -> AvatarResult<RasterImage> {
        let plan = compile_plan(params)?;
        tracing::debug!(passes = plan.passes.len(), "compiled render plan");
        execute_plan(&mut self.backend, &plan, rng)
    }
}

/// Render one avatar with default settings.
///
/// Deterministic designs produce identical pixels for identical params. The glitch design draws
/// fresh entropy on every call; use [`render_with_rng`] to pin it.
pub fn render(params: &RenderParams) -> AvatarResult<RasterImage> {
    Renderer::new(RenderSettings::default())?.render(params)
}

/// Render one avatar with default settings and an injected random source.
pub fn render_with_rng(
    params: &RenderParams,
    rng: &mut dyn RandomSource,
) -> AvatarResult<RasterImage> {
    Renderer::new(RenderSettings::default())?.render_with_rng(params, rng)
}
