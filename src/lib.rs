//! Avatar Forge renders stylized square profile pictures.
//!
//! A render takes a [`RenderParams`] (background design, three colors, optional short caption,
//! circle or square silhouette) and produces a fixed-size [`RasterImage`]:
//!
//! - [`compile_plan`] turns params into an ordered, backend-agnostic [`RenderPlan`]
//! - [`execute_plan`] runs the plan on a [`PassBackend`] (the `vello_cpu` [`CpuBackend`])
//! - [`export_png`] encodes the result losslessly, keeping transparent circle corners
//!
//! [`render`] and [`Renderer`] wrap the first two steps.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compile;
mod export;
mod foundation;
mod params;
mod render;
mod text;

pub use crate::foundation::core::{CANVAS_SIZE, Canvas, Circle, Point, Rect, Rgb8};
pub use crate::foundation::error::{AvatarError, AvatarResult};
pub use crate::foundation::rng::{RandomSource, SplitMix64};

pub use crate::params::model::{
    Design, MAX_TEXT_CHARS, Palette, RenderParams, RenderParamsDef, Shape,
};

pub use crate::compile::plan::{
    BackgroundPass, ClipShape, Pass, RenderPlan, TEXT_FILL_RGBA, TEXT_OUTLINE_FRAC,
    TEXT_OUTLINE_RGBA, TEXT_SIZE_FRAC, TextPass, compile_plan,
};

pub use crate::render::backend::{RasterImage, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::passes::{PassBackend, execute_plan};
pub use crate::render::pipeline::{Renderer, render, render_with_rng};

pub use crate::text::font::{LoadedFont, resolve_font};

pub use crate::export::png::{
    DEFAULT_FILENAME, PNG_MIME, decode_png, export_png, save_png, write_png,
};
