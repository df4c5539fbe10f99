use std::f64::consts::TAU;

use kurbo::Shape as _;
use vello_cpu::RenderContext;
use vello_cpu::kurbo::Stroke;
use vello_cpu::peniko::{Color, Gradient};

use crate::{
    compile::plan::BackgroundPass,
    foundation::core::{BezPath, Canvas, Circle, Point, Rect, Rgb8},
    foundation::rng::RandomSource,
    params::model::{Design, Palette},
    render::cpu::{bezpath_to_cpu, rect_to_cpu},
};

const PATH_TOLERANCE: f64 = 0.1;

const GEOMETRIC_GRID: u32 = 10;
const GEOMETRIC_LINE_FRAC: f64 = 0.008;
const GEOMETRIC_SHADE_RGBA: [[u8; 4]; 2] = [[0, 0, 0, 51], [0, 0, 0, 153]];

const RETRO_SKY: [Rgb8; 3] = [
    Rgb8::new(0x1a, 0x1a, 0x2e),
    Rgb8::new(0x16, 0x21, 0x3e),
    Rgb8::new(0x0f, 0x34, 0x60),
];
const RETRO_GRID_ROWS: u32 = 20;
const RETRO_GRID_WIDTH_FRAC: f64 = 0.002;
const RETRO_ROW_SPACING_FRAC: f64 = 0.04;
const RETRO_ROW_BEND_FRAC: f64 = 0.05;
const RETRO_RIPPLE_FRAC: f64 = 0.03;
const RETRO_PHASE_STEP: f64 = 0.3;
const RETRO_SAMPLES_PER_ROW: u32 = 50;
const RETRO_SUN_FRAC: f64 = 0.15;
const RETRO_RINGS: u32 = 8;
const RETRO_RING_STEP_FRAC: f64 = 0.02;
const RETRO_RING_WIDTH_FRAC: f64 = 0.008;

pub(crate) const GLITCH_RECT_COUNT: usize = 50;
pub(crate) const GLITCH_RECT_ALPHA: u8 = 0x40;
const GLITCH_GREEN: Rgb8 = Rgb8::new(0x00, 0xff, 0x00);
const GLITCH_MAGENTA: Rgb8 = Rgb8::new(0xff, 0x00, 0xff);
const GLITCH_MIN_W_FRAC: f64 = 0.05;
const GLITCH_SPAN_W_FRAC: f64 = 0.20;
const GLITCH_MIN_H_FRAC: f64 = 0.01;
const GLITCH_SPAN_H_FRAC: f64 = 0.05;
pub(crate) const SCAN_LINE_STEP_PX: f64 = 4.0;
const SCAN_LINE_WIDTH_FRAC: f64 = 0.002;
const SCAN_LINE_RGBA: [u8; 4] = [0, 255, 255, 26];

/// Draw the background variant for `pass` over the whole canvas. Clipping, if any, is already
/// in effect on `ctx`.
pub(crate) fn draw_background(
    ctx: &mut RenderContext,
    canvas: Canvas,
    pass: &BackgroundPass,
    rng: &mut dyn RandomSource,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match pass.design {
        Design::Gradient => draw_gradient(ctx, canvas, &pass.palette),
        Design::Geometric => draw_geometric(ctx, canvas, &pass.palette),
        Design::Retro => draw_retro(ctx, canvas, &pass.palette),
        Design::Glitch => draw_glitch(ctx, canvas, &pass.palette, rng),
        Design::Minimal => draw_minimal(ctx, canvas, &pass.palette),
    }
}

fn draw_gradient(ctx: &mut RenderContext, canvas: Canvas, p: &Palette) {
    let c = canvas.center();
    let radial = Gradient::new_radial((c.x, c.y), (canvas.side() / 2.0) as f32).with_stops([
        (0.0, solid(p.color1)),
        (0.5, solid(p.color2)),
        (1.0, solid(p.color3)),
    ]);
    ctx.set_paint(radial);
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));
}

fn draw_geometric(ctx: &mut RenderContext, canvas: Canvas, p: &Palette) {
    let side = canvas.side();
    let step = side / f64::from(GEOMETRIC_GRID);

    ctx.set_paint(solid(p.color3));
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));

    ctx.set_stroke(Stroke::new(GEOMETRIC_LINE_FRAC * side));
    ctx.set_paint(solid(p.color1));
    for i in 0..GEOMETRIC_GRID {
        let y = step * f64::from(i);
        stroke(ctx, &line((0.0, y), (side, y)));
    }
    ctx.set_paint(solid(p.color2));
    for i in 0..GEOMETRIC_GRID {
        let x = step * f64::from(i);
        stroke(ctx, &line((x, 0.0), (x, side)));
    }

    let c = canvas.center();
    let [inner, outer] = GEOMETRIC_SHADE_RGBA;
    let shade = Gradient::new_radial((c.x, c.y), (side / 2.0) as f32)
        .with_stops([(0.0, rgba(inner)), (1.0, rgba(outer))]);
    ctx.set_paint(shade);
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));
}

fn draw_retro(ctx: &mut RenderContext, canvas: Canvas, p: &Palette) {
    let side = canvas.side();

    let [top, mid, bottom] = RETRO_SKY;
    let sky = Gradient::new_linear((0.0, 0.0), (0.0, side)).with_stops([
        (0.0, solid(top)),
        (0.5, solid(mid)),
        (1.0, solid(bottom)),
    ]);
    ctx.set_paint(sky);
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));

    ctx.set_paint(solid(p.color1));
    ctx.set_stroke(Stroke::new(RETRO_GRID_WIDTH_FRAC * side));
    for row in 0..RETRO_GRID_ROWS {
        stroke(ctx, &retro_grid_row(side, row));
    }

    let sun = Point::new(side / 2.0, side / 3.0);
    ctx.set_paint(solid(p.color2));
    ctx.fill_path(&bezpath_to_cpu(
        &Circle::new(sun, RETRO_SUN_FRAC * side).to_path(PATH_TOLERANCE),
    ));

    ctx.set_stroke(Stroke::new(RETRO_RING_WIDTH_FRAC * side));
    for i in 0..RETRO_RINGS {
        let r = (RETRO_SUN_FRAC + f64::from(i) * RETRO_RING_STEP_FRAC) * side;
        stroke(ctx, &Circle::new(sun, r).to_path(PATH_TOLERANCE));
    }
}

/// One horizon line: a per-row bend plus a ripple travelling along x.
pub(crate) fn retro_grid_row(side: f64, row: u32) -> BezPath {
    let i = f64::from(row);
    let base = side / 2.0
        + i * RETRO_ROW_SPACING_FRAC * side
        + (i * RETRO_PHASE_STEP).sin() * RETRO_ROW_BEND_FRAC * side;

    let mut path = BezPath::new();
    path.move_to((0.0, base));
    for k in 0..=RETRO_SAMPLES_PER_ROW {
        let x = side * f64::from(k) / f64::from(RETRO_SAMPLES_PER_ROW);
        let ripple = ((x / side) * TAU + i * RETRO_PHASE_STEP).sin() * RETRO_RIPPLE_FRAC * side;
        path.line_to((x, base + ripple));
    }
    path
}

fn draw_glitch(ctx: &mut RenderContext, canvas: Canvas, p: &Palette, rng: &mut dyn RandomSource) {
    let side = canvas.side();

    ctx.set_paint(solid(Rgb8::BLACK));
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));

    for bar in glitch_rects(side, p, rng) {
        ctx.set_paint(rgba(bar.color.with_alpha(GLITCH_RECT_ALPHA)));
        ctx.fill_rect(&rect_to_cpu(bar.rect));
    }

    ctx.set_paint(rgba(SCAN_LINE_RGBA));
    ctx.set_stroke(Stroke::new(SCAN_LINE_WIDTH_FRAC * side));
    for y in scan_line_rows(side) {
        stroke(ctx, &line((0.0, y), (side, y)));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct GlitchRect {
    pub(crate) rect: Rect,
    pub(crate) color: Rgb8,
}

/// Sample the glitch bars. Each bar consumes five draws: color, x, y, width, height.
pub(crate) fn glitch_rects(
    side: f64,
    p: &Palette,
    rng: &mut dyn RandomSource,
) -> Vec<GlitchRect> {
    let choices = [p.color1, p.color2, p.color3, GLITCH_GREEN, GLITCH_MAGENTA];
    (0..GLITCH_RECT_COUNT)
        .map(|_| {
            let color = choices[rng.pick_index(choices.len())];
            let x = rng.next_f64() * side;
            let y = rng.next_f64() * side;
            let w = rng.next_f64() * GLITCH_SPAN_W_FRAC * side + GLITCH_MIN_W_FRAC * side;
            let h = rng.next_f64() * GLITCH_SPAN_H_FRAC * side + GLITCH_MIN_H_FRAC * side;
            GlitchRect {
                rect: Rect::new(x, y, x + w, y + h),
                color,
            }
        })
        .collect()
}

/// Scan-line centers: every [`SCAN_LINE_STEP_PX`] from the top edge.
pub(crate) fn scan_line_rows(side: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(|i| f64::from(i) * SCAN_LINE_STEP_PX)
        .take_while(move |&y| y < side)
}

fn draw_minimal(ctx: &mut RenderContext, canvas: Canvas, p: &Palette) {
    let side = canvas.side();
    let c = canvas.center();

    ctx.set_paint(solid(Rgb8::WHITE));
    ctx.fill_rect(&rect_to_cpu(canvas.bounds()));

    ctx.set_paint(solid(p.color1));
    ctx.fill_path(&bezpath_to_cpu(
        &Circle::new(c, side / 3.0).to_path(PATH_TOLERANCE),
    ));
    ctx.set_paint(solid(p.color2));
    ctx.fill_path(&bezpath_to_cpu(
        &Circle::new(c, side / 5.0).to_path(PATH_TOLERANCE),
    ));
}

fn line(from: (f64, f64), to: (f64, f64)) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}

fn stroke(ctx: &mut RenderContext, path: &BezPath) {
    ctx.stroke_path(&bezpath_to_cpu(path));
}

fn solid(c: Rgb8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, 255)
}

pub(crate) fn rgba([r, g, b, a]: [u8; 4]) -> Color {
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/designs.rs"]
mod tests;
