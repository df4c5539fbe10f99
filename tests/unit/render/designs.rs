use super::*;
use crate::foundation::rng::SplitMix64;

fn palette() -> Palette {
    Palette {
        color1: Rgb8::new(1, 2, 3),
        color2: Rgb8::new(4, 5, 6),
        color3: Rgb8::new(7, 8, 9),
    }
}

#[test]
fn glitch_samples_fifty_bars_within_bounds() {
    let mut rng = SplitMix64::new(11);
    let bars = glitch_rects(1000.0, &palette(), &mut rng);
    assert_eq!(bars.len(), GLITCH_RECT_COUNT);

    let p = palette();
    let allowed = [p.color1, p.color2, p.color3, GLITCH_GREEN, GLITCH_MAGENTA];
    for bar in &bars {
        assert!((0.0..1000.0).contains(&bar.rect.x0));
        assert!((0.0..1000.0).contains(&bar.rect.y0));
        assert!((50.0..250.0).contains(&bar.rect.width()), "{:?}", bar.rect);
        assert!((10.0..60.0).contains(&bar.rect.height()), "{:?}", bar.rect);
        assert!(allowed.contains(&bar.color));
    }
}

#[test]
fn glitch_draw_order_is_color_x_y_w_h() {
    struct Script(Vec<f64>);
    impl RandomSource for Script {
        fn next_f64(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    let mut draws = Vec::new();
    for _ in 0..GLITCH_RECT_COUNT {
        draws.extend([0.7, 0.1, 0.2, 0.5, 0.5]);
    }
    let mut rng = Script(draws);
    let bars = glitch_rects(1000.0, &palette(), &mut rng);
    assert!(rng.0.is_empty());

    let first = bars[0];
    assert_eq!(first.color, GLITCH_GREEN);
    let expected = Rect::new(100.0, 200.0, 250.0, 235.0);
    for (got, want) in [
        (first.rect.x0, expected.x0),
        (first.rect.y0, expected.y0),
        (first.rect.x1, expected.x1),
        (first.rect.y1, expected.y1),
    ] {
        assert!((got - want).abs() < 1e-9, "{:?}", first.rect);
    }
}

#[test]
fn scan_lines_are_four_pixels_apart() {
    let rows: Vec<f64> = scan_line_rows(1000.0).collect();
    assert_eq!(rows.len(), 250);
    assert_eq!(rows[0], 0.0);
    assert_eq!(*rows.last().unwrap(), 996.0);
    for pair in rows.windows(2) {
        assert_eq!(pair[1] - pair[0], SCAN_LINE_STEP_PX);
    }
}

#[test]
fn retro_rows_sample_the_full_width() {
    use kurbo::PathEl;

    let row = retro_grid_row(1000.0, 0);
    let els: Vec<PathEl> = row.elements().to_vec();
    // move_to + 51 samples from x = 0 to x = side
    assert_eq!(els.len(), 52);
    let PathEl::MoveTo(start) = els[0] else {
        panic!("row must start with move_to");
    };
    assert_eq!(start, Point::new(0.0, 500.0));
    let PathEl::LineTo(end) = els[51] else {
        panic!("row must end with line_to");
    };
    assert!((end.x - 1000.0).abs() < 1e-9);
    // Ripple phase is a full period across the row, so both ends sit on the base line.
    assert!((end.y - 500.0).abs() < 1e-6);

    let bent = retro_grid_row(1000.0, 5);
    let PathEl::MoveTo(p) = bent.elements()[0] else {
        panic!();
    };
    let expected = 500.0 + 5.0 * 40.0 + (1.5f64).sin() * 50.0;
    assert!((p.y - expected).abs() < 1e-9);
}
