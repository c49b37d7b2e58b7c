use std::collections::BTreeSet;

use rfcanvas::{CanvasConfig, Context, RasterTuning};

fn painted(ctx: &Context) -> BTreeSet<(i32, i32)> {
    let w = ctx.width() as usize;
    ctx.image_data()
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] != 0)
        .map(|(i, _)| ((i % w) as i32, (i / w) as i32))
        .collect()
}

#[test]
fn translucent_stroke_is_blended_once_per_pixel() {
    let mut ctx = Context::new(100, 100);
    ctx.set_stroke_style("rgba(0, 0, 255, 0.5)").unwrap();
    ctx.stroke_circle(50., 50., 20.).unwrap();
    let pixels = painted(&ctx);
    assert!(!pixels.is_empty());
    for &(x, y) in &pixels {
        assert_eq!(ctx.get_pixel(x, y), Some([0, 0, 255, 128]));
    }
}

#[test]
fn stroke_has_eight_way_symmetry_about_offset_center() {
    for line_width in [1., 2., 4., 7.] {
        let mut ctx = Context::new(120, 120);
        ctx.set_line_width(line_width);
        ctx.stroke_circle(60., 60., 25.).unwrap();
        let pixels = painted(&ctx);
        // default tuning moves the center to (59, 59)
        let (cx, cy) = (59, 59);
        for &(x, y) in &pixels {
            let (dx, dy) = (x - cx, y - cy);
            for (rx, ry) in [(-dx, dy), (dx, -dy), (dy, dx), (-dy, -dx), (-dy, dx)] {
                assert!(
                    pixels.contains(&(cx + rx, cy + ry)),
                    "line width {line_width}: ({x}, {y}) not mirrored"
                );
            }
        }
    }
}

#[test]
fn fill_uses_half_pixel_inset_radius() {
    let mut ctx = Context::new(100, 100);
    ctx.fill_circle(50., 50., 10.).unwrap();
    let pixels = painted(&ctx);
    let expected: BTreeSet<(i32, i32)> = (-10..=10)
        .flat_map(|dy| (-10..=10).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| ((dx * dx + dy * dy) as f64) <= 9.5 * 9.5)
        .map(|(dx, dy)| (49 + dx, 49 + dy))
        .collect();
    assert_eq!(pixels, expected);
}

#[test]
fn fill_and_stroke_never_double_blend() {
    let mut ctx = Context::new(100, 100);
    ctx.set_fill_style("rgba(255, 0, 0, 0.5)").unwrap();
    ctx.set_stroke_style("rgba(0, 0, 255, 0.5)").unwrap();
    ctx.set_line_width(3.);
    ctx.fill_and_stroke_circle(50., 50., 15.).unwrap();
    for (x, y) in painted(&ctx) {
        let px = ctx.get_pixel(x, y).unwrap();
        assert!(px == [255, 0, 0, 128] || px == [0, 0, 255, 128], "({x}, {y}): {px:?}");
    }
    assert_eq!(ctx.get_pixel(49, 49), Some([255, 0, 0, 128]));
}

#[test]
fn tuning_can_remove_the_center_offset() {
    let config = CanvasConfig {
        tuning: RasterTuning {
            circle_center_offset: (0, 0),
            ..Default::default()
        },
        ..CanvasConfig::new(40, 40)
    };
    let mut ctx = Context::with_config(config).unwrap();
    ctx.fill_circle(20., 20., 3.).unwrap();
    let pixels = painted(&ctx);
    assert!(pixels.contains(&(22, 20)));
    assert!(pixels.contains(&(18, 20)));
    assert!(!pixels.contains(&(17, 20)));
}

#[test]
fn scale_transform_grows_radius() {
    let mut ctx = Context::new(100, 100);
    ctx.scale(2., 2.);
    ctx.fill_circle(25., 25., 5.).unwrap();
    let pixels = painted(&ctx);
    // center (50, 50) - 1, radius 10
    assert!(pixels.contains(&(49 + 9, 49)));
    assert!(!pixels.contains(&(49 + 10, 49)));
}

#[test]
fn huge_radius_is_bounded_by_the_buffer() {
    let mut ctx = Context::new(600, 600);
    ctx.fill_circle(300., 300., 50_000.).unwrap();
    assert_eq!(painted(&ctx).len(), 600 * 600);

    let mut ctx = Context::new(600, 600);
    ctx.set_line_width(4.);
    ctx.stroke_circle(300., 300., 50_000.).unwrap();
    ctx.set_line_width(1.);
    ctx.stroke_circle(300., 300., 1e12).unwrap();
    assert!(painted(&ctx).is_empty());
}

#[test]
fn far_away_outline_crossing_the_buffer_is_drawn() {
    let mut ctx = Context::new(100, 100);
    // default tuning shifts the center to (49, 1e9 - 1), so the top of the
    // outline lands on row 0
    ctx.stroke_circle(50., 1e9 + 1., 1e9).unwrap();
    let expected: BTreeSet<(i32, i32)> = (0..100).map(|x| (x, 0)).collect();
    assert_eq!(painted(&ctx), expected);
}
