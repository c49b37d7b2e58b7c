use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use rfcanvas::Context;

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
fn clockwise_quarter_fills_lower_right() {
    let mut ctx = Context::new(100, 100);
    ctx.fill_arc(50., 50., 20., 0., FRAC_PI_2, false).unwrap();
    let pixels = painted(&ctx);
    assert!(pixels.contains(&(55, 55)));
    assert!(pixels.iter().all(|&(x, y)| x >= 50 && y >= 50));
}

#[test]
fn both_directions_partition_the_disc() {
    let mut cw = Context::new(100, 100);
    cw.fill_arc(50., 50., 20., 0.3, 2.1, false).unwrap();
    let mut ccw = Context::new(100, 100);
    ccw.fill_arc(50., 50., 20., 0.3, 2.1, true).unwrap();

    let (a, b) = (painted(&cw), painted(&ccw));
    assert!(a.is_disjoint(&b));
    for y in 0..100 {
        for x in 0..100 {
            let d = ((x as f64 + 0.5 - 50.).powi(2) + (y as f64 + 0.5 - 50.).powi(2)).sqrt();
            let covered = a.contains(&(x, y)) || b.contains(&(x, y));
            if d <= 19. {
                assert!(covered, "({x}, {y}) inside the disc was skipped");
            } else if d > 20. {
                assert!(!covered, "({x}, {y}) outside the disc was painted");
            }
        }
    }
}

#[test]
fn angles_wrap_modulo_full_turn() {
    let mut a = Context::new(80, 80);
    a.fill_arc(40., 40., 15., 0.5, 1.5, false).unwrap();
    let mut b = Context::new(80, 80);
    b.fill_arc(40., 40., 15., 0.5 + TAU, 1.5 + TAU, false).unwrap();
    assert_eq!(painted(&a), painted(&b));
}

#[test]
fn outer_stroke_sits_outside_translucent_fill() {
    let mut ctx = Context::new(100, 100);
    ctx.set_fill_style("rgba(255, 0, 0, 0.5)").unwrap();
    ctx.set_stroke_style("rgba(0, 0, 255, 0.5)").unwrap();
    ctx.set_line_width(4.);
    ctx.fill_and_outer_stroke_arc(50., 50., 20., 0., PI, false).unwrap();

    let red = [255, 0, 0, 128];
    let blue = [0, 0, 255, 128];
    for (x, y) in painted(&ctx) {
        let px = ctx.get_pixel(x, y).unwrap();
        assert!(px == red || px == blue, "({x}, {y}): {px:?}");
    }
    assert_eq!(ctx.get_pixel(50, 60), Some(red));
    assert_eq!(ctx.get_pixel(50, 72), Some(blue));
    assert_eq!(ctx.get_pixel(50, 40), Some([0, 0, 0, 0]));
}

#[test]
fn full_turn_outer_stroke_is_a_ring() {
    let mut ctx = Context::new(100, 100);
    ctx.set_line_width(3.);
    ctx.outer_stroke_arc(50., 50., 20., 0., TAU, false).unwrap();
    let pixels = painted(&ctx);
    assert!(!pixels.contains(&(50, 50)));
    assert!(!pixels.contains(&(65, 50)));
    assert!(pixels.contains(&(71, 50)));
    assert!(pixels.contains(&(50, 28)));
}

#[test]
fn empty_sweep_draws_nothing() {
    let mut ctx = Context::new(40, 40);
    ctx.fill_arc(20., 20., 10., 1., 1., false).unwrap();
    ctx.outer_stroke_arc(20., 20., 10., 1., 1., true).unwrap();
    assert!(painted(&ctx).is_empty());
}
