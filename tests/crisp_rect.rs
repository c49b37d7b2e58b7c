use rfcanvas::{Color, Context, Point, Shape};

/// Inclusive bounds of all non-transparent pixels: (min_x, min_y, max_x, max_y)
fn painted_bounds(ctx: &Context) -> Option<(i32, i32, i32, i32)> {
    let w = ctx.width() as usize;
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for (i, px) in ctx.image_data().chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let (x, y) = ((i % w) as i32, (i / w) as i32);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

fn rect_shape(
    center: (f64, f64),
    w: f64,
    h: f64,
    sw: f64,
    stroke: Option<Color>,
    fill: Option<Color>,
) -> Shape {
    Shape::Rect {
        center: Point::new(center.0, center.1),
        width: w,
        height: h,
        rotation: 0.,
        stroke_width: sw,
        stroke_color: stroke,
        fill_color: fill,
    }
}

#[test]
fn one_pixel_red_outline_scenario() {
    let mut ctx = Context::new(600, 600);
    let red = Color::rgb(255, 0, 0);
    ctx.draw_shape(&rect_shape((100., 100.), 50., 30., 1., Some(red), None))
        .unwrap();

    assert_eq!(painted_bounds(&ctx), Some((74, 84, 125, 115)));
    for y in 84..=115 {
        for x in 74..=125 {
            let on_ring = x == 74 || x == 125 || y == 84 || y == 115;
            let expected = if on_ring { [255, 0, 0, 255] } else { [0, 0, 0, 0] };
            assert_eq!(ctx.get_pixel(x, y), Some(expected), "({x}, {y})");
        }
    }
}

#[test]
fn extents_match_inset_outset_formulas() {
    for w in [10, 11, 20, 21] {
        for h in [6, 7, 14] {
            for sw in [1, 2, 3, 4, 5] {
                let mut ctx = Context::new(200, 200);
                let shape = rect_shape(
                    (100., 100.),
                    w as f64,
                    h as f64,
                    sw as f64,
                    Some(Color::BLACK),
                    Some(Color::rgb(0, 0, 255)),
                );
                ctx.draw_shape(&shape).unwrap();

                let (left, top) = (100 - w / 2, 100 - h / 2);
                let grow = (sw + 1) / 2;
                let expected = (left - grow, top - grow, left + w - 1 + grow, top + h - 1 + grow);
                assert_eq!(painted_bounds(&ctx), Some(expected), "w={w} h={h} sw={sw}");

                let shrink = sw / 2;
                let (fx, fy) = (left + shrink, top + shrink);
                let blue = Some([0, 0, 255, 255]);
                if w > 2 * shrink && h > 2 * shrink {
                    assert_eq!(ctx.get_pixel(fx, fy), blue, "w={w} h={h} sw={sw}");
                    assert_ne!(ctx.get_pixel(fx - 1, fy), blue, "w={w} h={h} sw={sw}");
                }
            }
        }
    }
}

#[test]
fn translucent_fill_and_stroke_are_blended_once() {
    let mut ctx = Context::new(100, 100);
    let stroke = Color::rgba(0, 0, 0, 127.5);
    let fill = Color::rgba(255, 0, 0, 127.5);
    ctx.draw_shape(&rect_shape((50., 50.), 30., 20., 3., Some(stroke), Some(fill)))
        .unwrap();
    for px in ctx.image_data().chunks_exact(4).filter(|p| p[3] != 0) {
        assert!(px == [0, 0, 0, 128] || px == [255, 0, 0, 128], "{px:?}");
    }
}

#[test]
fn canvas_style_stroke_rect_straddles_path() {
    let mut ctx = Context::new(60, 60);
    ctx.set_line_width(2.);
    ctx.stroke_rect(10., 10., 21., 15.).unwrap();
    assert_eq!(painted_bounds(&ctx), Some((9, 9, 31, 25)));
    assert_eq!(ctx.get_pixel(11, 11), Some([0, 0, 0, 0]));
    assert_eq!(ctx.get_pixel(10, 10), Some([0, 0, 0, 255]));
}

#[test]
fn quarter_turn_transform_keeps_rect_crisp() {
    let mut ctx = Context::new(60, 60);
    ctx.translate(30., 30.);
    ctx.rotate(std::f64::consts::FRAC_PI_2);
    ctx.fill_rect(0., 0., 10., 4.).unwrap();
    // the rect now extends 4px to the left and 10px down
    assert_eq!(painted_bounds(&ctx), Some((26, 30, 29, 39)));
    let opaque = ctx.image_data().chunks_exact(4).all(|p| p[3] == 0 || p[3] == 255);
    assert!(opaque);
}

#[test]
fn scaled_rect_grows_on_the_grid() {
    let mut ctx = Context::new(60, 60);
    ctx.scale(2., 3.);
    ctx.fill_rect(5., 5., 4., 2.).unwrap();
    assert_eq!(painted_bounds(&ctx), Some((10, 15, 17, 20)));
}

#[test]
fn rotated_shape_uses_polygon_fill() {
    let mut ctx = Context::new(100, 100);
    let mut shape = rect_shape((50., 50.), 30., 30., 0., None, Some(Color::BLACK));
    if let Shape::Rect { rotation, .. } = &mut shape {
        *rotation = std::f64::consts::FRAC_PI_4;
    }
    ctx.draw_shape(&shape).unwrap();
    let (x0, y0, x1, y1) = painted_bounds(&ctx).unwrap();
    // a 30px square turned 45° spans about 42px
    assert!(x1 - x0 >= 40 && y1 - y0 >= 40);
    assert_eq!(ctx.get_pixel(50, 50), Some([0, 0, 0, 255]));
    assert_eq!(ctx.get_pixel(36, 36), Some([0, 0, 0, 0]));
}

#[test]
fn sheared_transform_falls_back_to_polygon_fill() {
    // rotate · scale · rotate with the second angle picked so the matrix's
    // first row has no y term, leaving a pure shear of the y axis
    let (a, sx, sy) = (std::f64::consts::FRAC_PI_6, 2., 0.5);
    let (sa, ca) = a.sin_cos();
    let b = (-(sa * sy)).atan2(ca * sx);

    let mut ctx = Context::new(80, 80);
    ctx.translate(20., 20.);
    ctx.rotate(a);
    ctx.scale(sx, sy);
    ctx.rotate(b);
    ctx.fill_rect(0., 0., 20., 20.).unwrap();

    // local (10, 19.6) lands inside the parallelogram
    assert_eq!(ctx.get_pixel(37, 40), Some([0, 0, 0, 255]));
    // inside the axis-aligned bounding box but outside the parallelogram
    assert_eq!(ctx.get_pixel(54, 21), Some([0, 0, 0, 0]));
}
