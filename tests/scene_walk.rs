mod common;

use std::rc::Rc;

use common::{pixel, FanTriangulator};
use softraster::{Color, Element, Group, Image, Point, Polygon, Polyline, Rect,
                 RenderTarget, Renderer, Scene, Style, Texture, Transform, Vec2};

const WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);
const BLACK: (u8, u8, u8, u8) = (0, 0, 0, 255);
const RED: (u8, u8, u8, u8) = (255, 0, 0, 255);

fn fill(c: Color) -> Style {
    Style { fill: c, stroke: Color::clear() }
}

fn stroke(c: Color) -> Style {
    Style { fill: Color::clear(), stroke: c }
}

fn draw(scene: &Scene, w: usize, h: usize) -> Vec<u8> {
    let mut ren = Renderer::new(FanTriangulator);
    let mut buf = vec![0u8; 4 * w * h];
    let mut target = RenderTarget::new(&mut buf, w, h).unwrap();
    ren.draw(scene, &mut target).unwrap();
    buf
}

fn count_color(buf: &[u8], w: usize, h: usize, c: (u8, u8, u8, u8)) -> usize {
    let mut n = 0;
    for y in 0 .. h {
        for x in 0 .. w {
            if pixel(buf, w, x, y) == c {
                n += 1;
            }
        }
    }
    n
}

/// Full canvas rect on a small target, including the border overlay's
/// exact artifact rows: the corner outset runs the top border through
/// y=1 (black) with its zero weight neighbors overwriting y=2 white,
/// the left border collapses onto column 0 as zero weight white, and
/// the bottom border lands on the last row.
#[test]
fn full_canvas_rect_end_to_end() {
    let scene = Scene {
        width: 8.0,
        height: 8.0,
        elements: vec![Element::Rect(Rect {
            position: Vec2::new(0.0, 0.0),
            dimension: Vec2::new(8.0, 8.0),
            style: fill(Color::new(1.0, 0.0, 0.0, 1.0)),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 8, 8);

    for x in 0 .. 8 {
        assert_eq!(pixel(&buf, 8, x, 0), RED, "row 0, x={}", x);
        assert_eq!(pixel(&buf, 8, x, 2), WHITE, "row 2, x={}", x);
        assert_eq!(pixel(&buf, 8, x, 7), BLACK, "row 7, x={}", x);
    }
    assert_eq!(pixel(&buf, 8, 0, 1), WHITE);
    for x in 1 .. 8 {
        assert_eq!(pixel(&buf, 8, x, 1), BLACK, "row 1, x={}", x);
    }
    for y in 3 .. 7 {
        assert_eq!(pixel(&buf, 8, 0, y), WHITE, "column 0, y={}", y);
        for x in 1 .. 8 {
            assert_eq!(pixel(&buf, 8, x, y), RED, "row {}, x={}", y, x);
        }
    }
}

#[test]
fn group_transform_scales_children() {
    let unit_rect = |x: f64, y: f64, c: Color| {
        Element::Rect(Rect {
            position: Vec2::new(x, y),
            dimension: Vec2::new(1.0, 1.0),
            style: fill(c),
            transform: Transform::new(),
        })
    };
    let red = Color::new(1.0, 0.0, 0.0, 1.0);

    let plain = Scene { width: 16.0, height: 16.0,
                        elements: vec![unit_rect(4.0, 4.0, red)] };
    let scaled = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Group(Group {
            elements: vec![unit_rect(4.0, 4.0, red)],
            transform: Transform::new_scale(2.0, 2.0),
        })],
    };

    let plain_buf = draw(&plain, 16, 16);
    let scaled_buf = draw(&scaled, 16, 16);

    // doubling the scale doubles the covered extent on each axis
    assert_eq!(count_color(&plain_buf, 16, 16, RED), 1);
    assert_eq!(pixel(&plain_buf, 16, 4, 4), RED);
    assert_eq!(count_color(&scaled_buf, 16, 16, RED), 4);
    assert_eq!(pixel(&scaled_buf, 16, 8, 8), RED);
    assert_eq!(pixel(&scaled_buf, 16, 9, 9), RED);
}

#[test]
fn group_transform_does_not_leak_into_siblings() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let green = Color::new(0.0, 1.0, 0.0, 1.0);
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![
            Element::Group(Group {
                elements: vec![Element::Rect(Rect {
                    position: Vec2::new(4.0, 4.0),
                    dimension: Vec2::new(1.0, 1.0),
                    style: fill(red),
                    transform: Transform::new(),
                })],
                transform: Transform::new_scale(2.0, 2.0),
            }),
            // drawn after the group; must see only the root transform
            Element::Rect(Rect {
                position: Vec2::new(2.0, 4.0),
                dimension: Vec2::new(1.0, 1.0),
                style: fill(green),
                transform: Transform::new(),
            }),
        ],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 2, 4), (0, 255, 0, 255));
    // a leaked scale would land the sibling here instead
    assert_eq!(pixel(&buf, 16, 4, 8), WHITE);
}

#[test]
fn polyline_is_open() {
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Polyline(Polyline {
            points: vec![Vec2::new(3.0, 5.0), Vec2::new(9.0, 5.0), Vec2::new(9.0, 9.0)],
            style: stroke(Color::black()),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 5, 5), BLACK);
    assert_eq!(pixel(&buf, 16, 9, 7), BLACK);
    // no closing segment back to the first vertex
    assert_eq!(pixel(&buf, 16, 6, 7), WHITE);
}

#[test]
fn invisible_stroke_skips_polyline() {
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Polyline(Polyline {
            points: vec![Vec2::new(3.0, 5.0), Vec2::new(9.0, 5.0)],
            style: stroke(Color::new(0.0, 0.0, 0.0, 0.0)),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 5, 5), WHITE);
}

#[test]
fn polygon_fill_and_closed_outline() {
    let blue = Color::new(0.0, 0.0, 1.0, 1.0);
    let square = vec![Vec2::new(4.0, 4.0), Vec2::new(12.0, 4.0),
                      Vec2::new(12.0, 12.0), Vec2::new(4.0, 12.0)];
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Polygon(Polygon {
            points: square,
            style: fill(blue),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 8, 8), (0, 0, 255, 255));
    assert_eq!(pixel(&buf, 16, 5, 5), (0, 0, 255, 255));
    assert_eq!(pixel(&buf, 16, 11, 11), (0, 0, 255, 255));
    assert_eq!(pixel(&buf, 16, 2, 8), WHITE);
    assert_eq!(pixel(&buf, 16, 12, 12), WHITE);
}

#[test]
fn polygon_outline_wraps_to_start() {
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Polygon(Polygon {
            points: vec![Vec2::new(4.0, 5.0), Vec2::new(10.0, 5.0), Vec2::new(10.0, 11.0),
                         Vec2::new(4.0, 11.0)],
            style: stroke(Color::black()),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 16, 16);
    // the wrapping segment from the last vertex back to the first
    assert_eq!(pixel(&buf, 16, 4, 8), BLACK);
}

#[test]
fn point_and_ellipse_dispatch() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![
            Element::Point(Point {
                position: Vec2::new(5.4, 6.6),
                style: fill(red),
                transform: Transform::new(),
            }),
            // ellipses are accepted but not rendered
            Element::Ellipse(softraster::Ellipse {
                center: Vec2::new(10.0, 10.0),
                radius: Vec2::new(3.0, 2.0),
                style: fill(red),
                transform: Transform::new(),
            }),
        ],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 5, 6), RED);
    assert_eq!(pixel(&buf, 16, 10, 10), WHITE);
}

#[test]
fn image_blit_samples_quadrants() {
    let texels = vec![
        255, 0, 0, 255,    0, 255, 0, 255,
        0, 0, 255, 255,    255, 255, 0, 255,
    ];
    let tex = Rc::new(Texture::from_rgba8(texels, 2, 2));
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Image(Image {
            position: Vec2::new(4.0, 4.0),
            dimension: Vec2::new(4.0, 4.0),
            texture: tex,
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 16, 16);
    assert_eq!(pixel(&buf, 16, 4, 4), RED);
    assert_eq!(pixel(&buf, 16, 7, 5), (0, 255, 0, 255));
    assert_eq!(pixel(&buf, 16, 5, 7), (0, 0, 255, 255));
    assert_eq!(pixel(&buf, 16, 7, 7), (255, 255, 0, 255));
}

#[test]
fn draw_reuses_renderer_across_frames() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let scene = Scene {
        width: 16.0,
        height: 16.0,
        elements: vec![Element::Rect(Rect {
            position: Vec2::new(4.0, 4.0),
            dimension: Vec2::new(2.0, 2.0),
            style: fill(red),
            transform: Transform::new(),
        })],
    };
    let mut ren = Renderer::new(FanTriangulator);
    let mut buf = vec![0u8; 4 * 16 * 16];

    let mut target = RenderTarget::new(&mut buf, 16, 16).unwrap();
    ren.draw(&scene, &mut target).unwrap();
    ren.draw(&scene, &mut target).unwrap();
    assert_eq!(pixel(&buf, 16, 4, 4), RED);
    // a second frame starts from a fresh white buffer
    assert_eq!(pixel(&buf, 16, 10, 10), WHITE);

    // resizing the target re-allocates the supersample buffer
    let mut small = vec![0u8; 4 * 8 * 8];
    let mut target = RenderTarget::new(&mut small, 8, 8).unwrap();
    ren.draw(&scene, &mut target).unwrap();
    assert_eq!(pixel(&small, 8, 4, 4), RED);
}

#[test]
fn scene_png_round_trip() {
    let scene = Scene {
        width: 8.0,
        height: 8.0,
        elements: vec![Element::Rect(Rect {
            position: Vec2::new(0.0, 0.0),
            dimension: Vec2::new(8.0, 8.0),
            style: fill(Color::new(1.0, 0.0, 0.0, 1.0)),
            transform: Transform::new(),
        })],
    };
    let buf = draw(&scene, 8, 8);
    std::fs::create_dir_all("tests/tmp").unwrap();
    softraster::ppm::write_file(&buf, 8, 8, "tests/tmp/scene_round_trip.png").unwrap();
    let (data, w, h) = softraster::ppm::read_file("tests/tmp/scene_round_trip.png").unwrap();
    assert_eq!((w, h), (8, 8));
    assert_eq!(data, buf);
}
