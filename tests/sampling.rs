use softraster::sampler::{sample_bilinear, sample_nearest, sample_trilinear};
use softraster::{Color, Texture, TextureError};

const TOLERANCE: f64 = 1e-9;

fn close(a: Color, b: Color) -> bool {
    (a.r - b.r).abs() < TOLERANCE
        && (a.g - b.g).abs() < TOLERANCE
        && (a.b - b.b).abs() < TOLERANCE
        && (a.a - b.a).abs() < TOLERANCE
}

/// 2x2 texture: red, green / blue, yellow
fn quad_texture() -> Texture {
    let texels = vec![
        255, 0, 0, 255,    0, 255, 0, 255,
        0, 0, 255, 255,    255, 255, 0, 255,
    ];
    Texture::from_rgba8(texels, 2, 2)
}

fn gradient_texture(w: usize, h: usize) -> Texture {
    let mut texels = Vec::with_capacity(4 * w * h);
    for y in 0 .. h {
        for x in 0 .. w {
            let v = (y * w + x) as u8;
            texels.extend_from_slice(&[v.wrapping_mul(11), v.wrapping_mul(17),
                                       v.wrapping_mul(23), 255]);
        }
    }
    Texture::from_rgba8(texels, w, h)
}

#[test]
fn nearest_picks_the_containing_texel() {
    let tex = quad_texture();
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let blue = Color::new(0.0, 0.0, 1.0, 1.0);
    assert!(close(sample_nearest(&tex, 0.25, 0.25, 0).unwrap(), red));
    assert!(close(sample_nearest(&tex, 0.25, 0.75, 0).unwrap(), blue));
}

#[test]
fn nearest_clamps_the_upper_edge() {
    let tex = quad_texture();
    let yellow = Color::new(1.0, 1.0, 0.0, 1.0);
    assert!(close(sample_nearest(&tex, 1.0, 1.0, 0).unwrap(), yellow));
}

#[test]
fn out_of_range_level_is_an_error() {
    let tex = quad_texture();
    assert_eq!(sample_nearest(&tex, 0.5, 0.5, 9).unwrap_err(),
               TextureError::LevelOutOfRange { level: 9, levels: 1 });
    assert_eq!(sample_bilinear(&tex, 0.5, 0.5, 9).unwrap_err(),
               TextureError::LevelOutOfRange { level: 9, levels: 1 });
}

#[test]
fn bilinear_center_averages_the_neighborhood() {
    let tex = quad_texture();
    let got = sample_bilinear(&tex, 0.5, 0.5, 0).unwrap();
    assert!(close(got, Color::new(0.5, 0.5, 0.25, 1.0)));
}

#[test]
fn bilinear_corner_clamps_to_the_corner_texel() {
    let tex = quad_texture();
    let got = sample_bilinear(&tex, 0.0, 0.0, 0).unwrap();
    assert!(close(got, Color::new(1.0, 0.0, 0.0, 1.0)));
}

#[test]
fn trilinear_at_an_exact_level_height_matches_bilinear() {
    let mut tex = gradient_texture(4, 4);
    tex.generate_mips(0).unwrap();
    for &(u, v) in &[(0.2, 0.3), (0.5, 0.5), (0.9, 0.1)] {
        let tri = sample_trilinear(&tex, u, v, 2.0, 2.0);
        let bil = sample_bilinear(&tex, u, v, 1).unwrap();
        assert!(close(tri, bil), "({}, {})", u, v);
    }
}

#[test]
fn trilinear_magnification_uses_the_base_level() {
    let mut tex = gradient_texture(4, 4);
    tex.generate_mips(0).unwrap();
    let tri = sample_trilinear(&tex, 0.3, 0.6, 7.0, 9.0);
    let bil = sample_bilinear(&tex, 0.3, 0.6, 0).unwrap();
    assert!(close(tri, bil));
}

#[test]
fn trilinear_blends_the_bracketing_levels() {
    let mut tex = gradient_texture(4, 4);
    tex.generate_mips(0).unwrap();
    // a footprint of 3 falls halfway between level heights 2 and 4
    let tri = sample_trilinear(&tex, 0.4, 0.4, 3.0, 3.0);
    let coarse = sample_bilinear(&tex, 0.4, 0.4, 1).unwrap();
    let fine = sample_bilinear(&tex, 0.4, 0.4, 0).unwrap();
    assert!(close(tri, coarse * 0.5 + fine * 0.5));
}

#[test]
fn trilinear_clamps_below_the_coarsest_level() {
    let mut tex = gradient_texture(4, 4);
    tex.generate_mips(0).unwrap();
    let last = tex.levels.len() - 1;
    let tri = sample_trilinear(&tex, 0.5, 0.5, 0.25, 0.25);
    let bil = sample_bilinear(&tex, 0.5, 0.5, last).unwrap();
    assert!(close(tri, bil));
}
