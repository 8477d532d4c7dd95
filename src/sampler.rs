//! Texture sampling
//!
//! Normalized (u,v) coordinates select texels from a mip level by nearest,
//! bilinear, or trilinear interpolation. All sampling reads 8 bit texels
//! and returns decoded float [Color]s.
//!
//! [Color]: crate::color::Color

use crate::color::{color_u8_to_f64, Color};
use crate::texture::{MipLevel, Texture, TextureError};

/// Decode the texel at (x,y) into float components
fn texel_color(mip: &MipLevel, x: usize, y: usize) -> Color {
    let t = mip.texel(x, y);
    Color::new(color_u8_to_f64(t[0]), color_u8_to_f64(t[1]),
               color_u8_to_f64(t[2]), color_u8_to_f64(t[3]))
}

/// Clamp a texel coordinate into [0, dim)
fn clamp_texel(v: i64, dim: usize) -> usize {
    v.max(0).min(dim as i64 - 1) as usize
}

/// Nearest texel of one mip level
pub(crate) fn nearest(mip: &MipLevel, u: f64, v: f64) -> Color {
    let x = (mip.width as f64 * u).floor() as i64;
    let y = (mip.height as f64 * v).floor() as i64;
    texel_color(mip, clamp_texel(x, mip.width), clamp_texel(y, mip.height))
}

fn bilinear(mip: &MipLevel, u: f64, v: f64) -> Color {
    let u = mip.width as f64 * u - 0.5;
    let v = mip.height as f64 * v - 0.5;
    let x = u.floor();
    let y = v.floor();
    let u_ratio = u - x;
    let v_ratio = v - y;

    let x0 = clamp_texel(x as i64, mip.width);
    let x1 = clamp_texel(x as i64 + 1, mip.width);
    let y0 = clamp_texel(y as i64, mip.height);
    let y1 = clamp_texel(y as i64 + 1, mip.height);

    let top = texel_color(mip, x0, y0) * (1.0 - u_ratio)
            + texel_color(mip, x1, y0) * u_ratio;
    let bot = texel_color(mip, x0, y1) * (1.0 - u_ratio)
            + texel_color(mip, x1, y1) * u_ratio;
    top * (1.0 - v_ratio) + bot * v_ratio
}

/// Sample the nearest texel at `level`
///
/// (u,v) map to texel coordinates by `floor(dimension * u)`, clamped into
/// the level. Requesting a level beyond the populated chain is an error.
pub fn sample_nearest(tex: &Texture, u: f64, v: f64, level: usize)
    -> Result<Color, TextureError>
{
    Ok(nearest(tex.level(level)?, u, v))
}

/// Bilinear blend of the 2x2 texel neighborhood at `level`
///
/// The neighborhood is centered on `(width*u - 0.5, height*v - 0.5)` and
/// weighted by the fractional offsets; border texels are clamped.
/// Requesting a level beyond the populated chain is an error.
pub fn sample_bilinear(tex: &Texture, u: f64, v: f64, level: usize)
    -> Result<Color, TextureError>
{
    Ok(bilinear(tex.level(level)?, u, v))
}

/// Trilinear sample between the two mip levels bracketing a footprint
///
/// The footprint scale is `min(u_scale, v_scale)`, the number of screen
/// samples the full texture spans on each axis. Levels are walked from the
/// base down until one's height is exceeded, and the bilinear samples of
/// that level and the next finer one are blended by where the scale falls
/// between their heights. A footprint at least as large as the base level
/// uses the base alone; one smaller than every level uses the coarsest.
pub fn sample_trilinear(tex: &Texture, u: f64, v: f64,
                        u_scale: f64, v_scale: f64) -> Color {
    let min_scale = u_scale.min(v_scale);
    let levels = &tex.levels;
    if min_scale >= levels[0].height as f64 {
        return bilinear(&levels[0], u, v);
    }
    for level in 1 .. levels.len() {
        if min_scale >= levels[level].height as f64 {
            let coarse = bilinear(&levels[level], u, v);
            let fine = bilinear(&levels[level - 1], u, v);
            let h_coarse = levels[level].height as f64;
            let h_fine = levels[level - 1].height as f64;
            if h_fine <= h_coarse {
                // heights flatten once a dimension floors at 1
                return coarse;
            }
            let ratio = (min_scale - h_coarse) / (h_fine - h_coarse);
            return coarse * (1.0 - ratio) + fine * ratio;
        }
    }
    bilinear(&levels[levels.len() - 1], u, v)
}
