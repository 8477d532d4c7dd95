//! Rasterization
//!
//! Entry points accept already transformed screen space coordinates and
//! internally scale every coordinate by the sample rate, so geometry lands
//! in the supersample buffer at `sample_rate x` resolution and is box
//! filtered down later by the resolve stage.

use crate::color::{blend, Color, Rgba8};
use crate::render::Renderer;
use crate::sampler;
use crate::scene::Triangulator;
use crate::texture::Texture;

/// Signed edge values within this tolerance count as on the edge, inside
const EDGE_EPSILON: f64 = 1e-8;

/// Compute fractional part of an f64 number
fn fpart(x: f64) -> f64 {
    x - x.floor()
}
/// Compute 1.0 - fractional part of an f64 number (remainder)
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Signed edge function of (x0,y0) against the edge from (x2,y2) to (x1,y1)
fn cross(x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x0 - x2) * (y1 - y2) - (y0 - y2) * (x1 - x2)
}

fn eps_sign(x: f64) -> i32 {
    if x > EDGE_EPSILON {
        1
    } else if x < -EDGE_EPSILON {
        -1
    } else {
        0
    }
}

/// Triangle containment by three signed edge tests
///
/// Accepting all non-negative or all non-positive signs makes the test
/// agnostic to vertex winding order.
fn in_triangle(x: f64, y: f64,
               x0: f64, y0: f64,
               x1: f64, y1: f64,
               x2: f64, y2: f64) -> bool {
    let d1 = eps_sign(cross(x, y, x1, y1, x0, y0));
    let d2 = eps_sign(cross(x, y, x2, y2, x1, y1));
    let d3 = eps_sign(cross(x, y, x0, y0, x2, y2));
    (d1 >= 0 && d2 >= 0 && d3 >= 0) || (d1 <= 0 && d2 <= 0 && d3 <= 0)
}

impl<T: Triangulator> Renderer<T> {
    /// Write one sample at a supersample coordinate
    ///
    /// Coordinates outside the supersample buffer are silently dropped;
    /// clipping is policy, not an error.
    pub fn set_sample(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || x >= self.samples.width as i64 {
            return;
        }
        if y < 0 || y >= self.samples.height as i64 {
            return;
        }
        self.samples.set(x as usize, y as usize, Rgba8::from(color));
    }

    /// Fill the sample block under the target pixel containing (x,y) with
    /// the exact fill color, no blending
    pub fn rasterize_point(&mut self, x: f64, y: f64, color: Color) {
        let rate = self.sample_rate as i64;
        // fill in the nearest pixel
        let sx = x.floor() as i64;
        let sy = y.floor() as i64;
        // check bounds in target pixels
        if sx < 0 || sx * rate >= self.samples.width as i64 {
            return;
        }
        if sy < 0 || sy * rate >= self.samples.height as i64 {
            return;
        }
        let sx = sx * rate;
        let sy = sy * rate;
        for i in 0 .. rate {
            for j in 0 .. rate {
                self.set_sample(sx + i, sy + j, color);
            }
        }
    }

    /// Plot a coverage weighted pixel, undoing the axis swap of a steep line
    fn plot(&mut self, steep: bool, x: i64, y: i64, color: Color, v: f64) {
        let c = blend(color, Color::white(), v);
        if steep {
            self.set_sample(y, x, c);
        } else {
            self.set_sample(x, y, c);
        }
    }

    /// Antialiased line from (x0,y0) to (x1,y1)
    ///
    /// Xiaolin Wu's algorithm in supersample space: step one unit along
    /// the dominant axis and write the two pixels straddling the exact
    /// crossing, each weighted by its fractional coverage. A weighted
    /// pixel interpolates from white toward `color`, approximating
    /// coverage against a white background rather than compositing over
    /// existing content.
    pub fn rasterize_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        let rate = self.sample_rate as f64;
        let (x0, y0, x1, y1) = (x0 * rate, y0 * rate, x1 * rate, y1 * rate);

        // step along the dominant axis, left to right
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (x0, y0, x1, y1) = if steep   { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
        let (x0, y0, x1, y1) = if x1 < x0 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

        let dx = x1 - x0;
        let dy = y1 - y0;
        // a zero length span has no defined slope
        let gradient = if dx.abs() <= 1e-6 { 1.0 } else { dy / dx };

        // first endpoint
        let xend = x0.round();
        let yend = y0 + gradient * (xend - x0);
        let xgap = rfpart(x0 + 0.5);
        let xpxl1 = xend as i64;
        let ypxl1 = yend.floor() as i64;
        self.plot(steep, xpxl1, ypxl1,     color, rfpart(yend) * xgap);
        self.plot(steep, xpxl1, ypxl1 + 1, color,  fpart(yend) * xgap);
        let mut intery = yend + gradient;

        // second endpoint
        let xend = x1.round();
        let yend = y1 + gradient * (xend - x1);
        let xgap = fpart(x1 + 0.5);
        let xpxl2 = xend as i64;
        let ypxl2 = yend.floor() as i64;
        self.plot(steep, xpxl2, ypxl2,     color, rfpart(yend) * xgap);
        self.plot(steep, xpxl2, ypxl2 + 1, color,  fpart(yend) * xgap);

        // in between points
        for x in xpxl1 + 1 .. xpxl2 {
            let yp = intery.floor() as i64;
            self.plot(steep, x, yp,     color, rfpart(intery));
            self.plot(steep, x, yp + 1, color,  fpart(intery));
            intery += gradient;
        }
    }

    /// Fill a triangle with a flat color, no blending
    ///
    /// Writes every sample cell of the triangle's bounding box whose
    /// center passes the inside test.
    pub fn rasterize_triangle(&mut self, x0: f64, y0: f64,
                              x1: f64, y1: f64,
                              x2: f64, y2: f64, color: Color) {
        let rate = self.sample_rate as f64;
        let (x0, y0) = (x0 * rate, y0 * rate);
        let (x1, y1) = (x1 * rate, y1 * rate);
        let (x2, y2) = (x2 * rate, y2 * rate);

        let min_x = x0.min(x1).min(x2);
        let max_x = x0.max(x1).max(x2);
        let min_y = y0.min(y1).min(y2);
        let max_y = y0.max(y1).max(y2);

        for i in min_x.floor() as i64 .. (max_x + 0.5).round() as i64 {
            for j in min_y.floor() as i64 .. (max_y + 0.5).round() as i64 {
                if in_triangle(i as f64 + 0.5, j as f64 + 0.5,
                               x0, y0, x1, y1, x2, y2) {
                    self.set_sample(i, j, color);
                }
            }
        }
    }

    /// Blit a texture into the axis aligned destination rectangle
    /// (x0,y0)-(x1,y1), sampling the base mip level with nearest filtering
    pub fn rasterize_image(&mut self, x0: f64, y0: f64, x1: f64, y1: f64,
                           tex: &Texture) {
        let rate = self.sample_rate as f64;
        let (x0, y0) = (x0 * rate, y0 * rate);
        let (x1, y1) = (x1 * rate, y1 * rate);

        let xlen = x1 - x0;
        let ylen = y1 - y0;
        // a degenerate destination covers nothing
        if xlen == 0.0 || ylen == 0.0 {
            return;
        }
        let mip = match tex.levels.first() {
            Some(mip) => mip,
            None => return,
        };
        for x in x0.floor() as i64 ..= (x1 + 0.5).round() as i64 {
            for y in y0.floor() as i64 ..= (y1 + 0.5).round() as i64 {
                let u = (x as f64 - x0) / xlen;
                let v = (y as f64 - y0) / ylen;
                let c = sampler::nearest(mip, u, v);
                self.set_sample(x, y, c);
            }
        }
    }
}
