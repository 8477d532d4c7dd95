//! Renderer
//!
//! The [Renderer] owns the supersample buffer and drives a frame: walk the
//! scene composing transforms, rasterize each element at `sample_rate x`
//! resolution, overlay the canvas border, and resolve down into the
//! caller's render target.

use std::fmt;

use log::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::scene::{Element, Group, Image, Line, Point, Polygon, Polyline, Rect, Scene,
                   Triangulator};
use crate::transform::{Transform, Vec2};

/// Rendering errors
#[derive(Debug,PartialEq)]
pub enum RenderError {
    /// The supersample buffer could not be allocated
    OutOfMemory { bytes: usize },
    /// A render target buffer does not match its stated dimensions
    TargetSize { expected: usize, actual: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::OutOfMemory { bytes } => {
                write!(f, "cannot allocate {} byte supersample buffer", bytes)
            }
            RenderError::TargetSize { expected, actual } => {
                write!(f, "render target holds {} bytes, dimensions require {}",
                       actual, expected)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Caller owned output pixels
///
/// Wraps a borrowed buffer of `4 * width * height` interleaved RGBA8
/// bytes, row-major, origin top-left. The core only writes into it during
/// [resolve].
///
/// [resolve]: Renderer::resolve
#[derive(Debug)]
pub struct RenderTarget<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> RenderTarget<'a> {
    /// Bind a caller owned buffer as the render target
    pub fn new(data: &'a mut [u8], width: usize, height: usize)
        -> Result<Self, RenderError>
    {
        let expected = width.checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(RenderError::TargetSize { expected, actual: data.len() });
        }
        Ok(RenderTarget { data, width, height })
    }
    /// Target width in pixels
    pub fn width(&self) -> usize {
        self.width
    }
    /// Target height in pixels
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Scene renderer, generic over the external polygon triangulator
pub struct Renderer<T: Triangulator> {
    triangulator: T,
    pub(crate) sample_rate: usize,
    canvas_to_screen: Transform,
    pub(crate) samples: PixelBuffer,
}

impl<T: Triangulator> Renderer<T> {
    /// Create a renderer at sample rate 1 with an identity
    /// canvas-to-screen transform
    pub fn new(triangulator: T) -> Self {
        Renderer {
            triangulator,
            sample_rate: 1,
            canvas_to_screen: Transform::new(),
            samples: PixelBuffer::default(),
        }
    }
    /// Current supersampling rate
    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }
    /// Set the supersampling rate; values below 1 are clamped up to 1
    ///
    /// Drops the supersample buffer: its size depends on the rate, and
    /// [begin] is the only allocation point.
    ///
    /// [begin]: Renderer::begin
    pub fn set_sample_rate(&mut self, rate: usize) {
        self.sample_rate = rate.max(1);
        self.samples = PixelBuffer::default();
    }
    /// Set the transform from canvas space to screen space
    pub fn set_canvas_to_screen(&mut self, t: Transform) {
        self.canvas_to_screen = t;
    }
    /// Reset the supersample buffer for a frame at the given target size
    ///
    /// Allocates `(width * rate) x (height * rate)` opaque white samples,
    /// reusing the existing allocation when the size is unchanged.
    pub fn begin(&mut self, target_w: usize, target_h: usize)
        -> Result<(), RenderError>
    {
        let w = target_w.saturating_mul(self.sample_rate);
        let h = target_h.saturating_mul(self.sample_rate);
        if self.samples.width == w && self.samples.height == h {
            self.samples.clear();
            return Ok(());
        }
        debug!("supersample buffer {}x{}", w, h);
        self.samples = PixelBuffer::try_new(w, h).map_err(|_| {
            RenderError::OutOfMemory { bytes: w.saturating_mul(h).saturating_mul(4) }
        })?;
        Ok(())
    }

    /// Render a scene into the target
    ///
    /// Resets the supersample buffer, walks every element under the
    /// canvas-to-screen transform, overlays the canvas border, and
    /// resolves into `target`.
    pub fn draw(&mut self, scene: &Scene, target: &mut RenderTarget)
        -> Result<(), RenderError>
    {
        self.begin(target.width(), target.height())?;
        let root = self.canvas_to_screen;
        for element in &scene.elements {
            self.draw_element(element, root);
        }
        self.draw_canvas_border(scene.width, scene.height, root);
        self.resolve(target);
        Ok(())
    }

    fn draw_element(&mut self, element: &Element, parent: Transform) {
        // the composed transform travels by value down the recursion, so
        // a subtree can never leak its transform into a sibling
        let t = element.transform() * parent;
        match element {
            Element::Point(point)       => self.draw_point(point, t),
            Element::Line(line)         => self.draw_line(line, t),
            Element::Polyline(polyline) => self.draw_polyline(polyline, t),
            Element::Rect(rect)         => self.draw_rect(rect, t),
            Element::Polygon(polygon)   => self.draw_polygon(polygon, t),
            // ellipse rendering is not implemented, see scene::Ellipse
            Element::Ellipse(_)         => {}
            Element::Image(image)       => self.draw_image(image, t),
            Element::Group(group)       => self.draw_group(group, t),
        }
    }

    fn draw_point(&mut self, point: &Point, t: Transform) {
        let p = t.apply(point.position);
        self.rasterize_point(p.x, p.y, point.style.fill);
    }

    fn draw_line(&mut self, line: &Line, t: Transform) {
        let c = line.style.stroke;
        if c.is_invisible() {
            return;
        }
        let p0 = t.apply(line.from);
        let p1 = t.apply(line.to);
        self.rasterize_line(p0.x, p0.y, p1.x, p1.y, c);
    }

    fn draw_polyline(&mut self, polyline: &Polyline, t: Transform) {
        let c = polyline.style.stroke;
        if c.is_invisible() {
            return;
        }
        // open: consecutive pairs only, no wrap back to the start
        for pair in polyline.points.windows(2) {
            let p0 = t.apply(pair[0]);
            let p1 = t.apply(pair[1]);
            self.rasterize_line(p0.x, p0.y, p1.x, p1.y, c);
        }
    }

    fn draw_rect(&mut self, rect: &Rect, t: Transform) {
        let x = rect.position.x;
        let y = rect.position.y;
        let w = rect.dimension.x;
        let h = rect.dimension.y;

        let p0 = t.apply(Vec2::new(x,     y    ));
        let p1 = t.apply(Vec2::new(x + w, y    ));
        let p2 = t.apply(Vec2::new(x,     y + h));
        let p3 = t.apply(Vec2::new(x + w, y + h));

        // draw fill as two triangles
        let c = rect.style.fill;
        if !c.is_invisible() {
            self.rasterize_triangle(p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, c);
            self.rasterize_triangle(p2.x, p2.y, p1.x, p1.y, p3.x, p3.y, c);
        }

        // draw outline
        let c = rect.style.stroke;
        if !c.is_invisible() {
            self.rasterize_line(p0.x, p0.y, p1.x, p1.y, c);
            self.rasterize_line(p1.x, p1.y, p3.x, p3.y, c);
            self.rasterize_line(p3.x, p3.y, p2.x, p2.y, c);
            self.rasterize_line(p2.x, p2.y, p0.x, p0.y, c);
        }
    }

    fn draw_polygon(&mut self, polygon: &Polygon, t: Transform) {
        // draw fill over the external triangulation
        let c = polygon.style.fill;
        if !c.is_invisible() {
            let triangles = self.triangulator.triangulate(&polygon.points);
            for tri in triangles.chunks_exact(3) {
                let p0 = t.apply(tri[0]);
                let p1 = t.apply(tri[1]);
                let p2 = t.apply(tri[2]);
                self.rasterize_triangle(p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, c);
            }
        }

        // draw outline, closed back to the first vertex
        let c = polygon.style.stroke;
        if !c.is_invisible() {
            let n = polygon.points.len();
            for i in 0 .. n {
                let p0 = t.apply(polygon.points[i]);
                let p1 = t.apply(polygon.points[(i + 1) % n]);
                self.rasterize_line(p0.x, p0.y, p1.x, p1.y, c);
            }
        }
    }

    fn draw_image(&mut self, image: &Image, t: Transform) {
        let p0 = t.apply(image.position);
        let p1 = t.apply(image.position + image.dimension);
        self.rasterize_image(p0.x, p0.y, p1.x, p1.y, &image.texture);
    }

    fn draw_group(&mut self, group: &Group, t: Transform) {
        for element in &group.elements {
            self.draw_element(element, t);
        }
    }

    /// Overlay the canvas outline: four black lines through the canvas
    /// corners, each corner outset by one screen unit
    fn draw_canvas_border(&mut self, width: f64, height: f64, t: Transform) {
        let mut a = t.apply(Vec2::new(0.0,   0.0));    a.x -= 1.0; a.y += 1.0;
        let mut b = t.apply(Vec2::new(width, 0.0));    b.x += 1.0; b.y += 1.0;
        let mut c = t.apply(Vec2::new(0.0,   height)); c.x -= 1.0; c.y -= 1.0;
        let mut d = t.apply(Vec2::new(width, height)); d.x += 1.0; d.y -= 1.0;

        self.rasterize_line(a.x, a.y, b.x, b.y, Color::black());
        self.rasterize_line(a.x, a.y, c.x, c.y, Color::black());
        self.rasterize_line(d.x, d.y, b.x, b.y, Color::black());
        self.rasterize_line(d.x, d.y, c.x, c.y, Color::black());
    }

    /// Box filter the supersample buffer down into the render target
    ///
    /// Each output pixel averages the alpha weighted R, G, B of its
    /// `rate x rate` sample block; output alpha is forced opaque. The
    /// target is overwritten wholesale, never composited against.
    pub fn resolve(&self, target: &mut RenderTarget) {
        let rate = self.sample_rate;
        if self.samples.width != target.width * rate
            || self.samples.height != target.height * rate
        {
            warn!("resolve skipped: supersample buffer {}x{} does not cover \
                   target {}x{} at rate {}",
                  self.samples.width, self.samples.height,
                  target.width, target.height, rate);
            return;
        }
        let num_samples = (rate * rate) as f64;
        for sy in 0 .. target.height {
            for sx in 0 .. target.width {
                let (mut rsum, mut gsum, mut bsum) = (0.0, 0.0, 0.0);
                for y in 0 .. rate {
                    for x in 0 .. rate {
                        let s = &self.samples[(sx * rate + x, sy * rate + y)];
                        let a = f64::from(s[3]) / 255.0;
                        rsum += f64::from(s[0]) * a;
                        gsum += f64::from(s[1]) * a;
                        bsum += f64::from(s[2]) * a;
                    }
                }
                let i = 4 * (sy * target.width + sx);
                target.data[i]     = (rsum / num_samples) as u8;
                target.data[i + 1] = (gsum / num_samples) as u8;
                target.data[i + 2] = (bsum / num_samples) as u8;
                target.data[i + 3] = 255;
            }
        }
    }
}
