//! Viewbox
//!
//! Thin helper mapping a square view into canvas space onto the unit
//! square, composable up to a full canvas-to-screen transform.

use crate::transform::Transform;

/// A square view into canvas space, centered on (x,y) with half extent
/// `span`
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Viewport {
    x: f64,
    y: f64,
    span: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, span: f64) -> Self {
        Viewport { x, y, span }
    }
    /// Re-center the viewbox
    pub fn set_viewbox(&mut self, x: f64, y: f64, span: f64) {
        self.x = x;
        self.y = y;
        self.span = span;
    }
    /// Pan by (dx,dy) and zoom by `scale`
    pub fn update_viewbox(&mut self, dx: f64, dy: f64, scale: f64) {
        self.x -= dx;
        self.y -= dy;
        self.span *= scale;
    }
    /// Canvas to normalized device coordinates
    ///
    /// The viewbox `[x - span, x + span] x [y - span, y + span]` maps onto
    /// the unit square.
    pub fn canvas_to_norm(&self) -> Transform {
        let s = 1.0 / (2.0 * self.span);
        Transform {
            sx: s, sy: s,
            shx: 0.0, shy: 0.0,
            tx: (self.span - self.x) * s,
            ty: (self.span - self.y) * s,
        }
    }
    /// Canvas to screen space for a `width x height` pixel target
    pub fn canvas_to_screen(&self, width: f64, height: f64) -> Transform {
        self.canvas_to_norm() * Transform::new_scale(width, height)
    }
}
