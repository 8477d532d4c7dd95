//! Transformations

use std::ops::{Add, Mul};

/// 2D point or extent
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, v: Vec2) -> Vec2 {
        Vec2::new(self.x + v.x, self.y + v.y)
    }
}

/// Affine Transformation
///
/// Stored as the six free components of a homogeneous 2D matrix:
///
/// ```text
/// | sx  shx tx |
/// | shy sy  ty |
/// |  0   0   1 |
/// ```
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f64) {
        let ca = angle.cos();
        let sa = angle.sin();
        let t0   = self.sx  * ca - self.shy * sa;
        let t2   = self.shx * ca - self.sy  * sa;
        let t4   = self.tx  * ca - self.ty  * sa;
        self.shy = self.sx  * sa + self.shy * ca;
        self.sy  = self.shx * sa + self.sy  * ca;
        self.ty  = self.tx  * sa + self.ty  * ca;
        self.sx  = t0;
        self.shx = t2;
        self.tx  = t4;
    }
    /// Perform the transform on an (x,y) pair
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Perform the transform on a point
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let (x, y) = self.transform(p.x, p.y);
        Vec2::new(x, y)
    }
    /// Compose with `m`; the result applies `self` first, then `m`
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        let sx  = t0;
        let shx = t2;
        let tx  = t4;
        Transform { sx, sy, tx, ty, shx, shy }
    }
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        let mut t = Self::new();
        t.scale(sx, sy);
        t
    }
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        let mut t = Self::new();
        t.translate(tx, ty);
        t
    }
    pub fn new_rotate(ang: f64) -> Transform {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}
