//! Colors

use std::ops::{Add, Mul};

/// Convert an f64 [0,1] component to a u8 [0,255] component
///
/// Values outside [0,1] are clamped before conversion
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Convert a u8 [0,255] component to an f64 [0,1] component
pub fn color_u8_to_f64(x: u8) -> f64 {
    f64::from(x) / 255.0
}

/// Color as Red, Green, Blue, and Alpha, f64 components in [0,1]
///
/// Supports scalar weighted linear combination through `Add` and
/// `Mul<f64>`, which is how both antialiasing coverage and mip level
/// interpolation are expressed:
///
///     use softraster::Color;
///
///     let red  = Color::new(1.0, 0.0, 0.0, 1.0);
///     let blue = Color::new(0.0, 0.0, 1.0, 1.0);
///     let mid  = red * 0.5 + blue * 0.5;
///     assert_eq!(mid, Color::new(0.5, 0.0, 0.5, 1.0));
///
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Color {
    /// Red
    pub r: f64,
    /// Green
    pub g: f64,
    /// Blue
    pub b: f64,
    /// Alpha
    pub a: f64,
}

impl Color {
    /// Create new color
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }
    /// White Color (1,1,1,1)
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
    /// Black Color (0,0,0,1)
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
    /// Fully transparent color (0,0,0,0)
    pub fn clear() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
    /// Zero alpha marks a fill or stroke as invisible
    pub fn is_invisible(&self) -> bool {
        self.a == 0.0
    }
}

impl Add for Color {
    type Output = Color;
    fn add(self, c: Color) -> Color {
        Color::new(self.r + c.r, self.g + c.g, self.b + c.b, self.a + c.a)
    }
}

impl Mul<f64> for Color {
    type Output = Color;
    fn mul(self, t: f64) -> Color {
        Color::new(self.r * t, self.g * t, self.b * t, self.a * t)
    }
}

/// Linear combination of a foreground over a background color
///
/// out = bg * (1 - t) + fg * t
///
/// With a white background this approximates alpha coverage of `fg`
/// at brightness `t`; it is not source-over compositing.
pub fn blend(fg: Color, bg: Color, t: f64) -> Color {
    bg * (1.0 - t) + fg * t
}

/// Color as Red, Green, Blue, and Alpha, 8 bits per component
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for Rgba8 {
    fn from(c: Color) -> Rgba8 {
        Rgba8::new(cu8(c.r), cu8(c.g), cu8(c.b), cu8(c.a))
    }
}

impl From<Rgba8> for Color {
    fn from(c: Rgba8) -> Color {
        Color::new(color_u8_to_f64(c.r), color_u8_to_f64(c.g),
                   color_u8_to_f64(c.b), color_u8_to_f64(c.a))
    }
}
