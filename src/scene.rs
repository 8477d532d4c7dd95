//! Scene elements
//!
//! A scene is an ordered tree of typed elements. Each element carries its
//! own geometry in model space, a fill/stroke style, and a transform
//! relative to its parent. Groups are the only interior nodes; the tree is
//! assumed acyclic.

use std::rc::Rc;

use crate::color::Color;
use crate::texture::Texture;
use crate::transform::{Transform, Vec2};

/// Fill and stroke paint of an element
///
/// A zero alpha component marks the fill or stroke as invisible.
#[derive(Debug,Default,Copy,Clone)]
pub struct Style {
    pub fill: Color,
    pub stroke: Color,
}

/// Single point drawn at the fill color
#[derive(Debug,Clone)]
pub struct Point {
    pub position: Vec2,
    pub style: Style,
    pub transform: Transform,
}

/// Line segment drawn at the stroke color
#[derive(Debug,Clone)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub style: Style,
    pub transform: Transform,
}

/// Open run of line segments between consecutive vertices
#[derive(Debug,Clone)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub style: Style,
    pub transform: Transform,
}

/// Axis-aligned rectangle in model space, filled and stroked
#[derive(Debug,Clone)]
pub struct Rect {
    pub position: Vec2,
    pub dimension: Vec2,
    pub style: Style,
    pub transform: Transform,
}

/// Closed polygon; the interior fill is produced by an external
/// [Triangulator], the outline wraps from the last vertex back to the first
#[derive(Debug,Clone)]
pub struct Polygon {
    pub points: Vec<Vec2>,
    pub style: Style,
    pub transform: Transform,
}

/// Ellipse element
///
/// Accepted in the scene model but not rendered; drawing an ellipse is a
/// no-op.
#[derive(Debug,Clone)]
pub struct Ellipse {
    pub center: Vec2,
    pub radius: Vec2,
    pub style: Style,
    pub transform: Transform,
}

/// Axis-aligned image blit between `position` and `position + dimension`
#[derive(Debug,Clone)]
pub struct Image {
    pub position: Vec2,
    pub dimension: Vec2,
    pub texture: Rc<Texture>,
    pub transform: Transform,
}

/// Ordered collection of child elements sharing a transform
#[derive(Debug,Clone)]
pub struct Group {
    pub elements: Vec<Element>,
    pub transform: Transform,
}

/// A scene element
#[derive(Debug,Clone)]
pub enum Element {
    Point(Point),
    Line(Line),
    Polyline(Polyline),
    Rect(Rect),
    Polygon(Polygon),
    Ellipse(Ellipse),
    Image(Image),
    Group(Group),
}

impl Element {
    /// The element's transform relative to its parent
    pub fn transform(&self) -> Transform {
        match self {
            Element::Point(e)    => e.transform,
            Element::Line(e)     => e.transform,
            Element::Polyline(e) => e.transform,
            Element::Rect(e)     => e.transform,
            Element::Polygon(e)  => e.transform,
            Element::Ellipse(e)  => e.transform,
            Element::Image(e)    => e.transform,
            Element::Group(e)    => e.transform,
        }
    }
}

/// A scene: canvas dimensions plus the top level elements
#[derive(Debug,Clone)]
pub struct Scene {
    /// Canvas width in canvas units
    pub width: f64,
    /// Canvas height in canvas units
    pub height: f64,
    pub elements: Vec<Element>,
}

/// Polygon triangulation collaborator
///
/// The rasterizer consumes triangulation as a black box: given the polygon
/// vertices in order, produce a flat list of triangle vertices with length
/// a multiple of three.
pub trait Triangulator {
    fn triangulate(&self, points: &[Vec2]) -> Vec<Vec2>;
}
