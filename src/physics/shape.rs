//! Geometric primitives attached to body parts.

use std::fmt;

use crate::math::{Length, Position, Vector, SquaredMeters};

/// Sphere in 3D, or circle when swept against segments on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: Length,
}

/// Line segment with endpoints relative to the owning part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub point_a: Position,
    pub point_b: Position,
}

impl Segment {
    /// Segment direction from `point_a` to `point_b`.
    #[inline]
    pub fn direction(&self) -> Position {
        self.point_b - self.point_a
    }

    /// Normal of the segment inside the XZ plane (not normalized).
    #[inline]
    pub fn normal_xz(&self) -> Position {
        self.direction().perpendicular_xz()
    }
}

/// Triangle with vertices relative to the owning part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Position,
    pub p2: Position,
    pub p3: Position,
}

impl Triangle {
    /// Face normal following the `p1 -> p2 -> p3` winding (not normalized).
    #[inline]
    pub fn normal(&self) -> Vector<SquaredMeters> {
        (self.p2 - self.p1).cross(self.p3 - self.p1)
    }
}

/// Closed set of shapes a body part can have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Segment(Segment),
    Triangle(Triangle),
}

impl Shape {
    pub fn sphere(radius: Length) -> Self {
        Shape::Sphere(Sphere { radius })
    }

    pub fn segment(point_a: Position, point_b: Position) -> Self {
        Shape::Segment(Segment { point_a, point_b })
    }

    pub fn triangle(p1: Position, p2: Position, p3: Position) -> Self {
        Shape::Triangle(Triangle { p1, p2, p3 })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Triangle(_) => ShapeKind::Triangle,
        }
    }
}

/// Shape tag without geometry, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Segment,
    Triangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Segment => "segment",
            ShapeKind::Triangle => "triangle",
        };
        f.write_str(name)
    }
}
