//! Rigid body model: a point mass carrying one or more shaped parts.

use crate::math::{
    kilograms, ratio, Acceleration, Length, Mass, Position, Ratio, Velocity,
};

use super::shape::{Shape, Sphere};

/// A shape anchored at an offset from its body's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPart {
    pub shape: Shape,
    pub relative_position: Position,
}

impl BodyPart {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            relative_position: Position::ZERO,
        }
    }

    pub fn at(shape: Shape, relative_position: Position) -> Self {
        Self {
            shape,
            relative_position,
        }
    }

    /// Radius when this part is a sphere.
    pub fn sphere_radius(&self) -> Option<Length> {
        match self.shape {
            Shape::Sphere(Sphere { radius }) => Some(radius),
            _ => None,
        }
    }
}

/// Physical state of a simulated object.
///
/// Bodies have no angular state. Every body owns at least one part; the
/// constructor takes the first one and [`Body::with_part`] appends more.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Position,
    pub velocity: Velocity,
    /// Speed lost per second while dampening applies.
    pub dampening: Acceleration,
    pub mass: Mass,
    /// Bounciness in `[0, 1]`. Not enforced.
    pub elasticity: Ratio,
    pub gravity_applies: bool,
    parts: Vec<BodyPart>,
}

impl Body {
    /// Create a body at rest at `position` with a single part.
    ///
    /// Defaults: mass 1 kg, elasticity 1, no dampening, gravity enabled.
    pub fn new(position: Position, part: BodyPart) -> Self {
        Self {
            position,
            velocity: Velocity::ZERO,
            dampening: Acceleration::ZERO,
            mass: kilograms(1.0),
            elasticity: ratio(1.0),
            gravity_applies: true,
            parts: vec![part],
        }
    }

    /// Single-sphere body centered on its origin.
    pub fn sphere(position: Position, radius: Length) -> Self {
        Self::new(position, BodyPart::new(Shape::sphere(radius)))
    }

    pub fn with_part(mut self, part: BodyPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_elasticity(mut self, elasticity: Ratio) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_dampening(mut self, dampening: Acceleration) -> Self {
        self.dampening = dampening;
        self
    }

    pub fn affected_by_gravity(mut self, gravity_applies: bool) -> Self {
        self.gravity_applies = gravity_applies;
        self
    }

    /// Parts in insertion order. Never empty.
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&BodyPart> {
        self.parts.get(index)
    }

    /// World-space origin of the part at `index`.
    pub fn part_position(&self, index: usize) -> Option<Position> {
        self.part(index)
            .map(|part| self.position + part.relative_position)
    }
}
