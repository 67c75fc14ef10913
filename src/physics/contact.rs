//! Contact data produced by the narrowphase and consumed by contact effects.

use crate::ecs::EntityId;
use crate::math::{Position, Time};

/// Result of one swept test between two parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionData {
    pub time_to_impact: Time,
    /// Touch point seen from each side, relative to that side's body origin.
    pub contact_points: [Position; 2],
}

impl CollisionData {
    pub fn swapped(self) -> Self {
        let [a, b] = self.contact_points;
        Self {
            contact_points: [b, a],
            ..self
        }
    }
}

/// Earliest contact between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCollision {
    pub time_to_impact: Time,
    pub contact_points: [Position; 2],
    /// Part indices into the first and second body.
    pub between_body_parts: [usize; 2],
}

impl BodyCollision {
    pub fn new(data: CollisionData, between_body_parts: [usize; 2]) -> Self {
        Self {
            time_to_impact: data.time_to_impact,
            contact_points: data.contact_points,
            between_body_parts,
        }
    }

    /// Same contact seen from the second body.
    pub fn swapped(self) -> Self {
        let [point_a, point_b] = self.contact_points;
        let [part_a, part_b] = self.between_body_parts;
        Self {
            time_to_impact: self.time_to_impact,
            contact_points: [point_b, point_a],
            between_body_parts: [part_b, part_a],
        }
    }
}

/// Earliest contact between two stored entities. Lives for one sub-step only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitiesCollision {
    pub body_collision: BodyCollision,
    pub between_entities: [EntityId; 2],
}

impl EntitiesCollision {
    /// Same contact seen from the second entity, with everything flipped.
    pub fn swapped(self) -> Self {
        let [a, b] = self.between_entities;
        Self {
            body_collision: self.body_collision.swapped(),
            between_entities: [b, a],
        }
    }

    pub fn time_to_impact(&self) -> Time {
        self.body_collision.time_to_impact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::seconds;

    #[test]
    fn test_swapped_flips_both_sides() {
        let collision = EntitiesCollision {
            body_collision: BodyCollision {
                time_to_impact: seconds(0.25),
                contact_points: [Position::new(1.0, 0.0, 0.0), Position::new(-1.0, 0.0, 0.0)],
                between_body_parts: [0, 2],
            },
            between_entities: [EntityId::new(1), EntityId::new(4)],
        };
        let swapped = collision.swapped();
        assert_eq!(swapped.between_entities, [EntityId::new(4), EntityId::new(1)]);
        assert_eq!(swapped.body_collision.between_body_parts, [2, 0]);
        assert_eq!(
            swapped.body_collision.contact_points[0],
            Position::new(-1.0, 0.0, 0.0)
        );
        assert_eq!(swapped.time_to_impact(), seconds(0.25));
        assert_eq!(swapped.swapped(), collision);
    }
}
