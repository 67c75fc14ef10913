//! Ready-made pitch entities.

use crate::math::{kilograms, meters, meters_per_squared_second, ratio, Length, Position};
use crate::physics::body::{Body, BodyPart};
use crate::physics::shape::Shape;

use super::behavior::{always_collide, bounce, bounce_against_static, effect};
use super::components::physics::{ContactBehavior, ContactBehaviors};
use super::entity::{Entity, EntityKind, Trait};

pub const BALL_RADIUS: Length = meters(0.8);
pub const CHARACTER_RADIUS: Length = meters(0.8);

/// Behaviors shared by balls and characters: bounce off each other, bounce
/// off walls.
fn mover_behaviors() -> ContactBehaviors {
    let bouncing = ContactBehavior::new(always_collide()).on_collision(effect(bounce));
    ContactBehaviors::new()
        .with(EntityKind::Ball, bouncing.clone())
        .with(EntityKind::Character, bouncing)
        .with(
            EntityKind::Wall,
            ContactBehavior::new(always_collide()).on_collision(effect(bounce_against_static)),
        )
}

/// A ball resting at `position`.
pub fn ball(position: Position) -> Entity {
    let body = Body::sphere(position, BALL_RADIUS)
        .with_mass(kilograms(1.3))
        .with_elasticity(ratio(1.0))
        .with_dampening(meters_per_squared_second(1.0));
    Entity::physical(EntityKind::Ball, body, mover_behaviors())
}

/// A player character resting at `position`.
pub fn character(position: Position) -> Entity {
    let body = Body::sphere(position, CHARACTER_RADIUS)
        .with_mass(kilograms(1.0))
        .with_elasticity(ratio(0.7))
        .with_dampening(meters_per_squared_second(10.0));
    Entity::physical(EntityKind::Character, body, mover_behaviors())
        .with_trait(Trait::WithBehavior)
        .with_trait(Trait::BelongsToTeam)
}

/// A static wall segment from `from` to `to`, anchored at `from`.
pub fn wall(from: Position, to: Position) -> Entity {
    let body = Body::new(
        from,
        BodyPart::new(Shape::segment(Position::ZERO, to - from)),
    )
    .with_elasticity(ratio(0.9))
    .affected_by_gravity(false);
    let behaviors = ContactBehaviors::new()
        .with(EntityKind::Ball, ContactBehavior::new(always_collide()))
        .with(EntityKind::Character, ContactBehavior::new(always_collide()));
    Entity::physical(EntityKind::Wall, body, behaviors)
}
