//! Stock contact predicates and collision effects.

use std::sync::Arc;

use crate::error::{PhysicsError, PhysicsResult};
use crate::math::{Length, Velocity};
use crate::physics::body::{Body, BodyPart};
use crate::physics::contact::EntitiesCollision;
use crate::physics::shape::Shape;
use crate::physics::solver::{
    circle_bounce_of_static_segment, sphere_bounce_of_sphere, sphere_bounce_of_static_triangle,
};

use super::components::physics::{ContactBehavior, ContactEffect, ContactPredicate};
use super::entity::{Entity, EntityId};
use super::event::GameEvents;

pub fn always_collide() -> ContactPredicate {
    Arc::new(|_, _| true)
}

pub fn never_collide() -> ContactPredicate {
    Arc::new(|_, _| false)
}

pub fn always_overlap() -> ContactPredicate {
    always_collide()
}

pub fn never_overlap() -> ContactPredicate {
    never_collide()
}

/// True while the two body origins are at most `range` apart.
pub fn within_range(range: Length) -> ContactPredicate {
    Arc::new(move |entity, other| match (entity.body(), other.body()) {
        (Some(a), Some(b)) => a.position.distance_squared(b.position) <= range.squared().value(),
        _ => false,
    })
}

/// Wrap a plain function as a collision effect.
pub fn effect<F>(f: F) -> ContactEffect
where
    F: Fn(&EntitiesCollision, Entity, &Entity) -> PhysicsResult<(Entity, GameEvents)>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

fn behavior_against<'a>(entity: &'a Entity, other: &Entity) -> Option<&'a ContactBehavior> {
    entity
        .physical
        .as_ref()
        .and_then(|physical| physical.contact_behaviors.get(other.kind()))
}

/// Both sides must have a behavior for each other and both must agree.
pub fn can_entities_collide(a: &Entity, b: &Entity) -> bool {
    match (behavior_against(a, b), behavior_against(b, a)) {
        (Some(a_vs_b), Some(b_vs_a)) => (a_vs_b.does_collide)(a, b) && (b_vs_a.does_collide)(b, a),
        _ => false,
    }
}

/// Overlap counterpart of [`can_entities_collide`].
pub fn can_entities_overlap(a: &Entity, b: &Entity) -> bool {
    match (behavior_against(a, b), behavior_against(b, a)) {
        (Some(a_vs_b), Some(b_vs_a)) => (a_vs_b.does_overlap)(a, b) && (b_vs_a.does_overlap)(b, a),
        _ => false,
    }
}

/// Run `entity`'s collision effects against `other` in registration order.
///
/// `collision` must already be seen from `entity`.
pub fn apply_collision_effects(
    collision: &EntitiesCollision,
    entity: Entity,
    other: &Entity,
) -> PhysicsResult<(Entity, GameEvents)> {
    let effects = match behavior_against(&entity, other) {
        Some(behavior) => behavior.on_collision.clone(),
        None => return Ok((entity, GameEvents::new())),
    };

    let mut events = GameEvents::new();
    let mut current = entity;
    for effect in &effects {
        let (next, emitted) = effect(collision, current, other)?;
        current = next;
        events.extend(emitted);
    }
    Ok((current, events))
}

/// Stop the invoking entity.
pub fn block(
    _collision: &EntitiesCollision,
    entity: Entity,
    _other: &Entity,
) -> PhysicsResult<(Entity, GameEvents)> {
    Ok((entity.map_body(Body::stopped), GameEvents::new()))
}

/// Elastic bounce between two spheres. Other part pairs are left unchanged.
pub fn bounce(
    collision: &EntitiesCollision,
    entity: Entity,
    other: &Entity,
) -> PhysicsResult<(Entity, GameEvents)> {
    let (body, part) = colliding_part(collision, &entity, 0)?;
    let (other_body, other_part) = colliding_part(collision, other, 1)?;

    let velocity = match (part.shape, other_part.shape) {
        (Shape::Sphere(_), Shape::Sphere(_)) => Some(sphere_bounce_of_sphere(
            body,
            part.relative_position,
            other_body,
            other_part.relative_position,
        )),
        _ => None,
    };
    Ok((with_velocity(entity, velocity), GameEvents::new()))
}

/// Bounce off a static segment or triangle. Other part pairs are left
/// unchanged.
pub fn bounce_against_static(
    collision: &EntitiesCollision,
    entity: Entity,
    other: &Entity,
) -> PhysicsResult<(Entity, GameEvents)> {
    let (body, part) = colliding_part(collision, &entity, 0)?;
    let (other_body, other_part) = colliding_part(collision, other, 1)?;

    let velocity = match (part.shape, other_part.shape) {
        (Shape::Sphere(_), Shape::Segment(segment)) => Some(circle_bounce_of_static_segment(
            body,
            part.relative_position,
            other_body,
            other_part.relative_position,
            &segment,
            &collision.body_collision,
        )),
        (Shape::Sphere(_), Shape::Triangle(triangle)) => Some(sphere_bounce_of_static_triangle(
            body,
            other_body,
            &triangle,
        )),
        _ => None,
    };
    Ok((with_velocity(entity, velocity), GameEvents::new()))
}

/// Body and colliding part of one side of `collision`.
fn colliding_part<'a>(
    collision: &EntitiesCollision,
    entity: &'a Entity,
    side: usize,
) -> PhysicsResult<(&'a Body, &'a BodyPart)> {
    let id: EntityId = collision.between_entities[side];
    let index = collision.body_collision.between_body_parts[side];
    let body = entity.body().ok_or(PhysicsError::NotPhysical(id))?;
    let part = body
        .part(index)
        .ok_or(PhysicsError::MissingBodyPart { entity: id, index })?;
    Ok((body, part))
}

fn with_velocity(entity: Entity, velocity: Option<Velocity>) -> Entity {
    match velocity {
        Some(velocity) => entity.map_body(|body| body.with_velocity(velocity)),
        None => entity,
    }
}
