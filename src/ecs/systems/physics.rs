//! Per-tick physics systems: dampening, gravity and collision sub-stepping.
//!
//! [`move_entities_with_collisions`] advances every physical entity to the
//! earliest contact among all eligible pairs, fires the contact effects of
//! both participants, and repeats with the time that is left until the tick
//! is used up.

use tracing::{debug, trace, warn};

use crate::ecs::behavior::{apply_collision_effects, can_entities_collide};
use crate::ecs::entity::{Entity, EntityId, Trait};
use crate::ecs::event::GameEvents;
use crate::ecs::store::Entities;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::{AccelerationVector, Time};
use crate::physics::body::Body;
use crate::physics::broadphase::AllPairs;
use crate::physics::contact::EntitiesCollision;
use crate::physics::narrowphase::collision_between_bodies;
use crate::physics::PhysicsConfig;

/// What happened during one call to [`move_entities_with_collisions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Time advanced by each sub-step, in order.
    pub sub_steps: Vec<Time>,
    pub collisions_resolved: u32,
    pub simulated: Time,
    /// Time left over when the iteration cap stopped the tick.
    pub unsimulated: Time,
    pub truncated: bool,
}

/// Entities after the tick, plus the events their effects emitted.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub entities: Entities,
    pub events: GameEvents,
    pub report: TickReport,
}

/// Slow every physical entity down by its dampening.
pub fn dampen_entities_velocity(delta: Time, entities: &mut Entities) {
    entities.map_entities_with_trait(Trait::Physical, |entity| {
        entity.map_body(|body| body.dampened(delta))
    });
}

/// Accelerate every physical entity that opted into gravity.
pub fn apply_gravity_to_entities(
    delta: Time,
    gravity: AccelerationVector,
    entities: &mut Entities,
) {
    entities.map_entities_with_trait(Trait::Physical, |entity| {
        entity.map_body(|body| body.with_gravity(gravity, delta))
    });
}

/// Advance all physical entities by `duration`, stopping at each earliest
/// contact to apply contact effects.
///
/// Stops early, leaving the rest of `duration` unsimulated, once
/// `config.max_collision_iterations` contacts have been handled.
pub fn move_entities_with_collisions(
    duration: Time,
    mut entities: Entities,
    config: &PhysicsConfig,
) -> PhysicsResult<TickOutcome> {
    let broadphase = AllPairs::new();
    let mut events = GameEvents::new();
    let mut report = TickReport::default();
    let mut remaining = duration.max(Time::ZERO);

    loop {
        if remaining <= config.time_epsilon {
            if remaining > Time::ZERO {
                advance(&mut entities, remaining);
                report.sub_steps.push(remaining);
                report.simulated += remaining;
            }
            break;
        }
        if report.collisions_resolved >= config.max_collision_iterations {
            warn!(
                "Collision iteration cap of {} reached, {} left unsimulated",
                config.max_collision_iterations, remaining
            );
            report.truncated = true;
            report.unsimulated = remaining;
            break;
        }

        let collision = find_earliest_collision(&broadphase, &entities, remaining)?;
        let step = collision
            .map_or(remaining, |c| c.time_to_impact().min(remaining))
            .max(Time::ZERO);
        advance(&mut entities, step);
        report.sub_steps.push(step);
        report.simulated += step;
        remaining -= step;

        let Some(collision) = collision else {
            break;
        };
        trace!(
            first = %collision.between_entities[0],
            second = %collision.between_entities[1],
            at = %report.simulated,
            "resolving collision"
        );
        resolve_collision(&collision, &mut entities, &mut events)?;
        report.collisions_resolved += 1;
    }

    debug!(
        sub_steps = report.sub_steps.len(),
        collisions = report.collisions_resolved,
        simulated = %report.simulated,
        "physics tick done"
    );

    Ok(TickOutcome {
        entities,
        events,
        report,
    })
}

/// Earliest contact among eligible pairs of physical entities within
/// `duration`. Ties go to the pair found first.
pub fn find_earliest_collision(
    broadphase: &AllPairs,
    entities: &Entities,
    duration: Time,
) -> PhysicsResult<Option<EntitiesCollision>> {
    let physical = physical_entities(entities)?;
    let pairs = broadphase.find_pairs(&physical, |(_, a, _), (_, b, _)| {
        can_entities_collide(a, b)
    });

    let mut earliest: Option<EntitiesCollision> = None;
    for (i, k) in pairs {
        let (id_a, _, body_a) = physical[i];
        let (id_b, _, body_b) = physical[k];
        let Some(body_collision) = collision_between_bodies(body_a, body_b, duration)? else {
            continue;
        };
        trace!(
            first = %id_a,
            second = %id_b,
            time_to_impact = %body_collision.time_to_impact,
            "collision candidate"
        );
        if earliest.map_or(true, |e| body_collision.time_to_impact < e.time_to_impact()) {
            earliest = Some(EntitiesCollision {
                body_collision,
                between_entities: [id_a, id_b],
            });
        }
    }
    Ok(earliest)
}

fn physical_entities(entities: &Entities) -> PhysicsResult<Vec<(EntityId, &Entity, &Body)>> {
    entities
        .ids_with_trait(Trait::Physical)
        .iter()
        .map(|&id| {
            let entity = entities.expect_entity(id)?;
            let body = entity.body().ok_or(PhysicsError::NotPhysical(id))?;
            Ok((id, entity, body))
        })
        .collect()
}

fn advance(entities: &mut Entities, duration: Time) {
    entities.map_entities_with_trait(Trait::Physical, |entity| {
        entity.map_body(|body| body.moved(duration))
    });
}

/// Fire the first entity's effects, then the second's with the contact seen
/// from its side. Both see the other as it was before this contact.
fn resolve_collision(
    collision: &EntitiesCollision,
    entities: &mut Entities,
    events: &mut GameEvents,
) -> PhysicsResult<()> {
    let [id_a, id_b] = collision.between_entities;
    let a = entities.expect_entity(id_a)?.clone();
    let b = entities.expect_entity(id_b)?.clone();

    let (resolved_a, events_a) = apply_collision_effects(collision, a.clone(), &b)?;
    let (resolved_b, events_b) = apply_collision_effects(&collision.swapped(), b, &a)?;

    entities
        .update_entity(id_a, |_| resolved_a)
        .ok_or(PhysicsError::MissingEntity(id_a))?;
    entities
        .update_entity(id_b, |_| resolved_b)
        .ok_or(PhysicsError::MissingEntity(id_b))?;
    events.extend(events_a);
    events.extend(events_b);
    Ok(())
}
