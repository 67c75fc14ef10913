//! Continuous-collision rigid body physics.
//!
//! # Architecture
//!
//! One game tick runs in this order:
//!
//! 1. Dampen velocities
//! 2. Apply gravity to bodies that opted in
//! 3. Find the earliest swept contact over all eligible pairs (broadphase
//!    enumeration, narrowphase sweeps)
//! 4. Move every body up to that contact
//! 5. Resolve the contact through both entities' contact effects (solver)
//! 6. Repeat from 3 with the remaining time

pub mod body;
pub mod broadphase;
pub mod contact;
pub mod motion;
pub mod narrowphase;
pub mod shape;
pub mod solver;

use crate::ecs::store::Entities;
use crate::ecs::systems::physics::{
    apply_gravity_to_entities, dampen_entities_velocity, move_entities_with_collisions,
    TickOutcome,
};
use crate::error::PhysicsResult;
use crate::math::{seconds, AccelerationVector, Time};

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity vector. Default: zero (top-down pitch).
    pub gravity: AccelerationVector,
    /// Contacts resolved per tick before the rest of the tick is dropped.
    /// Default: 256.
    pub max_collision_iterations: u32,
    /// Remaining tick time at or below this is advanced without collision
    /// checks. Default: 1e-9 s.
    pub time_epsilon: Time,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: AccelerationVector::ZERO,
            max_collision_iterations: 256,
            time_epsilon: seconds(1e-9),
        }
    }
}

/// Runs game ticks over an entity store.
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Step the simulation forward by `delta`.
    ///
    /// Dampening and gravity apply once, before collision sub-stepping.
    pub fn step(&self, mut entities: Entities, delta: Time) -> PhysicsResult<TickOutcome> {
        dampen_entities_velocity(delta, &mut entities);
        if !self.config.gravity.is_zero() {
            apply_gravity_to_entities(delta, self.config.gravity, &mut entities);
        }
        move_entities_with_collisions(delta, entities, &self.config)
    }
}
