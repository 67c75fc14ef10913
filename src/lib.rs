//! gamda physics core
//!
//! Continuous-collision rigid body simulation for a top-down pitch game.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **math** - Unit-checked quantities and vectors
//! 2. **physics** - Shapes, bodies, swept collision detection and resolution
//! 3. **ecs** - Entity store, contact behaviors and per-tick systems

pub mod ecs;
pub mod error;
pub mod math;
pub mod physics;

pub use error::{PhysicsError, PhysicsResult};

pub use math::{
    kilograms, meters, meters_per_second, meters_per_squared_second, ratio, seconds,
    AccelerationVector, Direction, Length, Mass, Position, Quantity, Ratio, Speed, Time, Vector,
    Velocity,
};

pub use physics::body::{Body, BodyPart};
pub use physics::contact::{BodyCollision, EntitiesCollision};
pub use physics::narrowphase::collision_between_bodies;
pub use physics::shape::{Segment, Shape, ShapeKind, Sphere, Triangle};
pub use physics::{PhysicsConfig, PhysicsWorld};

pub use ecs::systems::{move_entities_with_collisions, TickOutcome, TickReport};
pub use ecs::{
    ContactBehavior, ContactBehaviors, Entities, Entity, EntityId, EntityKind, GameEvent,
    GameEvents, Trait, Traits,
};

// Re-export glam for convenience
pub use glam;
