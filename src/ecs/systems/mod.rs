//! Systems that run over the entity store once per game tick.

pub mod physics;

pub use physics::{
    apply_gravity_to_entities, dampen_entities_velocity, move_entities_with_collisions,
    TickOutcome, TickReport,
};
