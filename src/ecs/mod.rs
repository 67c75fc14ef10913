//! Entities, their store, contact behaviors and per-tick systems.

pub mod behavior;
pub mod components;
pub mod entity;
pub mod event;
pub mod factories;
pub mod store;
pub mod systems;

pub use components::{ContactBehavior, ContactBehaviors, Physical};
pub use entity::{Entity, EntityId, EntityKind, Trait, Traits};
pub use event::{GameEvent, GameEvents};
pub use store::Entities;
