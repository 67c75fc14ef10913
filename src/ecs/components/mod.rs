//! Capability data attached to entities.

pub mod physics;

pub use physics::{ContactBehavior, ContactBehaviors, ContactEffect, ContactPredicate, Physical};
