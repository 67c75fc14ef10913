//! Error type shared by the physics core and the entity store.

use thiserror::Error;

use crate::ecs::EntityId;
use crate::physics::shape::ShapeKind;

/// Failures that indicate a setup bug or a store/detection desync.
///
/// Degenerate geometry and missing contact behaviors are not errors; they
/// surface as "no collision" instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("no collision test between {first} and {second} shapes")]
    UnsupportedShapePair { first: ShapeKind, second: ShapeKind },

    #[error("entity {0} is not in the store")]
    MissingEntity(EntityId),

    #[error("entity {entity} has no body part at index {index}")]
    MissingBodyPart { entity: EntityId, index: usize },

    #[error("entity {0} is indexed as physical but carries no body")]
    NotPhysical(EntityId),

    #[error("entity id {0} was not issued by this store")]
    ForeignEntityId(EntityId),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
