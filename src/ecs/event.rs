//! Events emitted by contact effects.

use std::borrow::Cow;

use super::entity::EntityId;

/// Opaque tagged record handed to the surrounding event bus. The physics core
/// never looks inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub tag: Cow<'static, str>,
    pub entity: Option<EntityId>,
}

impl GameEvent {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag: tag.into(),
            entity: None,
        }
    }

    pub fn about(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }
}

pub type GameEvents = Vec<GameEvent>;
