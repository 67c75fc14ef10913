//! Physics capability data carried by entities.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PhysicsResult;
use crate::physics::body::Body;
use crate::physics::contact::EntitiesCollision;

use crate::ecs::behavior::never_overlap;
use crate::ecs::entity::{Entity, EntityKind};
use crate::ecs::event::GameEvents;

/// Whether `entity` agrees to touch `other`.
pub type ContactPredicate = Arc<dyn Fn(&Entity, &Entity) -> bool + Send + Sync>;

/// Effect fired on the invoking entity when it collides with `other`.
///
/// Receives the invoking entity by value and returns its new version plus any
/// events. `other` is the counterpart as it was before any effect of this
/// contact ran. The collision is seen from the invoking entity.
pub type ContactEffect = Arc<
    dyn Fn(&EntitiesCollision, Entity, &Entity) -> PhysicsResult<(Entity, GameEvents)>
        + Send
        + Sync,
>;

/// Body plus the per-kind rules for touching other entities.
#[derive(Debug, Clone)]
pub struct Physical {
    pub body: Body,
    pub contact_behaviors: ContactBehaviors,
}

/// Rules against one kind of counterpart.
#[derive(Clone)]
pub struct ContactBehavior {
    pub does_collide: ContactPredicate,
    /// Applied in order; each sees the result of the previous one.
    pub on_collision: Vec<ContactEffect>,
    pub does_overlap: ContactPredicate,
    /// Not invoked by the tick scheduler.
    pub on_overlap: Vec<ContactEffect>,
}

impl ContactBehavior {
    /// Collides through `does_collide`, no effects, never overlaps.
    pub fn new(does_collide: ContactPredicate) -> Self {
        Self {
            does_collide,
            on_collision: Vec::new(),
            does_overlap: never_overlap(),
            on_overlap: Vec::new(),
        }
    }

    pub fn on_collision(mut self, effect: ContactEffect) -> Self {
        self.on_collision.push(effect);
        self
    }

    pub fn overlapping(mut self, does_overlap: ContactPredicate) -> Self {
        self.does_overlap = does_overlap;
        self
    }

    pub fn on_overlap(mut self, effect: ContactEffect) -> Self {
        self.on_overlap.push(effect);
        self
    }
}

impl fmt::Debug for ContactBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactBehavior")
            .field("on_collision", &self.on_collision.len())
            .field("on_overlap", &self.on_overlap.len())
            .finish_non_exhaustive()
    }
}

/// Behaviors keyed by the counterpart's kind. A missing kind means the two
/// never interact.
#[derive(Debug, Clone, Default)]
pub struct ContactBehaviors {
    by_kind: HashMap<EntityKind, ContactBehavior>,
}

impl ContactBehaviors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: EntityKind, behavior: ContactBehavior) -> Self {
        self.by_kind.insert(kind, behavior);
        self
    }

    pub fn get(&self, kind: EntityKind) -> Option<&ContactBehavior> {
        self.by_kind.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}
