//! Entity identity, kinds and capability traits.

use std::fmt;

use crate::physics::body::Body;

use super::components::physics::{ContactBehaviors, Physical};

/// Store-issued identity. Dense, starts at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity type used to look up contact behaviors. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ball,
    Character,
    Wall,
    /// Kinds defined by the embedding game.
    Custom(&'static str),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Ball => f.write_str("ball"),
            EntityKind::Character => f.write_str("character"),
            EntityKind::Wall => f.write_str("wall"),
            EntityKind::Custom(name) => f.write_str(name),
        }
    }
}

/// Capability tag selecting entities for per-tick passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    /// Has a body and takes part in collisions.
    Physical,
    /// Steered by a movement behavior before physics runs.
    WithBehavior,
    BelongsToTeam,
}

impl Trait {
    pub const COUNT: usize = 3;
    pub const ALL: [Trait; Trait::COUNT] = [Trait::Physical, Trait::WithBehavior, Trait::BelongsToTeam];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of traits packed into a bitset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Traits(u8);

impl Traits {
    pub const EMPTY: Self = Self(0);

    pub const fn with(self, t: Trait) -> Self {
        Self(self.0 | t.bit())
    }

    pub const fn contains(self, t: Trait) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Trait> {
        Trait::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<Trait> for Traits {
    fn from_iter<I: IntoIterator<Item = Trait>>(iter: I) -> Self {
        iter.into_iter().fold(Traits::EMPTY, Traits::with)
    }
}

/// A game object. Identity, kind and traits never change once built;
/// capability data is public and replaced through store updates.
#[derive(Debug, Clone)]
pub struct Entity {
    id: Option<EntityId>,
    kind: EntityKind,
    traits: Traits,
    pub physical: Option<Physical>,
}

impl Entity {
    /// A new, unstored entity without capability data.
    pub fn new(kind: EntityKind, traits: Traits) -> Self {
        Self {
            id: None,
            kind,
            traits,
            physical: None,
        }
    }

    /// A new, unstored entity carrying a body. Tagged [`Trait::Physical`].
    pub fn physical(kind: EntityKind, body: Body, contact_behaviors: ContactBehaviors) -> Self {
        Self {
            id: None,
            kind,
            traits: Traits::EMPTY.with(Trait::Physical),
            physical: Some(Physical {
                body,
                contact_behaviors,
            }),
        }
    }

    /// Add a trait before the entity is stored.
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits = self.traits.with(t);
        self
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn traits(&self) -> Traits {
        self.traits
    }

    pub fn has_trait(&self, t: Trait) -> bool {
        self.traits.contains(t)
    }

    pub fn body(&self) -> Option<&Body> {
        self.physical.as_ref().map(|physical| &physical.body)
    }

    /// Replace the body through `f`. Entities without a body are returned as is.
    pub fn map_body(mut self, f: impl FnOnce(Body) -> Body) -> Self {
        if let Some(physical) = self.physical.take() {
            self.physical = Some(Physical {
                body: f(physical.body),
                contact_behaviors: physical.contact_behaviors,
            });
        }
        self
    }

    pub(crate) fn assign(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    /// Carry the identity of `original` over to a transformed copy.
    pub(crate) fn restamp(mut self, original: &Entity) -> Self {
        self.id = original.id;
        self.kind = original.kind;
        self.traits = original.traits;
        self
    }

    /// Cheap stand-in used while a stored entity is moved out of its slot.
    pub(crate) fn vacant() -> Self {
        Self::new(EntityKind::Custom(""), Traits::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{meters, Position, Velocity};

    #[test]
    fn test_traits_bitset() {
        let traits: Traits = [Trait::Physical, Trait::BelongsToTeam].into_iter().collect();
        assert!(traits.contains(Trait::Physical));
        assert!(!traits.contains(Trait::WithBehavior));
        assert_eq!(
            traits.iter().collect::<Vec<_>>(),
            vec![Trait::Physical, Trait::BelongsToTeam]
        );
        assert!(Traits::EMPTY.is_empty());
    }

    #[test]
    fn test_physical_entity_is_tagged() {
        let entity = Entity::physical(
            EntityKind::Ball,
            Body::sphere(Position::ZERO, meters(0.5)),
            ContactBehaviors::new(),
        )
        .with_trait(Trait::WithBehavior);
        assert_eq!(entity.id(), None);
        assert!(entity.has_trait(Trait::Physical));
        assert!(entity.has_trait(Trait::WithBehavior));
        assert_eq!(entity.kind().to_string(), "ball");
    }

    #[test]
    fn test_map_body() {
        let entity = Entity::physical(
            EntityKind::Custom("puck"),
            Body::sphere(Position::ZERO, meters(0.5)),
            ContactBehaviors::new(),
        )
        .map_body(|body| body.with_velocity(Velocity::new(1.0, 0.0, 0.0)));
        assert_eq!(entity.body().map(|b| b.velocity), Some(Velocity::new(1.0, 0.0, 0.0)));

        let bare = Entity::new(EntityKind::Custom("marker"), Traits::EMPTY).map_body(|b| b.stopped());
        assert!(bare.body().is_none());
    }
}
