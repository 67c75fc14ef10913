//! Arena entity store with a per-trait index.

use crate::error::{PhysicsError, PhysicsResult};

use super::entity::{Entity, EntityId, Trait};

/// Entities in slots indexed by `id - 1`, plus one id list per trait.
///
/// Ids are handed out densely from 1 and never reused. Trait membership is
/// recorded once, when an entity is first stored.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    slots: Vec<Entity>,
    by_trait: [Vec<EntityId>; Trait::COUNT],
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity or overwrite a stored one.
    ///
    /// Entities without an id get the next one and are indexed under each of
    /// their traits. Entities with an id replace their slot without touching
    /// the index.
    pub fn store_entity(&mut self, mut entity: Entity) -> PhysicsResult<EntityId> {
        match entity.id() {
            Some(id) => {
                let slot = self
                    .slot_mut(id)
                    .ok_or(PhysicsError::ForeignEntityId(id))?;
                let updated = entity.restamp(slot);
                *slot = updated;
                Ok(id)
            }
            None => {
                let id = EntityId::new(self.slots.len() as u32 + 1);
                entity.assign(id);
                for t in entity.traits().iter() {
                    self.by_trait[t.index()].push(id);
                }
                self.slots.push(entity);
                Ok(id)
            }
        }
    }

    /// Store every entity in order, returning their ids.
    pub fn store_many(
        &mut self,
        entities: impl IntoIterator<Item = Entity>,
    ) -> PhysicsResult<Vec<EntityId>> {
        entities
            .into_iter()
            .map(|entity| self.store_entity(entity))
            .collect()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.slots.get(index)
    }

    /// Like [`Entities::get`], for ids that must exist.
    pub fn expect_entity(&self, id: EntityId) -> PhysicsResult<&Entity> {
        self.get(id).ok_or(PhysicsError::MissingEntity(id))
    }

    /// Replace a stored entity with `f` applied to it. Identity, kind and
    /// traits of the result are reset to the stored ones.
    ///
    /// Returns `None` when `id` is unknown.
    pub fn update_entity(
        &mut self,
        id: EntityId,
        f: impl FnOnce(Entity) -> Entity,
    ) -> Option<&Entity> {
        let slot = self.slot_mut(id)?;
        replace_with(slot, f);
        Some(&*slot)
    }

    /// Apply `f` to every entity indexed under `t`, in insertion order.
    pub fn map_entities_with_trait(&mut self, t: Trait, mut f: impl FnMut(Entity) -> Entity) {
        let Self { slots, by_trait } = self;
        for id in &by_trait[t.index()] {
            if let Some(slot) = (id.get() as usize)
                .checked_sub(1)
                .and_then(|index| slots.get_mut(index))
            {
                replace_with(slot, &mut f);
            }
        }
    }

    /// Ids indexed under `t`, in insertion order.
    pub fn ids_with_trait(&self, t: Trait) -> &[EntityId] {
        &self.by_trait[t.index()]
    }

    /// Entities indexed under `t`, in insertion order.
    pub fn with_trait(&self, t: Trait) -> impl Iterator<Item = &Entity> + '_ {
        self.by_trait[t.index()].iter().filter_map(|id| self.get(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Highest id issued so far.
    pub fn last_entity_id(&self) -> Option<EntityId> {
        (!self.slots.is_empty()).then(|| EntityId::new(self.slots.len() as u32))
    }

    fn slot_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.slots.get_mut(index)
    }
}

fn replace_with(slot: &mut Entity, f: impl FnOnce(Entity) -> Entity) {
    let current = std::mem::replace(slot, Entity::vacant());
    let identity = Entity::vacant().restamp(&current);
    *slot = f(current).restamp(&identity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::ContactBehaviors;
    use crate::ecs::entity::{EntityKind, Traits};
    use crate::math::{meters, Position, Velocity};
    use crate::physics::body::Body;

    fn ball() -> Entity {
        Entity::physical(
            EntityKind::Ball,
            Body::sphere(Position::ZERO, meters(0.5)),
            ContactBehaviors::new(),
        )
    }

    #[test]
    fn test_ids_are_dense_from_one() {
        let mut entities = Entities::new();
        assert_eq!(entities.last_entity_id(), None);
        let first = entities.store_entity(ball()).unwrap();
        let second = entities
            .store_entity(Entity::new(EntityKind::Custom("marker"), Traits::EMPTY))
            .unwrap();
        assert_eq!(first, EntityId::new(1));
        assert_eq!(second, EntityId::new(2));
        assert_eq!(entities.last_entity_id(), Some(second));
        assert_eq!(entities.get(first).and_then(Entity::id), Some(first));
    }

    #[test]
    fn test_trait_index() {
        let mut entities = Entities::new();
        let a = entities.store_entity(ball()).unwrap();
        let _ = entities
            .store_entity(Entity::new(EntityKind::Custom("marker"), Traits::EMPTY))
            .unwrap();
        let c = entities
            .store_entity(ball().with_trait(Trait::WithBehavior))
            .unwrap();
        assert_eq!(entities.ids_with_trait(Trait::Physical), &[a, c]);
        assert_eq!(entities.ids_with_trait(Trait::WithBehavior), &[c]);
        assert!(entities.ids_with_trait(Trait::BelongsToTeam).is_empty());
    }

    #[test]
    fn test_restore_overwrites_without_reindexing() {
        let mut entities = Entities::new();
        let id = entities.store_entity(ball()).unwrap();
        let moved = entities
            .get(id)
            .cloned()
            .unwrap()
            .map_body(|b| b.with_velocity(Velocity::new(1.0, 0.0, 0.0)));
        assert_eq!(entities.store_entity(moved).unwrap(), id);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities.ids_with_trait(Trait::Physical), &[id]);
        assert_eq!(
            entities.get(id).and_then(Entity::body).map(|b| b.velocity),
            Some(Velocity::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn test_unknown_ids() {
        let mut entities = Entities::new();
        assert!(entities.get(EntityId::new(3)).is_none());
        assert!(entities.get(EntityId::new(0)).is_none());
        assert!(entities.update_entity(EntityId::new(1), |e| e).is_none());
        assert_eq!(
            entities.expect_entity(EntityId::new(3)).unwrap_err(),
            PhysicsError::MissingEntity(EntityId::new(3))
        );

        let mut other = Entities::new();
        other.store_entity(ball()).unwrap();
        other.store_entity(ball()).unwrap();
        let foreign = other.get(EntityId::new(2)).cloned().unwrap();
        assert_eq!(
            entities.store_entity(foreign).unwrap_err(),
            PhysicsError::ForeignEntityId(EntityId::new(2))
        );
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut entities = Entities::new();
        let id = entities.store_entity(ball()).unwrap();
        let updated = entities
            .update_entity(id, |_| Entity::new(EntityKind::Wall, Traits::EMPTY))
            .unwrap();
        assert_eq!(updated.id(), Some(id));
        assert_eq!(updated.kind(), EntityKind::Ball);
        assert!(updated.has_trait(Trait::Physical));
    }

    #[test]
    fn test_map_entities_with_trait_only_touches_members() {
        let mut entities = Entities::new();
        let a = entities.store_entity(ball()).unwrap();
        let b = entities
            .store_entity(ball().with_trait(Trait::WithBehavior))
            .unwrap();
        entities.map_entities_with_trait(Trait::WithBehavior, |e| {
            e.map_body(|body| body.with_velocity(Velocity::new(0.0, 0.0, 2.0)))
        });
        let velocity = |id| entities.get(id).and_then(Entity::body).map(|b| b.velocity);
        assert_eq!(velocity(a), Some(Velocity::ZERO));
        assert_eq!(velocity(b), Some(Velocity::new(0.0, 0.0, 2.0)));
    }
}
