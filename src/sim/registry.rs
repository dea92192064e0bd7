//! Entity registry
//!
//! Entities live in one `Vec` in insertion order. Ids are handed out
//! monotonically and removal preserves order, so the `Vec` is always
//! sorted by id and lookups are a binary search.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::component::{Component, ComponentKind};
use super::entity::{Entity, EntityId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a fresh entity with no components
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity::new(id));
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id()).ok()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |i| &mut self.entities[i])
    }

    /// Attach a component, overwriting any of the same kind.
    ///
    /// Returns the replaced component; unknown ids are ignored.
    pub fn add_component(
        &mut self,
        id: EntityId,
        component: impl Into<Component>,
    ) -> Option<Component> {
        let entity = self.get_mut(id)?;
        entity.add(component.into())
    }

    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> Option<Component> {
        let removed = self.get_mut(id)?.remove(kind);
        if removed.is_some() {
            log::trace!("Removed {} from {}", kind.as_str(), id);
        }
        removed
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity at a registry index (systems walk by index to interleave reads and writes)
    pub fn at(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Unlink an entity, keeping the order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        Some(self.entities.remove(index))
    }

    /// Unlink every listed entity in one sweep
    pub fn remove_all(&mut self, ids: &[EntityId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.entities.len();
        self.entities.retain(|e| !ids.contains(&e.id()));
        before - self.entities.len()
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.get(id)?.position.map(|p| p.0)
    }

    /// Live position of the entity's target, if the target still exists
    pub fn resolve_target(&self, id: EntityId) -> Option<Vec2> {
        let target = self.get(id)?.targeter?.target;
        self.position_of(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::component::{Health, Position, Targeter};
    use proptest::prelude::*;

    #[test]
    fn test_create_assigns_unique_ids_in_order() {
        let mut registry = Registry::new();
        let a = registry.create_entity();
        let b = registry.create_entity();
        let c = registry.create_entity();
        assert!(a < b && b < c);
        assert_eq!(registry.ids(), vec![a, b, c]);
    }

    #[test]
    fn test_add_then_lookup_returns_component() {
        let mut registry = Registry::new();
        let id = registry.create_entity();
        registry.add_component(id, Health::new(5.0));
        assert_eq!(registry.get(id).and_then(|e| e.health), Some(Health::new(5.0)));

        let replaced = registry.add_component(id, Health::new(2.0));
        assert_eq!(replaced, Some(Component::Health(Health::new(5.0))));
        assert_eq!(registry.get(id).and_then(|e| e.health), Some(Health::new(2.0)));
    }

    #[test]
    fn test_remove_component() {
        let mut registry = Registry::new();
        let id = registry.create_entity();
        registry.add_component(id, Position(Vec2::ONE));
        assert!(registry.remove_component(id, ComponentKind::Position).is_some());
        assert_eq!(registry.position_of(id), None);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut registry = Registry::new();
        let ids: Vec<_> = (0..5).map(|_| registry.create_entity()).collect();
        registry.remove(ids[1]);
        assert_eq!(registry.ids(), vec![ids[0], ids[2], ids[3], ids[4]]);
        assert!(registry.get(ids[3]).is_some());
        assert!(registry.remove(ids[1]).is_none());
    }

    #[test]
    fn test_resolve_missing_target_is_none() {
        let mut registry = Registry::new();
        let target = registry.create_entity();
        registry.add_component(target, Position(Vec2::new(3.0, 4.0)));
        let chaser = registry.create_entity();
        registry.add_component(chaser, Targeter { target });

        assert_eq!(registry.resolve_target(chaser), Some(Vec2::new(3.0, 4.0)));
        registry.remove(target);
        assert_eq!(registry.resolve_target(chaser), None);
    }

    proptest! {
        #[test]
        fn remove_all_drops_exactly_the_listed_ids(
            count in 1usize..40,
            mask in proptest::collection::vec(any::<bool>(), 40),
        ) {
            let mut registry = Registry::new();
            let ids: Vec<_> = (0..count).map(|_| registry.create_entity()).collect();
            let (doomed, survivors): (Vec<_>, Vec<_>) =
                ids.iter().zip(&mask).partition(|(_, m)| **m);
            let doomed: Vec<EntityId> = doomed.into_iter().map(|(id, _)| *id).collect();
            let survivors: Vec<EntityId> = survivors.into_iter().map(|(id, _)| *id).collect();

            let removed = registry.remove_all(&doomed);
            prop_assert_eq!(removed, doomed.len());
            prop_assert_eq!(registry.ids(), survivors);
        }
    }
}
