//! Entity: an id plus one optional slot per component kind

use std::fmt;

use serde::{Deserialize, Serialize};

use super::component::{
    Collider, Component, ComponentKind, Health, Mover, Position, Renderer, Targeter,
};

/// Unique, monotonically assigned entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    pub health: Option<Health>,
    pub position: Option<Position>,
    pub mover: Option<Mover>,
    pub collider: Option<Collider>,
    pub renderer: Option<Renderer>,
    pub targeter: Option<Targeter>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            health: None,
            position: None,
            mover: None,
            collider: None,
            renderer: None,
            targeter: None,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attach a component, returning the one it replaced
    pub fn add(&mut self, component: Component) -> Option<Component> {
        match component {
            Component::Health(c) => self.health.replace(c).map(Component::Health),
            Component::Position(c) => self.position.replace(c).map(Component::Position),
            Component::Mover(c) => self.mover.replace(c).map(Component::Mover),
            Component::Collider(c) => self.collider.replace(c).map(Component::Collider),
            Component::Renderer(c) => self.renderer.replace(c).map(Component::Renderer),
            Component::Targeter(c) => self.targeter.replace(c).map(Component::Targeter),
        }
    }

    /// Detach the component of the given kind
    pub fn remove(&mut self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Health => self.health.take().map(Component::Health),
            ComponentKind::Position => self.position.take().map(Component::Position),
            ComponentKind::Mover => self.mover.take().map(Component::Mover),
            ComponentKind::Collider => self.collider.take().map(Component::Collider),
            ComponentKind::Renderer => self.renderer.take().map(Component::Renderer),
            ComponentKind::Targeter => self.targeter.take().map(Component::Targeter),
        }
    }

    /// Copy of the component of the given kind
    pub fn get(&self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Health => self.health.map(Component::Health),
            ComponentKind::Position => self.position.map(Component::Position),
            ComponentKind::Mover => self.mover.map(Component::Mover),
            ComponentKind::Collider => self.collider.map(Component::Collider),
            ComponentKind::Renderer => self.renderer.map(Component::Renderer),
            ComponentKind::Targeter => self.targeter.map(Component::Targeter),
        }
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    /// Mover speed, zero without a mover
    pub fn speed(&self) -> f32 {
        self.mover.map(|m| m.speed).unwrap_or(0.0)
    }
}
