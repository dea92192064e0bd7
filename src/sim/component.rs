//! Component data and the behavior rules attached to it
//!
//! Behavior is a tag on the component, interpreted by the systems in
//! `tick.rs`. Components never hold references to other entities; a
//! `Targeter` stores an id that is resolved through the registry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// The six kinds of component an entity can carry (at most one of each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Health,
    Position,
    Mover,
    Collider,
    Renderer,
    Targeter,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Health,
        ComponentKind::Position,
        ComponentKind::Mover,
        ComponentKind::Collider,
        ComponentKind::Renderer,
        ComponentKind::Targeter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Health => "health",
            ComponentKind::Position => "position",
            ComponentKind::Mover => "mover",
            ComponentKind::Collider => "collider",
            ComponentKind::Renderer => "renderer",
            ComponentKind::Targeter => "targeter",
        }
    }
}

/// Hit points; the entity is swept by cleanup once this drops below the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub value: f32,
}

impl Health {
    pub fn new(value: f32) -> Self {
        Self { value }
    }

    pub fn damage(&mut self, amount: f32) {
        self.value -= amount;
    }
}

/// Canvas-space position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// How a mover displaces its own position each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionRule {
    /// No motion
    #[default]
    Still,
    /// Move `speed` pixels along +x
    Drift,
    /// Step `speed` pixels toward the targeter's live position; still without a target
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// Pixels per tick
    pub speed: f32,
    pub rule: MotionRule,
}

/// What a collider does to the other entity of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionRule {
    /// Push the other entity along the line of centers by this entity's speed
    #[default]
    Push,
    /// Push, and ring a tone keyed to this collider's radius
    PushAndChime,
}

impl CollisionRule {
    pub fn chimes(&self) -> bool {
        matches!(self, CollisionRule::PushAndChime)
    }
}

/// Circle collider centered on the entity's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
    pub rule: CollisionRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawRule {
    /// Collider circle with toroidal ghosts and a line to the target
    Circle,
    /// Outlined square
    Square { half_extent: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Renderer {
    pub rule: DrawRule,
}

/// Lookup-only link to another entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targeter {
    pub target: EntityId,
}

/// Any component, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Component {
    Health(Health),
    Position(Position),
    Mover(Mover),
    Collider(Collider),
    Renderer(Renderer),
    Targeter(Targeter),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Health(_) => ComponentKind::Health,
            Component::Position(_) => ComponentKind::Position,
            Component::Mover(_) => ComponentKind::Mover,
            Component::Collider(_) => ComponentKind::Collider,
            Component::Renderer(_) => ComponentKind::Renderer,
            Component::Targeter(_) => ComponentKind::Targeter,
        }
    }
}

macro_rules! impl_from_component {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$ty(value)
                }
            }
        )*
    };
}

impl_from_component!(Health, Position, Mover, Collider, Renderer, Targeter);
