//! Deterministic simulation module
//!
//! All entity logic lives here. This module must be pure and deterministic:
//! - Fixed step per tick, no delta time
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - Rendering and audio only through sink traits

pub mod assemblage;
pub mod component;
pub mod entity;
pub mod gesture;
pub mod registry;
pub mod state;
pub mod tick;
pub mod vector;

pub use assemblage::{
    CircleParams, assemble_circle, assemble_drifter, scatter_circles, seed_demo_scene,
};
pub use component::{
    Collider, CollisionRule, Component, ComponentKind, DrawRule, Health, MotionRule, Mover,
    Position, Renderer, Targeter,
};
pub use entity::{Entity, EntityId};
pub use gesture::{Gesture, Launch};
pub use registry::Registry;
pub use state::{SimEvent, World};
pub use tick::{PIPELINE, Sinks, System, tick};
pub use vector::Surface;
