//! Assemblages: fully wired entities built from a few parameters

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::component::{
    Collider, CollisionRule, DrawRule, Health, Mover, MotionRule, Position, Renderer, Targeter,
};
use super::entity::EntityId;
use super::registry::Registry;
use super::vector::Surface;
use crate::consts::SPAWN_HEALTH;

/// Parameters for a launched circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleParams {
    pub position: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub radius: f32,
    pub target: Option<EntityId>,
    /// Ring a tone on collision
    pub chime: bool,
}

impl CircleParams {
    pub fn new(position: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            position,
            speed,
            radius,
            target: None,
            chime: false,
        }
    }

    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    pub fn with_chime(mut self, chime: bool) -> Self {
        self.chime = chime;
        self
    }
}

/// Build a homing, colliding, rendered circle.
///
/// The targeter is only attached when the target is still registered.
pub fn assemble_circle(registry: &mut Registry, params: CircleParams) -> EntityId {
    let target = params.target.filter(|t| registry.contains(*t));
    let id = registry.create_entity();

    registry.add_component(id, Health::new(SPAWN_HEALTH));
    registry.add_component(id, Position(params.position));
    if let Some(target) = target {
        registry.add_component(id, Targeter { target });
    }
    registry.add_component(
        id,
        Mover {
            speed: params.speed,
            rule: MotionRule::Home,
        },
    );
    registry.add_component(
        id,
        Collider {
            radius: params.radius,
            rule: if params.chime {
                CollisionRule::PushAndChime
            } else {
                CollisionRule::Push
            },
        },
    );
    registry.add_component(
        id,
        Renderer {
            rule: DrawRule::Circle,
        },
    );

    log::debug!(
        "Spawned circle {} at ({:.1}, {:.1}) r={:.1} speed={:.2} target={:?}",
        id,
        params.position.x,
        params.position.y,
        params.radius,
        params.speed,
        target
    );
    id
}

/// Build a square that drifts along +x and never collides
pub fn assemble_drifter(
    registry: &mut Registry,
    position: Vec2,
    speed: f32,
    half_extent: f32,
) -> EntityId {
    let id = registry.create_entity();
    registry.add_component(id, Health::new(SPAWN_HEALTH));
    registry.add_component(id, Position(position));
    registry.add_component(
        id,
        Renderer {
            rule: DrawRule::Square { half_extent },
        },
    );
    registry.add_component(
        id,
        Mover {
            speed,
            rule: MotionRule::Drift,
        },
    );
    id
}

/// The start-up scene: four drifters of assorted speeds and sizes
pub fn seed_demo_scene(registry: &mut Registry) -> Vec<EntityId> {
    [
        (30.0, 40.0, 2.0, 8.0),
        (350.0, 420.0, 1.0, 2.0),
        (130.0, 40.0, -1.0, 10.0),
        (130.0, 140.0, 12.0, 5.0),
    ]
    .into_iter()
    .map(|(x, y, speed, size)| assemble_drifter(registry, Vec2::new(x, y), speed, size))
    .collect()
}

/// Scatter idle circles uniformly over the surface
pub fn scatter_circles<R: Rng>(
    registry: &mut Registry,
    surface: Surface,
    count: usize,
    max_radius: f32,
    chime: bool,
    rng: &mut R,
) -> Vec<EntityId> {
    let max_radius = max_radius.max(2.0);
    (0..count)
        .map(|_| {
            let position = Vec2::new(
                rng.random_range(0.0..surface.width.max(1.0)),
                rng.random_range(0.0..surface.height.max(1.0)),
            );
            let radius = rng.random_range(2.0..=max_radius);
            let speed = rng.random_range(0.5..3.0);
            assemble_circle(
                registry,
                CircleParams::new(position, speed, radius).with_chime(chime),
            )
        })
        .collect()
}
