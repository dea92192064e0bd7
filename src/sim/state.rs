//! Simulation context
//!
//! `World` owns everything the pipeline touches: the registry, the
//! surface extent, the gesture state and the settings. Systems borrow it
//! for the duration of one pass. Pointer handlers mutate it between
//! passes, so a launch becomes visible on the next tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assemblage::{CircleParams, assemble_circle};
use super::entity::EntityId;
use super::gesture::{Gesture, Launch};
use super::registry::Registry;
use super::vector::{Surface, delta};
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Overlapping collider pair, `a` before `b` in registry order
    Collision { a: EntityId, b: EntityId, distance: f32 },
    /// Tone requested by a chiming collider
    Chime { entity: EntityId, frequency: f32 },
    /// Entity removed by cleanup
    Removed { entity: EntityId },
    /// Pointer-up spawned an entity; reported with the next tick's events
    Launched { entity: EntityId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub registry: Registry,
    pub surface: Surface,
    pub gesture: Gesture,
    pub settings: Settings,
    /// Completed pipeline passes
    pub time_ticks: u64,
    /// Events of the last tick, led by launches made before it
    #[serde(skip)]
    pub events: Vec<SimEvent>,
    /// Launches waiting for the next tick
    #[serde(skip)]
    pending: Vec<SimEvent>,
}

impl World {
    pub fn new(surface: Surface, settings: Settings) -> Self {
        Self {
            registry: Registry::new(),
            surface,
            gesture: Gesture::new(&settings),
            settings,
            time_ticks: 0,
            events: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// The surface changed size; wraparound uses the new extent from the next tick
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Surface resized to {}x{}", width, height);
        self.surface = Surface::new(width, height);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.gesture.pointer_down(pos, &self.settings);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        let target_delta = self.gesture_target_delta();
        self.gesture.pointer_move(pos, target_delta, &self.settings);
    }

    /// Finish a drag; spawns the launched circle
    pub fn pointer_up(&mut self, pos: Vec2) -> Option<EntityId> {
        let launch = self.gesture.pointer_up(pos, &self.settings)?;
        let id = self.launch(launch);
        self.pending.push(SimEvent::Launched { entity: id });
        Some(id)
    }

    /// Pointer left the surface: abandon the gesture
    pub fn pointer_leave(&mut self) {
        self.gesture.cancel(&self.settings);
    }

    /// Spawn the circle described by a launch
    pub fn launch(&mut self, launch: Launch) -> EntityId {
        assemble_circle(
            &mut self.registry,
            CircleParams::new(launch.position, launch.speed, launch.radius)
                .with_target(launch.target)
                .with_chime(self.settings.chime.enabled),
        )
    }

    /// Displacement from the drag origin to the picked target's live position
    fn gesture_target_delta(&self) -> Option<Vec2> {
        let origin = self.gesture.origin?;
        let target = self.registry.position_of(self.gesture.target?)?;
        Some(delta(origin, target, self.surface, self.settings.wrap_picking))
    }

    /// Start a new event log with whatever happened since the last tick
    pub(crate) fn begin_tick(&mut self) {
        self.events.clear();
        self.events.append(&mut self.pending);
    }

    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }
}
