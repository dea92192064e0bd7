//! Fixed system pipeline
//!
//! One tick runs the five systems in a fixed order:
//! input -> movement -> collision -> cleanup -> render.
//! There is no delta time: a mover's speed is its displacement per tick.

use glam::Vec2;

use super::component::{ComponentKind, MotionRule};
use super::entity::{Entity, EntityId};
use super::registry::Registry;
use super::state::{SimEvent, World};
use super::vector::{Surface, delta, wrap_position};
use crate::audio::{AudioSink, tone_for_radius};
use crate::consts::MIN_DISTANCE;
use crate::renderer::{RenderSink, draw_entity, draw_gesture_overlay};

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    Input,
    Movement,
    Collision,
    Cleanup,
    Render,
}

/// Execution order of one tick
pub const PIPELINE: [System; 5] = [
    System::Input,
    System::Movement,
    System::Collision,
    System::Cleanup,
    System::Render,
];

/// External collaborators the pipeline writes to
pub struct Sinks<'a> {
    pub render: &'a mut dyn RenderSink,
    pub audio: &'a mut dyn AudioSink,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, sinks: &mut Sinks<'_>) {
    world.begin_tick();
    for system in PIPELINE {
        run_system(system, world, sinks);
    }
    world.time_ticks += 1;
}

pub fn run_system(system: System, world: &mut World, sinks: &mut Sinks<'_>) {
    match system {
        System::Input => input_system(world),
        System::Movement => movement_system(world),
        System::Collision => collision_system(world, sinks.audio),
        System::Cleanup => cleanup_system(world),
        System::Render => render_system(world, sinks.render),
    }
}

/// Pick the first collider under the pointer (registry order breaks ties).
///
/// Skipped while charging so the target stays locked for the drag.
pub fn input_system(world: &mut World) {
    if world.gesture.charging {
        return;
    }
    let picked = world.gesture.pointer.and_then(|pointer| {
        world
            .registry
            .iter()
            .find(|entity| {
                match (entity.collider, entity.position) {
                    (Some(collider), Some(position)) => {
                        delta(pointer, position.0, world.surface, world.settings.wrap_picking)
                            .length()
                            <= collider.radius
                    }
                    _ => false,
                }
            })
            .map(|entity| entity.id())
    });

    if picked != world.gesture.target {
        log::trace!("Target {:?} -> {:?}", world.gesture.target, picked);
    }
    world.gesture.target = picked;
}

/// Apply each mover's rule, then wrap every position onto the surface
pub fn movement_system(world: &mut World) {
    let surface = world.surface;
    let toroidal = world.settings.wrap_collisions;
    let registry = &mut world.registry;

    for i in 0..registry.len() {
        let Some(entity) = registry.at(i) else {
            continue;
        };
        let step = motion_step(entity, registry, surface, toroidal);
        if let Some(position) = registry.at_mut(i).and_then(|e| e.position.as_mut()) {
            position.0 = wrap_position(position.0 + step, surface);
        }
    }
}

/// Displacement a mover applies to itself this tick
fn motion_step(entity: &Entity, registry: &Registry, surface: Surface, toroidal: bool) -> Vec2 {
    let (Some(mover), Some(position)) = (entity.mover, entity.position) else {
        return Vec2::ZERO;
    };
    match mover.rule {
        MotionRule::Still => Vec2::ZERO,
        MotionRule::Drift => Vec2::new(mover.speed, 0.0),
        MotionRule::Home => {
            let Some(target) = entity.targeter.and_then(|t| registry.position_of(t.target)) else {
                return Vec2::ZERO;
            };
            let to_target = delta(position.0, target, surface, toroidal);
            let distance = to_target.length();
            if distance < MIN_DISTANCE {
                Vec2::ZERO
            } else {
                to_target * (mover.speed / distance)
            }
        }
    }
}

/// Push along `direction` (length `distance`) by `speed` pixels
fn push(direction: Vec2, distance: f32, speed: f32) -> Vec2 {
    if distance < MIN_DISTANCE {
        Vec2::ZERO
    } else {
        direction * (speed.abs() / distance)
    }
}

/// Test every unordered collider pair once, in registry order.
///
/// Both members of an overlapping pair push the other away by their own
/// speed; both pushes are computed before either is applied. Pushed
/// positions are wrapped back onto the surface.
pub fn collision_system(world: &mut World, audio: &mut dyn AudioSink) {
    let surface = world.surface;
    let toroidal = world.settings.wrap_collisions;
    let count = world.registry.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let (Some(a), Some(b)) = (world.registry.at(i), world.registry.at(j)) else {
                continue;
            };
            let (Some(collider_a), Some(pos_a), Some(collider_b), Some(pos_b)) =
                (a.collider, a.position, b.collider, b.position)
            else {
                continue;
            };

            // From a to b, across the nearest edge when wrapping
            let offset = delta(pos_a.0, pos_b.0, surface, toroidal);
            let distance = offset.length();
            if distance >= collider_a.radius + collider_b.radius {
                continue;
            }

            let (id_a, id_b) = (a.id(), b.id());
            let push_b = push(offset, distance, a.speed());
            let push_a = push(-offset, distance, b.speed());

            if let Some(position) = world.registry.at_mut(j).and_then(|e| e.position.as_mut()) {
                position.0 = wrap_position(position.0 + push_b, surface);
            }
            if let Some(position) = world.registry.at_mut(i).and_then(|e| e.position.as_mut()) {
                position.0 = wrap_position(position.0 + push_a, surface);
            }

            log::trace!("Collision {} <-> {} at {:.2}", id_a, id_b, distance);
            world.events.push(SimEvent::Collision {
                a: id_a,
                b: id_b,
                distance,
            });

            for (id, collider) in [(id_a, collider_a), (id_b, collider_b)] {
                if collider.rule.chimes() {
                    let tone = tone_for_radius(collider.radius, &world.settings);
                    world.events.push(SimEvent::Chime {
                        entity: id,
                        frequency: tone.frequency,
                    });
                    audio.play_tone(tone);
                }
            }
        }
    }
}

/// Sweep entities whose health fell below the threshold, then drop
/// links to entities that are gone
pub fn cleanup_system(world: &mut World) {
    let threshold = world.settings.removal_threshold;
    let doomed: Vec<EntityId> = world
        .registry
        .iter()
        .filter(|e| e.health.is_some_and(|h| h.value < threshold))
        .map(|e| e.id())
        .collect();

    if world.registry.remove_all(&doomed) > 0 {
        for id in &doomed {
            log::debug!("Removed {}", id);
            world.events.push(SimEvent::Removed { entity: *id });
        }
    }

    let registry = &world.registry;
    let stale: Vec<EntityId> = registry
        .iter()
        .filter(|e| e.targeter.is_some_and(|t| !registry.contains(t.target)))
        .map(|e| e.id())
        .collect();
    for id in stale {
        log::debug!("Detached stale target from {}", id);
        world.registry.remove_component(id, ComponentKind::Targeter);
    }

    if world
        .gesture
        .target
        .is_some_and(|t| !world.registry.contains(t))
    {
        world.gesture.target = None;
    }
}

/// Clear the surface, draw every renderer, then the gesture overlay
pub fn render_system(world: &World, sink: &mut dyn RenderSink) {
    sink.clear(world.surface.width, world.surface.height);
    for entity in world.registry.iter() {
        draw_entity(
            entity,
            &world.registry,
            world.surface,
            world.settings.wrap_collisions,
            sink,
        );
    }
    draw_gesture_overlay(world, sink);
}
