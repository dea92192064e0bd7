//! Draw rules for entities and the gesture overlay

use glam::Vec2;

use super::{Paint, RenderSink, Style};
use crate::sim::component::DrawRule;
use crate::sim::entity::Entity;
use crate::sim::registry::Registry;
use crate::sim::state::World;
use crate::sim::vector::{Surface, delta, image_offsets};

const BODY_ALPHA: f32 = 0.35;
const EDGE_ALPHA: f32 = 0.95;
const LINK_ALPHA: f32 = 0.5;

/// Draw one entity according to its renderer.
///
/// Circles are drawn at every toroidal image that touches the surface
/// (the direct image plus up to 8 ghosts), with a line to their target.
pub fn draw_entity(
    entity: &Entity,
    registry: &Registry,
    surface: Surface,
    toroidal: bool,
    sink: &mut dyn RenderSink,
) {
    let (Some(renderer), Some(position)) = (entity.renderer, entity.position) else {
        return;
    };
    let pos = position.0;

    match renderer.rule {
        DrawRule::Circle => {
            let radius = entity.collider.map(|c| c.radius).unwrap_or(0.0);
            let target_pos = entity
                .targeter
                .and_then(|t| registry.position_of(t.target));
            let paint = if target_pos.is_some() {
                Paint::White
            } else {
                Paint::LightBlue
            };
            let style = Style::fill_and_stroke(paint, paint, BODY_ALPHA);

            for (i, offset) in image_offsets(surface).into_iter().enumerate() {
                let center = pos + offset;
                if i == 0 || surface.overlaps(center, radius) {
                    sink.circle(center, radius, style);
                }
            }

            if let Some(target) = target_pos {
                let to = pos + delta(pos, target, surface, toroidal);
                sink.line(pos, to, Style::stroke(Paint::White, LINK_ALPHA));
            }
        }
        DrawRule::Square { half_extent } => {
            sink.rect(pos, half_extent, Style::stroke(Paint::Navy, EDGE_ALPHA));
        }
    }
}

/// Drag vector, charge circle and target link while charging; a hover
/// ring around the picked entity while idle
pub fn draw_gesture_overlay(world: &World, sink: &mut dyn RenderSink) {
    let gesture = &world.gesture;
    let target = gesture.target.and_then(|id| {
        let entity = world.registry.get(id)?;
        let pos = entity.position?.0;
        Some((pos, entity.collider.map(|c| c.radius).unwrap_or(0.0)))
    });

    if !gesture.charging {
        if let Some((pos, radius)) = target {
            sink.circle(pos, radius + 3.0, Style::stroke(Paint::Amber, LINK_ALPHA));
        }
        return;
    }

    let Some(origin) = gesture.origin else {
        return;
    };
    if let Some(pointer) = gesture.pointer {
        sink.line(origin, pointer, Style::stroke(Paint::Slate, EDGE_ALPHA));
    }
    sink.circle(
        origin,
        gesture.circle_size,
        Style::stroke(Paint::Amber, EDGE_ALPHA),
    );
    if let Some((pos, _)) = target {
        let to: Vec2 = origin + delta(origin, pos, world.surface, world.settings.wrap_picking);
        sink.line(origin, to, Style::stroke(Paint::Amber, LINK_ALPHA));
    }
}
