//! Whole-pipeline scenarios driven through the public API

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use wrap_chimes::Settings;
use wrap_chimes::audio::ToneLog;
use wrap_chimes::renderer::{CommandRecorder, DrawCommand};
use wrap_chimes::sim::{
    CircleParams, Health, SimEvent, Sinks, Surface, World, assemble_circle, scatter_circles,
    seed_demo_scene, tick,
};

struct Harness {
    world: World,
    render: CommandRecorder,
    audio: ToneLog,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        Self {
            world: World::new(Surface::new(800.0, 600.0), settings),
            render: CommandRecorder::new(),
            audio: ToneLog::new(),
        }
    }

    fn step(&mut self) {
        tick(
            &mut self.world,
            &mut Sinks {
                render: &mut self.render,
                audio: &mut self.audio,
            },
        );
    }

    fn collisions(&self) -> usize {
        self.world
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::Collision { .. }))
            .count()
    }
}

#[test]
fn overlapping_circles_push_apart_until_separated() {
    let mut h = Harness::new(Settings::default());
    let a = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(10.0, 10.0), 1.0, 5.0).with_chime(true),
    );
    let b = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(12.0, 10.0), 1.0, 5.0).with_chime(true),
    );

    // Gap grows by 2 per tick: 2 -> 4 -> 6 -> 8 -> 10
    let mut per_tick = Vec::new();
    for _ in 0..6 {
        h.step();
        per_tick.push(h.collisions());
    }
    assert_eq!(per_tick, vec![1, 1, 1, 1, 0, 0]);
    assert_eq!(h.world.registry.position_of(a), Some(Vec2::new(6.0, 10.0)));
    assert_eq!(h.world.registry.position_of(b), Some(Vec2::new(16.0, 10.0)));

    // Two chiming colliders per collision
    assert_eq!(h.audio.len(), 8);
    assert_eq!(h.world.time_ticks, 6);
}

#[test]
fn collision_across_the_edge() {
    let mut h = Harness::new(Settings::default());
    let left = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(2.0, 300.0), 1.0, 5.0),
    );
    let right = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(798.0, 300.0), 1.0, 5.0),
    );

    h.step();
    assert_eq!(h.collisions(), 1);
    // Pushed apart the short way, away from the seam
    let left_x = h.world.registry.position_of(left).unwrap().x;
    let right_x = h.world.registry.position_of(right).unwrap().x;
    assert!((left_x - 3.0).abs() < 1e-3, "left at {left_x}");
    assert!((right_x - 797.0).abs() < 1e-3, "right at {right_x}");
}

#[test]
fn planar_mode_ignores_the_seam() {
    let settings = Settings {
        wrap_collisions: false,
        ..Settings::default()
    };
    let mut h = Harness::new(settings);
    assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(2.0, 300.0), 1.0, 5.0),
    );
    assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(798.0, 300.0), 1.0, 5.0),
    );
    h.step();
    assert_eq!(h.collisions(), 0);
}

#[test]
fn drag_launches_a_circle_homing_on_the_picked_target() {
    let mut h = Harness::new(Settings::default());
    let target = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(300.0, 300.0), 0.0, 20.0),
    );

    // Hover picks the target on the next input pass
    h.world.pointer_move(Vec2::new(305.0, 300.0));
    h.step();
    assert_eq!(h.world.gesture.target, Some(target));

    h.world.pointer_down(Vec2::new(100.0, 100.0));
    h.world.pointer_move(Vec2::new(100.0, 140.0));
    h.step();
    // Target stays locked while charging even though the pointer moved away
    assert_eq!(h.world.gesture.target, Some(target));

    let id = h.world.pointer_up(Vec2::new(100.0, 140.0)).unwrap();
    let launched = h.world.registry.get(id).unwrap();
    assert_eq!(launched.targeter.map(|t| t.target), Some(target));
    let radius = launched.collider.unwrap().radius;
    let settings = &h.world.settings;
    assert!(radius >= settings.min_circle_size && radius <= settings.max_circle_size);

    // Drag (0, -40) projected on the diagonal to the target
    assert!((radius - 800f32.sqrt()).abs() < 1e-3);

    // One tick moves the launched circle by its speed along the line to the target
    let speed = launched.mover.unwrap().speed;
    let before = h.world.registry.position_of(id).unwrap();
    h.step();
    let after = h.world.registry.position_of(id).unwrap();
    assert!(((after - before).length() - speed.abs()).abs() < 1e-3);
    let to_target = (h.world.registry.position_of(target).unwrap() - before).normalize();
    assert!((after - before).normalize().dot(to_target).abs() > 0.999);
}

#[test]
fn tap_without_drag_uses_defaults() {
    let mut h = Harness::new(Settings::default());
    h.world.pointer_down(Vec2::new(50.0, 50.0));
    let id = h.world.pointer_up(Vec2::new(50.0, 50.0)).unwrap();
    let entity = h.world.registry.get(id).unwrap();
    assert_eq!(entity.collider.unwrap().radius, h.world.settings.default_circle_size);
    assert!(entity.targeter.is_none());
}

#[test]
fn cleanup_removes_dead_entities_and_detaches_chasers() {
    let settings = Settings {
        removal_threshold: 0.5,
        ..Settings::default()
    };
    let mut h = Harness::new(settings);
    let victim = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(100.0, 100.0), 0.0, 5.0),
    );
    let chaser = assemble_circle(
        &mut h.world.registry,
        CircleParams::new(Vec2::new(400.0, 400.0), 1.0, 5.0).with_target(Some(victim)),
    );

    h.world.registry.get_mut(victim).unwrap().health = Some(Health::new(0.25));
    h.step();

    assert!(!h.world.registry.contains(victim));
    assert!(h.world.events.contains(&SimEvent::Removed { entity: victim }));
    assert!(h.world.registry.get(chaser).unwrap().targeter.is_none());

    // Nothing to home on: the chaser stays put
    let pos = h.world.registry.position_of(chaser);
    h.step();
    assert_eq!(h.world.registry.position_of(chaser), pos);
}

#[test]
fn render_pass_draws_demo_scene() {
    let mut h = Harness::new(Settings::default());
    seed_demo_scene(&mut h.world.registry);
    h.step();

    assert!(matches!(
        h.render.commands.first(),
        Some(DrawCommand::Clear { width, height }) if *width == 800.0 && *height == 600.0
    ));
    let squares = h
        .render
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect { .. }))
        .count();
    assert_eq!(squares, h.world.entity_count());
}

#[test]
fn seeded_runs_are_identical() {
    let run = |seed: u64| {
        let mut h = Harness::new(Settings::default());
        seed_demo_scene(&mut h.world.registry);
        let surface = h.world.surface;
        scatter_circles(
            &mut h.world.registry,
            surface,
            10,
            40.0,
            true,
            &mut Pcg32::seed_from_u64(seed),
        );
        for _ in 0..120 {
            h.step();
        }
        let positions: Vec<_> = h
            .world
            .registry
            .iter()
            .map(|e| e.position.map(|p| p.0))
            .collect();
        (positions, h.audio.len())
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn positions_stay_on_the_surface_after_every_tick() {
    let mut h = Harness::new(Settings::default());
    let surface = h.world.surface;
    // Crowd the corner so pushes keep crossing both edges
    for (x, y) in [(0.5, 0.5), (3.0, 1.0), (799.0, 2.0), (1.0, 598.0), (797.5, 599.5)] {
        assemble_circle(
            &mut h.world.registry,
            CircleParams::new(Vec2::new(x, y), 3.0, 6.0),
        );
    }
    scatter_circles(
        &mut h.world.registry,
        surface,
        20,
        30.0,
        false,
        &mut Pcg32::seed_from_u64(3),
    );

    for _ in 0..60 {
        h.step();
        for entity in h.world.registry.iter() {
            let pos = entity.position.unwrap().0;
            assert!(
                (0.0..surface.width).contains(&pos.x) && (0.0..surface.height).contains(&pos.y),
                "{} off the surface at {pos:?}",
                entity.id()
            );
        }
    }
}
