//! Drag-to-launch gesture interpreter
//!
//! Idle -> Charging on pointer-down, back to Idle on pointer-up (launch)
//! or pointer-leave (cancel). While charging, the drag vector
//! (origin - pointer) is projected onto a basis: the parallel part sizes
//! the circle, the perpendicular part sets its speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::vector::{project, rot90, scalar_projection};
use crate::settings::{BasisMode, Settings};

/// What a pointer-up hands to the assemblage factory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub position: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
    pub target: Option<EntityId>,
}

/// Pointer and drag state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gesture {
    /// Current pointer position (None when off-surface)
    pub pointer: Option<Vec2>,
    /// Where the drag started
    pub origin: Option<Vec2>,
    pub charging: bool,
    pub circle_size: f32,
    /// Signed drag speed in pixels (divided by `pixels_per_speed` at launch)
    pub circle_speed: f32,
    /// Picked entity; a lookup-only link
    pub target: Option<EntityId>,
}

impl Gesture {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pointer: None,
            origin: None,
            charging: false,
            circle_size: settings.default_circle_size,
            circle_speed: settings.default_circle_speed,
            target: None,
        }
    }

    /// Idle -> Charging
    pub fn pointer_down(&mut self, pos: Vec2, settings: &Settings) {
        self.pointer = Some(pos);
        self.origin = Some(pos);
        self.charging = true;
        self.circle_size = settings.default_circle_size;
        self.circle_speed = settings.default_circle_speed;
    }

    /// Track the pointer; while charging, re-derive size and speed.
    ///
    /// `target_delta` is the displacement from the drag origin to the
    /// picked target, used by the target-relative basis.
    pub fn pointer_move(&mut self, pos: Vec2, target_delta: Option<Vec2>, settings: &Settings) {
        self.pointer = Some(pos);
        if !self.charging {
            return;
        }
        let Some(drag) = self.drag() else {
            return;
        };

        let basis = basis_for(settings.basis, target_delta);
        self.circle_size = project(basis, drag)
            .length()
            .clamp(settings.min_circle_size, settings.max_circle_size);
        self.circle_speed = scalar_projection(rot90(basis), drag);
    }

    /// Charging -> Idle, producing a launch at the current pointer
    pub fn pointer_up(&mut self, pos: Vec2, settings: &Settings) -> Option<Launch> {
        self.pointer = Some(pos);
        if !self.charging {
            return None;
        }
        self.charging = false;
        self.origin = None;

        let launch = Launch {
            position: pos,
            radius: self.circle_size,
            speed: self.circle_speed / settings.pixels_per_speed,
            target: self.target,
        };
        self.circle_size = settings.default_circle_size;
        self.circle_speed = settings.default_circle_speed;
        Some(launch)
    }

    /// Any -> Idle without launching
    pub fn cancel(&mut self, settings: &Settings) {
        *self = Self::new(settings);
    }

    /// Drag vector (origin - pointer), while charging
    pub fn drag(&self) -> Option<Vec2> {
        match (self.charging, self.origin, self.pointer) {
            (true, Some(origin), Some(pointer)) => Some(origin - pointer),
            _ => None,
        }
    }
}

/// Basis the drag is measured against
pub fn basis_for(mode: BasisMode, target_delta: Option<Vec2>) -> Vec2 {
    match (mode, target_delta) {
        (BasisMode::TargetRelative, Some(delta)) if delta.length_squared() > 1e-6 => delta,
        _ => Vec2::X,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(basis: BasisMode) -> Settings {
        Settings {
            basis,
            ..Settings::default()
        }
    }

    #[test]
    fn test_tap_launches_defaults() {
        let settings = settings(BasisMode::Fixed);
        let mut gesture = Gesture::new(&settings);
        gesture.pointer_down(Vec2::new(50.0, 50.0), &settings);
        assert!(gesture.charging);

        let launch = gesture.pointer_up(Vec2::new(50.0, 50.0), &settings).unwrap();
        assert_eq!(launch.position, Vec2::new(50.0, 50.0));
        assert_eq!(launch.radius, settings.default_circle_size);
        assert_eq!(
            launch.speed,
            settings.default_circle_speed / settings.pixels_per_speed
        );
        assert!(!gesture.charging);
        assert!(gesture.origin.is_none());
    }

    #[test]
    fn test_fixed_basis_decomposes_drag() {
        let settings = settings(BasisMode::Fixed);
        let mut gesture = Gesture::new(&settings);
        gesture.pointer_down(Vec2::new(100.0, 100.0), &settings);
        // drag = origin - pointer = (30, -40)
        gesture.pointer_move(Vec2::new(70.0, 140.0), None, &settings);

        assert!((gesture.circle_size - 30.0).abs() < 1e-4);
        assert!((gesture.circle_speed + 40.0).abs() < 1e-4);

        let launch = gesture.pointer_up(Vec2::new(70.0, 140.0), &settings).unwrap();
        assert!((launch.speed + 40.0 / settings.pixels_per_speed).abs() < 1e-4);
        assert_eq!(launch.position, Vec2::new(70.0, 140.0));
    }

    #[test]
    fn test_size_is_clamped() {
        let settings = settings(BasisMode::Fixed);
        let mut gesture = Gesture::new(&settings);
        gesture.pointer_down(Vec2::new(500.0, 0.0), &settings);
        gesture.pointer_move(Vec2::new(0.0, 0.0), None, &settings);
        assert_eq!(gesture.circle_size, settings.max_circle_size);

        gesture.pointer_move(Vec2::new(500.0, 20.0), None, &settings);
        assert_eq!(gesture.circle_size, settings.min_circle_size);
    }

    #[test]
    fn test_target_relative_basis() {
        let settings = settings(BasisMode::TargetRelative);
        let mut gesture = Gesture::new(&settings);
        gesture.pointer_down(Vec2::new(0.0, 0.0), &settings);
        // Target straight below the origin: basis (0, 10), perpendicular (-10, 0)
        gesture.pointer_move(Vec2::new(5.0, -20.0), Some(Vec2::new(0.0, 10.0)), &settings);
        // drag = (-5, 20)
        assert!((gesture.circle_size - 20.0).abs() < 1e-4);
        assert!((gesture.circle_speed - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_target_falls_back_to_fixed() {
        assert_eq!(basis_for(BasisMode::TargetRelative, Some(Vec2::ZERO)), Vec2::X);
        assert_eq!(basis_for(BasisMode::TargetRelative, None), Vec2::X);
        assert_eq!(basis_for(BasisMode::Fixed, Some(Vec2::Y)), Vec2::X);
    }

    #[test]
    fn test_move_while_idle_only_tracks_pointer() {
        let settings = Settings::default();
        let mut gesture = Gesture::new(&settings);
        gesture.pointer_move(Vec2::new(300.0, 1.0), None, &settings);
        assert_eq!(gesture.pointer, Some(Vec2::new(300.0, 1.0)));
        assert_eq!(gesture.circle_size, settings.default_circle_size);
        assert!(gesture.pointer_up(Vec2::new(300.0, 1.0), &settings).is_none());
    }

    #[test]
    fn test_cancel_clears_everything() {
        let settings = Settings::default();
        let mut gesture = Gesture::new(&settings);
        gesture.target = Some(EntityId(4));
        gesture.pointer_down(Vec2::new(1.0, 1.0), &settings);
        gesture.pointer_move(Vec2::new(60.0, 1.0), None, &settings);
        gesture.cancel(&settings);

        assert!(!gesture.charging);
        assert!(gesture.pointer.is_none());
        assert!(gesture.origin.is_none());
        assert!(gesture.target.is_none());
        assert!(gesture.pointer_up(Vec2::new(60.0, 1.0), &settings).is_none());
    }
}
