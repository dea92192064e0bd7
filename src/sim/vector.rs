//! 2D vector helpers for a toroidal surface
//!
//! Magnitude and normalization come straight from `glam::Vec2`
//! (`length`, `normalize_or_zero`). Everything here that divides by a
//! length treats anything shorter than `MIN_DISTANCE` as zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_DISTANCE;

/// Current drawing surface extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a box centered at `center` with the given half extent overlaps the surface
    pub fn overlaps(&self, center: Vec2, half_extent: f32) -> bool {
        center.x + half_extent >= 0.0
            && center.x - half_extent <= self.width
            && center.y + half_extent >= 0.0
            && center.y - half_extent <= self.height
    }
}

/// Rotate 90° counter-clockwise: (x, y) -> (-y, x)
#[inline]
pub fn rot90(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Vector projection of `v` onto `basis`: basis * (basis·v / |basis|²)
///
/// A zero-length basis projects everything to zero.
pub fn project(basis: Vec2, v: Vec2) -> Vec2 {
    let len_sq = basis.length_squared();
    if len_sq < MIN_DISTANCE * MIN_DISTANCE {
        return Vec2::ZERO;
    }
    basis * (basis.dot(v) / len_sq)
}

/// Signed length of the projection of `v` onto `basis`
pub fn scalar_projection(basis: Vec2, v: Vec2) -> f32 {
    let len = basis.length();
    if len < MIN_DISTANCE {
        return 0.0;
    }
    basis.dot(v) / len
}

/// Point at fraction `t` of the way from `a` to `b`
#[inline]
pub fn lerp_points(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Offsets of the 9 toroidal images, direct image first
pub fn image_offsets(surface: Surface) -> [Vec2; 9] {
    let (w, h) = (surface.width, surface.height);
    [
        Vec2::ZERO,
        Vec2::new(-w, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(0.0, -h),
        Vec2::new(0.0, h),
        Vec2::new(-w, -h),
        Vec2::new(w, -h),
        Vec2::new(-w, h),
        Vec2::new(w, h),
    ]
}

/// The 9 images of `p` on the torus, direct image first
pub fn toroidal_images(p: Vec2, surface: Surface) -> [Vec2; 9] {
    image_offsets(surface).map(|offset| p + offset)
}

/// Shortest displacement from `from` to any image of `to`
///
/// Ties keep the earliest image, so the direct displacement wins when it
/// is already minimal.
pub fn toroidal_delta(from: Vec2, to: Vec2, surface: Surface) -> Vec2 {
    let mut best = to - from;
    let mut best_len_sq = best.length_squared();
    for image in toroidal_images(to, surface).iter().skip(1) {
        let delta = *image - from;
        let len_sq = delta.length_squared();
        if len_sq < best_len_sq {
            best = delta;
            best_len_sq = len_sq;
        }
    }
    best
}

/// Minimum-image distance between two points
#[inline]
pub fn toroidal_distance(a: Vec2, b: Vec2, surface: Surface) -> f32 {
    toroidal_delta(a, b, surface).length()
}

/// Displacement from `from` to `to`, toroidal or planar
#[inline]
pub fn delta(from: Vec2, to: Vec2, surface: Surface, toroidal: bool) -> Vec2 {
    if toroidal {
        toroidal_delta(from, to, surface)
    } else {
        to - from
    }
}

/// Single wrap of one coordinate into [0, extent)
///
/// Assumes the value is at most one extent outside the range.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value >= extent {
        value - extent
    } else if value < 0.0 {
        // Tiny negatives can round up to `extent` in f32
        let wrapped = value + extent;
        if wrapped >= extent { 0.0 } else { wrapped }
    } else {
        value
    }
}

/// Wrap both axes of a position onto the surface
#[inline]
pub fn wrap_position(p: Vec2, surface: Surface) -> Vec2 {
    Vec2::new(
        wrap_axis(p.x, surface.width),
        wrap_axis(p.y, surface.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SURFACE: Surface = Surface {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_projection_basics() {
        assert_eq!(project(Vec2::X, Vec2::new(3.0, 4.0)), Vec2::new(3.0, 0.0));
        assert_eq!(rot90(Vec2::X), Vec2::Y);
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_basis_is_zero() {
        assert_eq!(project(Vec2::ZERO, Vec2::new(3.0, 4.0)), Vec2::ZERO);
        assert_eq!(scalar_projection(Vec2::ZERO, Vec2::new(3.0, 4.0)), 0.0);
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn test_scalar_projection_sign() {
        let basis = Vec2::new(2.0, 0.0);
        assert!((scalar_projection(basis, Vec2::new(-5.0, 1.0)) + 5.0).abs() < 1e-6);
        assert!((scalar_projection(rot90(basis), Vec2::new(0.0, 7.0)) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_points() {
        let mid = lerp_points(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_toroidal_delta_crosses_edge() {
        // 10px from the left edge and 10px from the right edge are 20px apart
        let d = toroidal_delta(Vec2::new(790.0, 300.0), Vec2::new(10.0, 300.0), SURFACE);
        assert!((d - Vec2::new(20.0, 0.0)).length() < 1e-4);

        let d = toroidal_delta(Vec2::new(400.0, 5.0), Vec2::new(400.0, 595.0), SURFACE);
        assert!((d - Vec2::new(0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn test_wrap_axis_bounds() {
        assert_eq!(wrap_axis(800.0, 800.0), 0.0);
        assert_eq!(wrap_axis(805.0, 800.0), 5.0);
        assert_eq!(wrap_axis(-5.0, 800.0), 795.0);
        assert_eq!(wrap_axis(400.0, 800.0), 400.0);
    }

    #[test]
    fn test_surface_overlaps() {
        assert!(SURFACE.overlaps(Vec2::new(-5.0, 10.0), 10.0));
        assert!(!SURFACE.overlaps(Vec2::new(-20.0, 10.0), 10.0));
        assert!(!SURFACE.overlaps(Vec2::new(400.0, 700.0), 50.0));
    }

    proptest! {
        #[test]
        fn toroidal_distance_never_exceeds_planar(
            ax in 0.0f32..800.0, ay in 0.0f32..600.0,
            bx in 0.0f32..800.0, by in 0.0f32..600.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert!(toroidal_distance(a, b, SURFACE) <= a.distance(b) + 1e-3);
        }

        #[test]
        fn toroidal_distance_matches_planar_when_close(
            ax in 0.0f32..800.0, ay in 0.0f32..600.0,
            dx in -399.0f32..399.0, dy in -299.0f32..299.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = a + Vec2::new(dx, dy);
            let torus = toroidal_distance(a, b, SURFACE);
            prop_assert!((torus - a.distance(b)).abs() < 1e-2);
        }

        #[test]
        fn single_wrap_lands_in_range(
            x in -799.0f32..1599.0,
        ) {
            let wrapped = wrap_axis(x, 800.0);
            prop_assert!((0.0..800.0).contains(&wrapped));
        }
    }
}
