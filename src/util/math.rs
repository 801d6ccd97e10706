//! Small vector and rotation helpers shared by the path and playback code.

use glam::{Quat, Vec3};

/// Distances at or below this are treated as zero.
pub const DISTANCE_EPSILON: f32 = 1e-5;

/// Whether a distance is close enough to zero to skip or finish a segment.
#[inline]
#[must_use]
pub fn approx_zero(distance: f32) -> bool {
    distance.abs() <= DISTANCE_EPSILON
}

/// Linear interpolation between two scalars (unclamped).
#[inline]
#[must_use]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Move `current` toward `target` by at most `max_step`, never overshooting.
#[must_use]
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || approx_zero(distance) {
        return target;
    }
    current + delta / distance * max_step
}

/// Return a unit quaternion, replacing degenerate input with identity.
#[must_use]
pub fn sanitize_rotation(rotation: Quat) -> Quat {
    let length_squared = rotation.length_squared();
    if !length_squared.is_finite() || length_squared < 1e-12 {
        return Quat::IDENTITY;
    }
    if (length_squared - 1.0).abs() < 1e-6 {
        return rotation;
    }
    rotation.normalize()
}

/// Spherical interpolation (unclamped `t`) with normalized inputs and
/// output.
#[must_use]
pub fn slerp_normalized(start: Quat, end: Quat, t: f32) -> Quat {
    let start = sanitize_rotation(start);
    let end = sanitize_rotation(end);
    sanitize_rotation(start.slerp(end, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_towards_stops_at_target() {
        let moved = move_towards(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 10.0);
        assert_eq!(moved, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_move_towards_partial_step() {
        let moved = move_towards(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 1.0);
        assert!((moved - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_sanitize_degenerate_rotation() {
        let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(sanitize_rotation(zero), Quat::IDENTITY);
        let nan = Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(sanitize_rotation(nan), Quat::IDENTITY);
    }

    #[test]
    fn test_sanitize_renormalizes_drift() {
        let drifted = Quat::from_xyzw(0.0, 0.0, 0.0, 1.3);
        let fixed = sanitize_rotation(drifted);
        assert!(fixed.is_normalized());
        assert!(fixed.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_slerp_normalized_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let mid = slerp_normalized(a, b, 0.5);
        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        assert!(mid.is_normalized());
        assert!(mid.abs_diff_eq(expected, 1e-5));
    }
}
