//! Manual free-look producer: turns per-tick operator input into absolute
//! `FreeLook` pose updates.

use glam::{Quat, Vec2, Vec3};

use crate::options::FreeLookOptions;
use crate::pose::{Pose, UpdateMessage};
use crate::speed::SharedSpeed;
use crate::util::math::sanitize_rotation;

/// Operator input sampled for one tick.
///
/// Held axes (`movement`, `elevation`, `roll`, `zoom`) are rates scaled by
/// the tick's delta time. `look` and `focus_scroll` are per-tick deltas
/// (mouse motion, wheel notches) and are not.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FreeLookInput {
    /// Strafe (`x`, +right) and forward (`y`, +forward) axes.
    pub movement: Vec2,
    /// Raise (+) / lower (-) along world up.
    pub elevation: f32,
    /// Yaw (`x`, +right) and pitch (`y`, +up) deltas.
    pub look: Vec2,
    /// Roll axis (+clockwise).
    pub roll: f32,
    /// FOV axis (+wider).
    pub zoom: f32,
    /// Focus distance scroll (+farther).
    pub focus_scroll: f32,
}

impl FreeLookInput {
    /// No axis is deflected.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.movement == Vec2::ZERO
            && self.elevation == 0.0
            && self.look == Vec2::ZERO
            && self.roll == 0.0
            && self.zoom == 0.0
            && self.focus_scroll == 0.0
    }
}

/// Highest-precedence producer, driven by operator input.
pub struct FreeLook {
    options: FreeLookOptions,
    speed: SharedSpeed,
}

impl FreeLook {
    /// Producer with the given sensitivities and shared speed multiplier.
    #[must_use]
    pub fn new(options: FreeLookOptions, speed: SharedSpeed) -> Self {
        Self { options, speed }
    }

    /// Active sensitivities.
    #[must_use]
    pub fn options(&self) -> &FreeLookOptions {
        &self.options
    }

    /// Pose `base` moved by `input` over `dt` seconds, tagged `FreeLook`.
    ///
    /// Idle input produces no message so lower tiers keep control.
    #[must_use]
    pub fn apply(
        &self,
        base: &Pose,
        input: &FreeLookInput,
        dt: f32,
    ) -> Option<UpdateMessage> {
        if input.is_idle() {
            return None;
        }
        let opts = &self.options;
        let multiplier = self.speed.multiplier();
        let mut pose = base.stripped();

        // Yaw about world up, pitch and roll in camera space
        let mut rotation = pose.rotation;
        let yaw = -input.look.x * opts.look_sensitivity;
        let pitch = input.look.y * opts.look_sensitivity;
        let roll = -input.roll * opts.roll_sensitivity * dt;
        rotation = Quat::from_rotation_y(yaw.to_radians()) * rotation;
        rotation *= Quat::from_rotation_x(pitch.to_radians());
        rotation *= Quat::from_rotation_z(roll.to_radians());
        pose.rotation = sanitize_rotation(rotation);

        let right = pose.rotation * Vec3::X;
        let forward = pose.rotation * Vec3::NEG_Z;
        let pan = opts.pan_speed * multiplier * dt;
        let rise = opts.elevation_speed * multiplier * dt;
        pose.position += right * (input.movement.x * pan)
            + forward * (input.movement.y * pan)
            + Vec3::Y * (input.elevation * rise);

        let (min_fov, max_fov) = opts.fov_range();
        pose.fov = (pose.fov + input.zoom * opts.fov_sensitivity * dt)
            .clamp(min_fov, max_fov);
        pose.focus_distance = (pose.focus_distance
            + input.focus_scroll * opts.focus_step)
            .max(0.0);

        Some(UpdateMessage::free_look(pose))
    }
}

impl std::fmt::Debug for FreeLook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreeLook")
            .field("options", &self.options)
            .field("multiplier", &self.speed.multiplier())
            .finish()
    }
}
