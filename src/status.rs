//! Human-readable status snapshots of the current pose.

use std::fmt;

use glam::{EulerRot, Vec3};

use crate::pose::{Pose, PriorityTag};

/// Display-ready summary of the authoritative pose after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Camera position.
    pub position: Vec3,
    /// Pitch, yaw, roll in degrees.
    pub euler_degrees: Vec3,
    /// Field of view in degrees.
    pub fov: f32,
    /// Focus distance.
    pub focus_distance: f32,
    /// Lens focal length.
    pub focal_length: f32,
    /// Lens aperture.
    pub aperture: f32,
    /// Tier applied this tick, if any.
    pub applied: Option<PriorityTag>,
    /// Active speed multiplier.
    pub speed_multiplier: f32,
}

impl StatusSnapshot {
    /// Snapshot of `pose` after a tick that applied `applied`.
    #[must_use]
    pub fn from_pose(
        pose: &Pose,
        applied: Option<PriorityTag>,
        speed_multiplier: f32,
    ) -> Self {
        let (yaw, pitch, roll) = pose.rotation.to_euler(EulerRot::YXZ);
        Self {
            position: pose.position,
            euler_degrees: Vec3::new(
                pitch.to_degrees(),
                yaw.to_degrees(),
                roll.to_degrees(),
            ),
            fov: pose.fov,
            focus_distance: pose.focus_distance,
            focal_length: pose.focal_length,
            aperture: pose.aperture,
            applied,
            speed_multiplier,
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        let r = self.euler_degrees;
        writeln!(f, "Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
        writeln!(f, "Rotation: ({:.1}, {:.1}, {:.1})", r.x, r.y, r.z)?;
        writeln!(f, "FOV: {:.1}", self.fov)?;
        writeln!(f, "Focus Distance: {:.2}", self.focus_distance)?;
        writeln!(f, "Focal Length: {:.1}", self.focal_length)?;
        writeln!(f, "Aperture: {:.1}", self.aperture)?;
        match self.applied {
            Some(tier) => writeln!(f, "Source: {tier}")?,
            None => writeln!(f, "Source: idle")?,
        }
        write!(f, "Speed: x{:.2}", self.speed_multiplier)
    }
}

/// Receives a status snapshot every tick (e.g. a HUD overlay).
pub trait StatusSink {
    /// Show the latest snapshot.
    fn show(&mut self, status: &StatusSnapshot);
}

impl StatusSink for () {
    fn show(&mut self, _status: &StatusSnapshot) {}
}

/// Logs each snapshot at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn show(&mut self, status: &StatusSnapshot) {
        log::debug!("{status}");
    }
}
