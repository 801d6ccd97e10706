//! Dolly playback: constant-speed, eased traversal of a pose sequence.
//!
//! A [`PlaybackEngine`] is a plain state machine advanced once per tick by
//! the caller via [`PlaybackEngine::step`]. Each step yields one
//! [`UpdateMessage`](crate::pose::UpdateMessage) tagged `Dolly`, or `None`
//! once the last waypoint has been reached or the playback was cancelled.

mod engine;

pub use engine::PlaybackEngine;

use crate::options::DollyOptions;
use crate::path::RotationPolicy;
use crate::util::easing::Easing;

/// Traversal parameters shared by both playback modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Base speed in world units per second, before the speed multiplier.
    pub speed: f32,
    /// Easing applied to traversal progress.
    pub easing: Easing,
}

impl PlaybackSettings {
    /// Settings from the dolly options.
    #[must_use]
    pub fn from_options(options: &DollyOptions) -> Self {
        Self {
            speed: options.speed,
            easing: options.easing,
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self::from_options(&DollyOptions::default())
    }
}

/// How waypoints are traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Straight, eased moves between operator checkpoints. A zero-length
    /// segment ends playback.
    Direct,
    /// Walk a generated dense path. Zero-length segments are skipped.
    Path {
        /// Rotation policy the path was generated with.
        rotation: RotationPolicy,
    },
}
