use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::path::RotationPolicy;
use crate::util::easing::Easing;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Dolly", inline)]
#[serde(default)]
/// Dolly path generation and playback parameters.
pub struct DollyOptions {
    /// Traversal speed in world units per second, before sprint/slow.
    #[schemars(title = "Dolly Speed", range(min = 0.01, max = 100.0), extend("step" = 0.01))]
    pub speed: f32,
    /// Easing applied to traversal progress.
    #[schemars(title = "Easing")]
    pub easing: Easing,
    /// Samples generated per checkpoint span. More samples give a smoother
    /// curve.
    #[schemars(title = "Path Smoothing", range(min = 2, max = 5000), extend("step" = 1))]
    pub samples_per_segment: usize,
    /// Rotate from the first to the last checkpoint only, ignoring
    /// intermediate rotations.
    #[schemars(title = "Smooth Dolly Rotation")]
    pub smooth_rotation: bool,
}

impl DollyOptions {
    /// Rotation policy selected by `smooth_rotation`.
    #[must_use]
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::from_smooth_flag(self.smooth_rotation)
    }
}

impl Default for DollyOptions {
    fn default() -> Self {
        Self {
            speed: 5.0,
            easing: Easing::Linear,
            samples_per_segment: 50,
            smooth_rotation: true,
        }
    }
}
