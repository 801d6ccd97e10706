use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Free Look", inline)]
#[serde(default)]
/// Free-look camera sensitivities and limits.
pub struct FreeLookOptions {
    /// Horizontal movement speed in world units per second.
    #[schemars(title = "Camera Pan Speed", range(min = 0.01, max = 100.0), extend("step" = 0.01))]
    pub pan_speed: f32,
    /// Raise/lower speed in world units per second.
    #[schemars(title = "Camera Elevation Speed", range(min = 0.01, max = 100.0), extend("step" = 0.01))]
    pub elevation_speed: f32,
    /// Degrees of yaw/pitch per unit of look delta.
    #[schemars(title = "Look Sensitivity", range(min = 0.01, max = 100.0), extend("step" = 0.01))]
    pub look_sensitivity: f32,
    /// Degrees of roll per unit of roll input per second.
    #[schemars(title = "Roll Sensitivity", range(min = 0.01, max = 360.0), extend("step" = 0.5))]
    pub roll_sensitivity: f32,
    /// Degrees of FOV change per unit of zoom input per second.
    #[schemars(title = "FOV Sensitivity", range(min = 0.01, max = 100.0), extend("step" = 0.01))]
    pub fov_sensitivity: f32,
    /// Lower FOV limit in degrees.
    #[schemars(title = "Min FOV", range(min = 0.0, max = 180.0), extend("step" = 1.0))]
    pub min_fov: f32,
    /// Upper FOV limit in degrees.
    #[schemars(title = "Max FOV", range(min = 0.0, max = 180.0), extend("step" = 1.0))]
    pub max_fov: f32,
    /// Focus distance change per unit of focus scroll.
    #[schemars(title = "Focus Distance Step", range(min = 0.01, max = 10.0), extend("step" = 0.01))]
    pub focus_step: f32,
}

impl FreeLookOptions {
    /// FOV limits as `(min, max)`, swapped if configured backwards.
    #[must_use]
    pub fn fov_range(&self) -> (f32, f32) {
        if self.min_fov <= self.max_fov {
            (self.min_fov, self.max_fov)
        } else {
            (self.max_fov, self.min_fov)
        }
    }
}

impl Default for FreeLookOptions {
    fn default() -> Self {
        Self {
            pan_speed: 5.0,
            elevation_speed: 5.0,
            look_sensitivity: 1.0,
            roll_sensitivity: 50.0,
            fov_sensitivity: 10.0,
            min_fov: 4.0,
            max_fov: 120.0,
            focus_step: 0.1,
        }
    }
}
