use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Speed Modifiers", inline)]
#[serde(default)]
/// Multipliers applied while the sprint or slow input is held.
pub struct SpeedOptions {
    /// Speed factor while sprinting.
    #[schemars(title = "Sprint Multiplier", range(min = 1.0, max = 100.0), extend("step" = 0.1))]
    pub sprint_multiplier: f32,
    /// Speed factor while slowing.
    #[schemars(title = "Slow Multiplier", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub slow_multiplier: f32,
}

impl Default for SpeedOptions {
    fn default() -> Self {
        Self {
            sprint_multiplier: 5.0,
            slow_multiplier: 0.3,
        }
    }
}
