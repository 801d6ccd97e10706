use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Compositor", inline)]
#[serde(default)]
/// Arbitration rules for autonomous updates.
pub struct CompositorOptions {
    /// Let dolly playback drive the camera rotation.
    #[schemars(title = "Follow Dolly Rotation")]
    pub follow_rotation: bool,
    /// Let dolly playback drive focus distance and lens values.
    #[schemars(title = "Dolly Auto Focus")]
    pub auto_focus: bool,
    /// Maximum pending updates per tier before the oldest is dropped.
    #[schemars(skip)]
    pub queue_capacity: usize,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            follow_rotation: false,
            auto_focus: false,
            queue_capacity: 64,
        }
    }
}
