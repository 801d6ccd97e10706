//! Sprint/slow speed modifiers shared by the free-look producer and dolly
//! playback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::options::SpeedOptions;

/// Source of the current movement speed multiplier.
pub trait SpeedProvider: Send + Sync {
    /// Factor applied to every base movement speed this tick.
    fn multiplier(&self) -> f32;
}

/// Shared handle to a speed provider.
pub type SharedSpeed = Arc<dyn SpeedProvider>;

/// Constant multiplier, for callers without a sprint/slow input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpeed(pub f32);

impl SpeedProvider for FixedSpeed {
    fn multiplier(&self) -> f32 {
        self.0
    }
}

/// Sprint/slow toggles driven by the input collaborator.
///
/// Sprint takes precedence over slow when both are held.
#[derive(Debug)]
pub struct SpeedModifier {
    sprinting: AtomicBool,
    slowing: AtomicBool,
    sprint_multiplier: f32,
    slow_multiplier: f32,
}

impl SpeedModifier {
    /// Modifier with the configured multipliers, neither toggle held.
    #[must_use]
    pub fn new(options: &SpeedOptions) -> Self {
        Self {
            sprinting: AtomicBool::new(false),
            slowing: AtomicBool::new(false),
            sprint_multiplier: options.sprint_multiplier,
            slow_multiplier: options.slow_multiplier,
        }
    }

    /// Set whether the sprint input is held.
    pub fn set_sprinting(&self, held: bool) {
        self.sprinting.store(held, Ordering::Relaxed);
    }

    /// Set whether the slow input is held.
    pub fn set_slowing(&self, held: bool) {
        self.slowing.store(held, Ordering::Relaxed);
    }

    /// Whether sprint is held.
    #[must_use]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting.load(Ordering::Relaxed)
    }

    /// Whether slow is held.
    #[must_use]
    pub fn is_slowing(&self) -> bool {
        self.slowing.load(Ordering::Relaxed)
    }
}

impl SpeedProvider for SpeedModifier {
    fn multiplier(&self) -> f32 {
        if self.is_sprinting() {
            self.sprint_multiplier
        } else if self.is_slowing() {
            self.slow_multiplier
        } else {
            1.0
        }
    }
}
