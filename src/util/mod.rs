//! Shared utilities: easing curves and vector/rotation helpers.

pub mod easing;
pub mod math;
