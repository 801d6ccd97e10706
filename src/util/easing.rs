//! Easing curves for dolly traversal.
//!
//! Each curve remaps a normalized progress value. Evaluation does not clamp
//! its input; playback clamps the eased result instead, so a cursor slightly
//! outside a segment still produces a sensible value.

use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Easing curve variants for dolly traversal.
///
/// "In" curves start slow and end fast, "out" curves start fast and end
/// slow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Sine ease-in.
    SineIn,
    /// Sine ease-out.
    SineOut,
    /// Sine ease-in-out.
    EaseInOutSine,
    /// Quadratic ease-in.
    QuadIn,
    /// Quadratic ease-out.
    QuadOut,
    /// Quadratic ease-in-out.
    EaseInOutQuad,
    /// Cubic ease-in.
    CubicIn,
    /// Cubic ease-out.
    CubicOut,
    /// Cubic ease-in-out.
    EaseInOutCubic,
    /// Plays the segment backwards (`1 - x`).
    Reverse,
}

impl Easing {
    /// Every easing variant, in declaration order.
    pub const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::SineIn,
        Easing::SineOut,
        Easing::EaseInOutSine,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::EaseInOutQuad,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::EaseInOutCubic,
        Easing::Reverse,
    ];

    /// Evaluate the curve at progress `x`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, x: f32) -> f32 {
        match self {
            Easing::Linear => x,
            Easing::SineIn => 1.0 - (x * PI / 2.0).cos(),
            Easing::SineOut => (x * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * x).cos() - 1.0) / 2.0,
            Easing::QuadIn => x * x,
            Easing::QuadOut => {
                let omx = 1.0 - x;
                1.0 - omx * omx
            }
            Easing::EaseInOutQuad => {
                if x < 0.5 {
                    2.0 * x * x
                } else {
                    1.0 - (-2.0 * x + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => x * x * x,
            Easing::CubicOut => {
                let omx = 1.0 - x;
                1.0 - omx * omx * omx
            }
            Easing::EaseInOutCubic => {
                if x < 0.5 {
                    4.0 * x * x * x
                } else {
                    1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
                }
            }
            Easing::Reverse => 1.0 - x,
        }
    }

    /// Stable snake_case name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::EaseInOutSine => "ease_in_out_sine",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::EaseInOutQuad => "ease_in_out_quad",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::EaseInOutCubic => "ease_in_out_cubic",
            Easing::Reverse => "reverse",
        }
    }

    /// Look up an easing by name, falling back to [`Easing::Linear`].
    ///
    /// Matching ignores case, underscores, dashes and spaces, so
    /// `"EaseInOutSine"`, `"ease_in_out_sine"` and `"ease-in-out-sine"` all
    /// resolve to the same curve. Unrecognized names log a warning.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let found = Self::ALL
            .into_iter()
            .find(|easing| easing.as_str().replace('_', "") == key);

        found.unwrap_or_else(|| {
            log::warn!("Unknown easing '{name}', falling back to linear");
            Easing::Linear
        })
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}
