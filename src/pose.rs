//! Camera pose values and the tagged update messages producers exchange.

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::util::math::{lerp_f32, sanitize_rotation, slerp_normalized};

/// One instant of camera state.
///
/// Poses are created fresh by whichever producer computed them and are not
/// mutated after being handed to the compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// World-space camera position.
    pub position: Vec3,
    /// Camera orientation. Kept normalized.
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Depth-of-field focus distance (>= 0).
    pub focus_distance: f32,
    /// Lens focal length, carried for display and interpolation only.
    pub focal_length: f32,
    /// Lens aperture (f-number), carried for display and interpolation only.
    pub aperture: f32,
    /// Checkpoints bracketing a generated sample, when the path was built
    /// with per-segment rotation.
    pub control_points: Option<Arc<ControlPoints>>,
}

/// The pair of checkpoints a generated sample was interpolated between.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoints {
    /// Checkpoint at the start of the sample's segment.
    pub entry: Pose,
    /// Checkpoint at the end of the sample's segment.
    pub exit: Pose,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov: 60.0,
            focus_distance: 3.2,
            focal_length: 50.0,
            aperture: 5.6,
            control_points: None,
        }
    }
}

impl Pose {
    /// Pose at `position` looking along `rotation` with the given field of
    /// view. Lens parameters take their defaults.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat, fov: f32) -> Self {
        Self {
            position,
            rotation: sanitize_rotation(rotation),
            fov,
            ..Self::default()
        }
    }

    /// Set the focus distance (negative values clamp to 0).
    #[must_use]
    pub fn with_focus_distance(mut self, focus_distance: f32) -> Self {
        self.focus_distance = focus_distance.max(0.0);
        self
    }

    /// Set the lens focal length and aperture.
    #[must_use]
    pub fn with_lens(mut self, focal_length: f32, aperture: f32) -> Self {
        self.focal_length = focal_length;
        self.aperture = aperture;
        self
    }

    /// Attach the bracketing checkpoints of a generated sample.
    #[must_use]
    pub fn with_control_points(mut self, points: Arc<ControlPoints>) -> Self {
        self.control_points = Some(points);
        self
    }

    /// Copy of this pose without control-point bookkeeping.
    #[must_use]
    pub fn stripped(&self) -> Self {
        Self {
            control_points: None,
            ..self.clone()
        }
    }

    /// Camera forward direction (-Z in camera space).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Componentwise interpolation toward `other`, without clamping `t`.
    ///
    /// Position and lens values are lerped, rotation is slerped and
    /// renormalized. Control points are taken from `self`.
    #[must_use]
    pub fn lerp_unclamped(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            rotation: slerp_normalized(self.rotation, other.rotation, t),
            fov: lerp_f32(self.fov, other.fov, t),
            focus_distance: lerp_f32(
                self.focus_distance,
                other.focus_distance,
                t,
            ),
            focal_length: lerp_f32(self.focal_length, other.focal_length, t),
            aperture: lerp_f32(self.aperture, other.aperture, t),
            control_points: self.control_points.clone(),
        }
    }
}

/// Number of priority tiers.
pub const TIER_COUNT: usize = 2;

/// Priority class of a pose update. Lower ordinal = higher precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriorityTag {
    /// Manual free-look input from the operator.
    FreeLook = 0,
    /// Autonomous dolly playback.
    Dolly = 1,
}

impl PriorityTag {
    /// All tiers in precedence order (highest first).
    pub const ALL: [PriorityTag; TIER_COUNT] =
        [PriorityTag::FreeLook, PriorityTag::Dolly];

    /// Queue index of this tier.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this is the lowest-precedence autonomous tier, whose
    /// rotation and focus only apply when the operator opts in.
    #[must_use]
    pub fn is_autonomous(self) -> bool {
        self == PriorityTag::Dolly
    }
}

impl std::fmt::Display for PriorityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FreeLook => f.write_str("free-look"),
            Self::Dolly => f.write_str("dolly"),
        }
    }
}

/// A pose tagged with the tier of the producer that computed it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMessage {
    /// The proposed camera pose.
    pub pose: Pose,
    /// Producer tier.
    pub priority: PriorityTag,
}

impl UpdateMessage {
    /// Message from the free-look producer.
    #[must_use]
    pub fn free_look(pose: Pose) -> Self {
        Self {
            pose,
            priority: PriorityTag::FreeLook,
        }
    }

    /// Message from dolly playback.
    #[must_use]
    pub fn dolly(pose: Pose) -> Self {
        Self {
            pose,
            priority: PriorityTag::Dolly,
        }
    }
}
