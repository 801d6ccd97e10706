//! Dolly path generation.
//!
//! Turns an ordered list of checkpoint poses into a dense sequence of
//! sampled poses. Positions follow a cubic Hermite spline through every
//! checkpoint; rotation follows one of two [`RotationPolicy`] choices; lens
//! values are lerped per segment.

mod hermite;

use std::sync::Arc;

use glam::Vec3;

use crate::pose::{ControlPoints, Pose};
use crate::util::math::{lerp_f32, slerp_normalized};

/// How sample rotations are derived from checkpoint rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Slerp from the first to the last checkpoint over the whole path,
    /// ignoring intermediate rotations. The rotation rate never jumps at a
    /// checkpoint.
    #[default]
    GlobalSmooth,
    /// Slerp between each segment's own checkpoints. Samples record their
    /// bracketing checkpoints so playback can re-ease rotation per segment.
    PerSegment,
}

impl RotationPolicy {
    /// Map the `smooth_rotation` option to a policy.
    #[must_use]
    pub fn from_smooth_flag(smooth_rotation: bool) -> Self {
        if smooth_rotation {
            Self::GlobalSmooth
        } else {
            Self::PerSegment
        }
    }
}

/// Receives every generated path, e.g. to draw it as a debug overlay.
pub trait PathObserver {
    /// Called once per generated path with the samples and their positions.
    fn on_path_generated(&mut self, samples: &[Pose], polyline: &[Vec3]);
}

impl PathObserver for () {
    fn on_path_generated(&mut self, _samples: &[Pose], _polyline: &[Vec3]) {}
}

/// Keeps the polyline of the most recently generated path.
#[derive(Debug, Clone, Default)]
pub struct PathPolyline {
    /// Sample positions, in path order.
    pub points: Vec<Vec3>,
    /// How many paths have been observed.
    pub generations: usize,
}

impl PathObserver for PathPolyline {
    fn on_path_generated(&mut self, _samples: &[Pose], polyline: &[Vec3]) {
        self.points.clear();
        self.points.extend_from_slice(polyline);
        self.generations += 1;
    }
}

/// Generates dense sample sequences through checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathGenerator {
    samples_per_segment: usize,
    policy: RotationPolicy,
}

impl PathGenerator {
    /// Minimum samples per segment; the final segment spreads its samples
    /// over `samples - 1` steps.
    pub const MIN_SAMPLES_PER_SEGMENT: usize = 2;

    /// Generator producing `samples_per_segment` samples per checkpoint
    /// span. Values below 2 are raised to 2.
    #[must_use]
    pub fn new(samples_per_segment: usize, policy: RotationPolicy) -> Self {
        let samples_per_segment = if samples_per_segment
            < Self::MIN_SAMPLES_PER_SEGMENT
        {
            log::warn!(
                "samples_per_segment {samples_per_segment} too small, using {}",
                Self::MIN_SAMPLES_PER_SEGMENT
            );
            Self::MIN_SAMPLES_PER_SEGMENT
        } else {
            samples_per_segment
        };
        Self {
            samples_per_segment,
            policy,
        }
    }

    /// Samples generated per checkpoint span.
    #[must_use]
    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    /// Rotation policy applied to samples.
    #[must_use]
    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Generate samples without reporting to an observer.
    #[must_use]
    pub fn generate(&self, checkpoints: &[Pose]) -> Vec<Pose> {
        self.generate_observed(checkpoints, &mut ())
    }

    /// Generate `samples_per_segment * (checkpoints.len() - 1)` samples and
    /// report them to `observer`.
    ///
    /// Fewer than two checkpoints yields an empty sequence.
    pub fn generate_observed(
        &self,
        checkpoints: &[Pose],
        observer: &mut dyn PathObserver,
    ) -> Vec<Pose> {
        if checkpoints.len() < 2 {
            log::warn!(
                "Not enough checkpoints for a dolly path ({})",
                checkpoints.len()
            );
            return Vec::new();
        }

        let n = self.samples_per_segment;
        let segments = checkpoints.len() - 1;
        let total = n * segments;
        let positions: Vec<Vec3> =
            checkpoints.iter().map(|cp| cp.position).collect();
        let first_rotation = checkpoints[0].rotation;
        let last_rotation = checkpoints[segments].rotation;

        let mut samples = Vec::with_capacity(total);
        for j in 0..segments {
            let entry = &checkpoints[j];
            let exit = &checkpoints[j + 1];
            let (m0, m1) = hermite::segment_tangents(&positions, j);

            // The last segment lands its final sample on the last checkpoint.
            let denominator = if j + 1 == segments { n - 1 } else { n };

            let control_points = match self.policy {
                RotationPolicy::GlobalSmooth => None,
                RotationPolicy::PerSegment => Some(Arc::new(ControlPoints {
                    entry: entry.stripped(),
                    exit: exit.stripped(),
                })),
            };

            for i in 0..n {
                let t = i as f32 / denominator as f32;
                let global_index = j * n + i;
                let rotation = match self.policy {
                    RotationPolicy::GlobalSmooth => slerp_normalized(
                        first_rotation,
                        last_rotation,
                        global_index as f32 / total as f32,
                    ),
                    RotationPolicy::PerSegment => {
                        slerp_normalized(entry.rotation, exit.rotation, t)
                    }
                };

                samples.push(Pose {
                    position: hermite::point(
                        entry.position,
                        m0,
                        exit.position,
                        m1,
                        t,
                    ),
                    rotation,
                    fov: lerp_f32(entry.fov, exit.fov, t),
                    focus_distance: lerp_f32(
                        entry.focus_distance,
                        exit.focus_distance,
                        t,
                    ),
                    focal_length: lerp_f32(
                        entry.focal_length,
                        exit.focal_length,
                        t,
                    ),
                    aperture: lerp_f32(entry.aperture, exit.aperture, t),
                    control_points: control_points.clone(),
                });
            }
        }

        let polyline: Vec<Vec3> = samples.iter().map(|s| s.position).collect();
        observer.on_path_generated(&samples, &polyline);
        log::debug!(
            "Generated dolly path: {} samples over {segments} segments",
            samples.len()
        );
        samples
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Quat;

    use super::*;

    fn checkpoint(x: f32, y: f32, z: f32) -> Pose {
        Pose::new(Vec3::new(x, y, z), Quat::IDENTITY, 60.0)
    }

    fn l_shape() -> Vec<Pose> {
        vec![
            checkpoint(0.0, 0.0, 0.0),
            checkpoint(10.0, 0.0, 0.0),
            checkpoint(10.0, 10.0, 0.0),
        ]
    }

    #[test]
    fn test_sample_count() {
        for k in 2..6 {
            for n in [2, 3, 7, 50] {
                let checkpoints: Vec<Pose> =
                    (0..k).map(|i| checkpoint(i as f32, 0.0, 0.0)).collect();
                let generator = PathGenerator::new(n, RotationPolicy::GlobalSmooth);
                assert_eq!(generator.generate(&checkpoints).len(), n * (k - 1));
            }
        }
    }

    #[test]
    fn test_too_few_checkpoints_is_empty() {
        let generator = PathGenerator::new(10, RotationPolicy::PerSegment);
        assert!(generator.generate(&[]).is_empty());
        assert!(generator.generate(&[checkpoint(1.0, 2.0, 3.0)]).is_empty());
    }

    #[test]
    fn test_endpoints_match_checkpoints() {
        let checkpoints = vec![
            checkpoint(-3.0, 1.0, 2.0),
            checkpoint(4.0, 5.0, -1.0),
            checkpoint(9.0, -2.0, 7.0),
            checkpoint(12.0, 0.5, 0.5),
        ];
        for n in [2, 3, 10, 64] {
            let samples = PathGenerator::new(n, RotationPolicy::PerSegment)
                .generate(&checkpoints);
            let first = samples.first().unwrap().position;
            let last = samples.last().unwrap().position;
            assert!((first - checkpoints[0].position).length() < 1e-4);
            assert!((last - checkpoints[3].position).length() < 1e-4);
        }
    }

    #[test]
    fn test_l_shaped_path() {
        let samples = PathGenerator::new(4, RotationPolicy::GlobalSmooth)
            .generate(&l_shape());
        assert_eq!(samples.len(), 8);
        // Second segment starts exactly on the middle checkpoint.
        assert!((samples[4].position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        // First segment approaches it from -x, bending toward +y.
        assert!(samples[3].position.x < 10.0);
        assert!((samples[7].position - Vec3::new(10.0, 10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_two_checkpoints_are_a_straight_line() {
        let samples = PathGenerator::new(5, RotationPolicy::GlobalSmooth)
            .generate(&[checkpoint(0.0, 0.0, 0.0), checkpoint(8.0, 0.0, 0.0)]);
        assert_eq!(samples.len(), 5);
        for pair in samples.windows(2) {
            assert!(pair[1].position.x > pair[0].position.x);
            assert!(pair[1].position.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_global_smooth_ignores_intermediate_rotations() {
        let mut checkpoints = l_shape();
        checkpoints[1].rotation = Quat::from_rotation_x(1.2);
        checkpoints[2].rotation = Quat::from_rotation_y(FRAC_PI_2);

        let n = 6;
        let samples = PathGenerator::new(n, RotationPolicy::GlobalSmooth)
            .generate(&checkpoints);
        let total = samples.len();
        for (i, sample) in samples.iter().enumerate() {
            let expected = Quat::IDENTITY
                .slerp(checkpoints[2].rotation, i as f32 / total as f32);
            assert!(
                sample.rotation.abs_diff_eq(expected, 1e-5),
                "sample {i}: {:?} vs {expected:?}",
                sample.rotation
            );
            assert!(sample.control_points.is_none());
        }
    }

    #[test]
    fn test_per_segment_rotation_hits_each_checkpoint() {
        let mut checkpoints = l_shape();
        checkpoints[1].rotation = Quat::from_rotation_y(FRAC_PI_2);

        let n = 4;
        let samples = PathGenerator::new(n, RotationPolicy::PerSegment)
            .generate(&checkpoints);
        assert!(samples[0].rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert!(samples[n].rotation.abs_diff_eq(checkpoints[1].rotation, 1e-6));
        assert!(samples[2 * n - 1].rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));

        let points = samples[1].control_points.as_ref().unwrap();
        assert_eq!(points.entry.position, checkpoints[0].position);
        assert_eq!(points.exit.position, checkpoints[1].position);
        let points = samples[n + 1].control_points.as_ref().unwrap();
        assert_eq!(points.entry.position, checkpoints[1].position);
        assert_eq!(points.exit.position, checkpoints[2].position);
    }

    #[test]
    fn test_lens_values_lerp_per_segment() {
        let checkpoints = vec![
            checkpoint(0.0, 0.0, 0.0).with_focus_distance(1.0),
            Pose::new(Vec3::X * 4.0, Quat::IDENTITY, 100.0).with_focus_distance(5.0),
        ];
        let samples = PathGenerator::new(5, RotationPolicy::GlobalSmooth)
            .generate(&checkpoints);
        // Final segment steps by 1/4.
        assert!((samples[2].fov - 80.0).abs() < 1e-4);
        assert!((samples[2].focus_distance - 3.0).abs() < 1e-4);
        assert!((samples[4].fov - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_small_sample_count_is_raised() {
        let generator = PathGenerator::new(1, RotationPolicy::GlobalSmooth);
        assert_eq!(generator.samples_per_segment(), 2);
        assert_eq!(generator.generate(&l_shape()).len(), 4);
    }

    #[test]
    fn test_observer_receives_polyline() {
        let mut polyline = PathPolyline::default();
        let samples = PathGenerator::new(3, RotationPolicy::PerSegment)
            .generate_observed(&l_shape(), &mut polyline);
        assert_eq!(polyline.generations, 1);
        assert_eq!(polyline.points.len(), samples.len());
        assert_eq!(polyline.points[2], samples[2].position);
    }

    #[test]
    fn test_observer_not_called_for_degenerate_input() {
        let mut polyline = PathPolyline::default();
        let samples = PathGenerator::new(3, RotationPolicy::PerSegment)
            .generate_observed(&[checkpoint(0.0, 0.0, 0.0)], &mut polyline);
        assert!(samples.is_empty());
        assert_eq!(polyline.generations, 0);
    }
}
