use glam::{Quat, Vec3};

use super::{PlaybackMode, PlaybackSettings};
use crate::path::RotationPolicy;
use crate::pose::{ControlPoints, Pose, UpdateMessage};
use crate::speed::SharedSpeed;
use crate::util::math::{approx_zero, move_towards, slerp_normalized};

/// Walks a waypoint sequence at constant speed, one pose per tick.
///
/// A virtual cursor moves toward the next waypoint at
/// `speed * multiplier * dt`. The cursor's share of the current segment
/// interpolates between the segment's two waypoints. Direct playback eases
/// that share; path playback eases only the per-segment rotation, measured
/// over the checkpoint span a sample came from.
pub struct PlaybackEngine {
    /// Waypoints being traversed. Never mutated after construction.
    waypoints: Vec<Pose>,
    /// Index of the waypoint the current segment starts at.
    index: usize,
    /// Constant-speed cursor position.
    cursor: Vec3,
    mode: PlaybackMode,
    settings: PlaybackSettings,
    speed: SharedSpeed,
    finished: bool,
    /// Poses emitted so far.
    emitted: usize,
}

impl PlaybackEngine {
    /// Direct playback from `start` to `end`.
    #[must_use]
    pub fn direct(
        start: &Pose,
        end: &Pose,
        settings: PlaybackSettings,
        speed: SharedSpeed,
    ) -> Self {
        Self::new(
            vec![start.stripped(), end.stripped()],
            PlaybackMode::Direct,
            settings,
            speed,
        )
    }

    /// Playback along a generated path built with `rotation`.
    #[must_use]
    pub fn along_path(
        samples: Vec<Pose>,
        rotation: RotationPolicy,
        settings: PlaybackSettings,
        speed: SharedSpeed,
    ) -> Self {
        Self::new(samples, PlaybackMode::Path { rotation }, settings, speed)
    }

    fn new(
        waypoints: Vec<Pose>,
        mode: PlaybackMode,
        settings: PlaybackSettings,
        speed: SharedSpeed,
    ) -> Self {
        let cursor = waypoints.first().map_or(Vec3::ZERO, |wp| wp.position);
        let finished = waypoints.len() < 2;
        if finished {
            log::warn!(
                "Dolly playback needs at least 2 waypoints, got {}",
                waypoints.len()
            );
        } else {
            log::info!(
                "Dolly playback started: {} waypoints ({mode:?}, {})",
                waypoints.len(),
                settings.easing
            );
        }
        Self {
            waypoints,
            index: 0,
            cursor,
            mode,
            settings,
            speed,
            finished,
            emitted: 0,
        }
    }

    /// Advance by `dt` seconds and return this tick's pose, or `None` once
    /// playback has finished or been cancelled.
    pub fn step(&mut self, dt: f32) -> Option<UpdateMessage> {
        if self.finished {
            return None;
        }

        let total_distance = loop {
            if self.index + 1 >= self.waypoints.len() {
                self.finish("reached last waypoint");
                return None;
            }
            let distance = self.waypoints[self.index]
                .position
                .distance(self.waypoints[self.index + 1].position);
            if !approx_zero(distance) {
                break distance;
            }
            match self.mode {
                PlaybackMode::Direct => {
                    self.finish("zero-length direct segment");
                    return None;
                }
                PlaybackMode::Path { .. } => self.index += 1,
            }
        };

        let current = &self.waypoints[self.index];
        let next = &self.waypoints[self.index + 1];

        let max_step =
            self.settings.speed * self.speed.multiplier() * dt.max(0.0);
        self.cursor = move_towards(self.cursor, next.position, max_step);
        let linear_distance = self.cursor.distance(next.position);
        let progress = (total_distance - linear_distance) / total_distance;
        // Dense path samples already carry the route's shape; easing them
        // per sample would make the speed pulse at every waypoint.
        let t = match self.mode {
            PlaybackMode::Direct => self.ease(progress),
            PlaybackMode::Path { .. } => progress.clamp(0.0, 1.0),
        };

        let mut pose = current.lerp_unclamped(next, t);
        let arrived = approx_zero(linear_distance);

        if matches!(
            self.mode,
            PlaybackMode::Path {
                rotation: RotationPolicy::PerSegment
            }
        ) {
            // Once the cursor sits on `next`, it belongs to next's span.
            let source = if arrived { next } else { current };
            if let Some(rotation) = source
                .control_points
                .as_deref()
                .and_then(|points| self.checkpoint_rotation(points))
            {
                pose.rotation = rotation;
            }
        }
        pose.control_points = None;

        if arrived {
            self.index += 1;
            if self.index + 1 >= self.waypoints.len() {
                self.finish("reached last waypoint");
            }
        }

        self.emitted += 1;
        Some(UpdateMessage::dolly(pose))
    }

    /// Stop immediately. No further poses are produced.
    pub fn cancel(&mut self) {
        if !self.finished {
            log::info!(
                "Dolly playback cancelled after {} ticks",
                self.emitted
            );
        }
        self.waypoints.clear();
        self.index = 0;
        self.finished = true;
    }

    /// Whether playback has ended (completed, degenerate or cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Traversal mode.
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Index of the waypoint the current segment starts at.
    #[must_use]
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    /// Number of waypoints being traversed (0 after cancellation).
    #[must_use]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Poses emitted so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn ease(&self, progress: f32) -> f32 {
        self.settings.easing.evaluate(progress).clamp(0.0, 1.0)
    }

    /// Rotation re-eased over the checkpoint span a sample came from.
    fn checkpoint_rotation(&self, points: &ControlPoints) -> Option<Quat> {
        let span = points.entry.position.distance(points.exit.position);
        if approx_zero(span) {
            return None;
        }
        let remaining = self.cursor.distance(points.exit.position);
        let eased = self.ease((span - remaining) / span);
        Some(slerp_normalized(
            points.entry.rotation,
            points.exit.rotation,
            eased,
        ))
    }

    fn finish(&mut self, reason: &str) {
        self.finished = true;
        log::info!(
            "Dolly playback finished ({reason}) after {} ticks",
            self.emitted
        );
    }
}

impl std::fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("waypoints", &self.waypoints.len())
            .field("index", &self.index)
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("settings", &self.settings)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;
    use std::sync::Arc;

    use super::*;
    use crate::path::PathGenerator;
    use crate::pose::PriorityTag;
    use crate::speed::FixedSpeed;
    use crate::util::easing::Easing;

    fn unit_speed() -> SharedSpeed {
        Arc::new(FixedSpeed(1.0))
    }

    fn settings(speed: f32, easing: Easing) -> PlaybackSettings {
        PlaybackSettings { speed, easing }
    }

    fn at(x: f32, y: f32, z: f32) -> Pose {
        Pose::new(Vec3::new(x, y, z), Quat::IDENTITY, 60.0)
    }

    fn drain(engine: &mut PlaybackEngine, dt: f32) -> Vec<Pose> {
        let mut poses = Vec::new();
        while let Some(msg) = engine.step(dt) {
            assert_eq!(msg.priority, PriorityTag::Dolly);
            poses.push(msg.pose);
            assert!(poses.len() < 10_000, "playback never terminated");
        }
        poses
    }

    #[test]
    fn test_direct_identical_endpoints_emit_nothing() {
        let pose = at(3.0, 1.0, -2.0);
        let mut engine = PlaybackEngine::direct(
            &pose,
            &pose,
            settings(5.0, Easing::Linear),
            unit_speed(),
        );
        assert!(engine.step(0.016).is_none());
        assert!(engine.is_finished());
        assert_eq!(engine.emitted(), 0);
    }

    #[test]
    fn test_direct_linear_traversal() {
        let mut engine = PlaybackEngine::direct(
            &at(0.0, 0.0, 0.0),
            &at(10.0, 0.0, 0.0),
            settings(5.0, Easing::Linear),
            unit_speed(),
        );
        let poses = drain(&mut engine, 0.5);
        let xs: Vec<f32> = poses.iter().map(|p| p.position.x).collect();
        assert_eq!(xs.len(), 4);
        for (x, expected) in xs.iter().zip([2.5, 5.0, 7.5, 10.0]) {
            assert!((x - expected).abs() < 1e-4, "{xs:?}");
        }
        assert!(engine.is_finished());
    }

    #[test]
    fn test_direct_interpolates_fov_and_focus() {
        let start = at(0.0, 0.0, 0.0).with_focus_distance(2.0);
        let mut end = at(4.0, 0.0, 0.0).with_focus_distance(6.0);
        end.fov = 100.0;
        let mut engine = PlaybackEngine::direct(
            &start,
            &end,
            settings(2.0, Easing::Linear),
            unit_speed(),
        );
        let first = engine.step(1.0).unwrap().pose;
        assert!((first.fov - 80.0).abs() < 1e-4);
        assert!((first.focus_distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_easing_shapes_progress() {
        let mut engine = PlaybackEngine::direct(
            &at(0.0, 0.0, 0.0),
            &at(10.0, 0.0, 0.0),
            settings(2.5, Easing::QuadIn),
            unit_speed(),
        );
        // progress 0.25 -> eased 0.0625
        let pose = engine.step(1.0).unwrap().pose;
        assert!((pose.position.x - 0.625).abs() < 1e-4);
    }

    #[test]
    fn test_reverse_easing_is_clamped() {
        let mut engine = PlaybackEngine::direct(
            &at(0.0, 0.0, 0.0),
            &at(10.0, 0.0, 0.0),
            settings(2.5, Easing::Reverse),
            unit_speed(),
        );
        let pose = engine.step(1.0).unwrap().pose;
        assert!((pose.position.x - 7.5).abs() < 1e-4);
        let poses = drain(&mut engine, 1.0);
        assert!(poses.last().unwrap().position.x.abs() < 1e-4);
    }

    #[test]
    fn test_speed_multiplier_scales_traversal() {
        let mut engine = PlaybackEngine::direct(
            &at(0.0, 0.0, 0.0),
            &at(10.0, 0.0, 0.0),
            settings(5.0, Easing::Linear),
            Arc::new(FixedSpeed(2.0)),
        );
        assert_eq!(drain(&mut engine, 0.5).len(), 2);
    }

    #[test]
    fn test_cancel_stops_immediately() {
        let mut engine = PlaybackEngine::direct(
            &at(0.0, 0.0, 0.0),
            &at(10.0, 0.0, 0.0),
            settings(1.0, Easing::Linear),
            unit_speed(),
        );
        assert!(engine.step(1.0).is_some());
        engine.cancel();
        assert!(engine.is_finished());
        assert!(engine.step(1.0).is_none());
        assert_eq!(engine.waypoint_count(), 0);
    }

    #[test]
    fn test_path_skips_zero_length_segments() {
        let samples = vec![at(0.0, 0.0, 0.0), at(0.0, 0.0, 0.0), at(4.0, 0.0, 0.0)];
        let mut engine = PlaybackEngine::along_path(
            samples,
            RotationPolicy::GlobalSmooth,
            settings(2.0, Easing::Linear),
            unit_speed(),
        );
        let first = engine.step(1.0).unwrap().pose;
        assert!((first.position.x - 2.0).abs() < 1e-4);
        assert_eq!(engine.waypoint_index(), 1);
        let poses = drain(&mut engine, 1.0);
        assert_eq!(poses.len(), 1);
        assert!((poses[0].position.x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_path_with_too_few_samples_is_finished() {
        let mut engine = PlaybackEngine::along_path(
            vec![at(1.0, 1.0, 1.0)],
            RotationPolicy::PerSegment,
            PlaybackSettings::default(),
            unit_speed(),
        );
        assert!(engine.is_finished());
        assert!(engine.step(0.1).is_none());
    }

    #[test]
    fn test_global_smooth_rotation_follows_first_to_last() {
        let mut checkpoints = vec![at(0.0, 0.0, 0.0), at(10.0, 0.0, 0.0), at(10.0, 10.0, 0.0)];
        checkpoints[1].rotation = Quat::from_rotation_x(0.9);
        checkpoints[2].rotation = Quat::from_rotation_y(FRAC_PI_2);
        let samples =
            PathGenerator::new(5, RotationPolicy::GlobalSmooth).generate(&checkpoints);
        let total = samples.len();

        // Fast enough to land on exactly one waypoint per tick.
        let mut engine = PlaybackEngine::along_path(
            samples,
            RotationPolicy::GlobalSmooth,
            settings(1000.0, Easing::EaseInOutCubic),
            unit_speed(),
        );
        let poses = drain(&mut engine, 1.0);
        assert_eq!(poses.len(), total - 1);
        for (i, pose) in poses.iter().enumerate() {
            let global_index = i + 1;
            let expected = Quat::IDENTITY.slerp(
                checkpoints[2].rotation,
                global_index as f32 / total as f32,
            );
            assert!(
                pose.rotation.abs_diff_eq(expected, 1e-4),
                "sample {global_index}: {:?} vs {expected:?}",
                pose.rotation
            );
        }
    }

    #[test]
    fn test_per_segment_rotation_is_re_eased_over_checkpoint_span() {
        let start = at(0.0, 0.0, 0.0);
        let mut end = at(10.0, 0.0, 0.0);
        end.rotation = Quat::from_rotation_y(FRAC_PI_2);
        let samples =
            PathGenerator::new(5, RotationPolicy::PerSegment).generate(&[start, end.clone()]);

        let mut engine = PlaybackEngine::along_path(
            samples,
            RotationPolicy::PerSegment,
            settings(1.0, Easing::QuadIn),
            unit_speed(),
        );
        // Cursor at x=1: a tenth of the checkpoint span, eased to 0.01.
        let pose = engine.step(1.0).unwrap().pose;
        let expected = Quat::IDENTITY.slerp(end.rotation, 0.01);
        assert!(pose.rotation.abs_diff_eq(expected, 1e-4));
        // Position follows the cursor without easing.
        assert!((pose.position.x - 1.0).abs() < 1e-4);
        assert!(pose.control_points.is_none());
    }

    #[test]
    fn test_per_segment_path_ends_on_last_checkpoint() {
        let mut checkpoints = vec![at(0.0, 0.0, 0.0), at(6.0, 2.0, 0.0), at(9.0, 9.0, 3.0)];
        checkpoints[2].rotation = Quat::from_rotation_z(0.7);
        let samples =
            PathGenerator::new(8, RotationPolicy::PerSegment).generate(&checkpoints);
        let mut engine = PlaybackEngine::along_path(
            samples,
            RotationPolicy::PerSegment,
            settings(3.0, Easing::EaseInOutSine),
            unit_speed(),
        );
        let poses = drain(&mut engine, 1.0 / 60.0);
        let last = poses.last().unwrap();
        assert!((last.position - checkpoints[2].position).length() < 1e-3);
        assert!(last.rotation.abs_diff_eq(checkpoints[2].rotation, 1e-3));
        assert!(poses.iter().all(|p| p.rotation.is_normalized()));
    }

    fn l_shaped_samples(policy: RotationPolicy) -> Vec<Pose> {
        PathGenerator::new(10, policy).generate(&[
            at(0.0, 0.0, 0.0),
            at(10.0, 0.0, 0.0),
            at(10.0, 10.0, 0.0),
        ])
    }

    #[test]
    fn test_path_position_is_not_eased_per_sample() {
        for easing in [Easing::QuadIn, Easing::Reverse, Easing::EaseInOutCubic] {
            let mut engine = PlaybackEngine::along_path(
                l_shaped_samples(RotationPolicy::GlobalSmooth),
                RotationPolicy::GlobalSmooth,
                settings(5.0, easing),
                unit_speed(),
            );
            let poses = drain(&mut engine, 0.05);
            // First segment runs along +x; the camera never backs up.
            let xs: Vec<f32> = poses
                .iter()
                .map(|p| p.position.x)
                .take_while(|&x| x < 9.9)
                .collect();
            assert!(xs.len() > 10, "{easing}: {xs:?}");
            for pair in xs.windows(2) {
                assert!(pair[1] >= pair[0] - 1e-4, "{easing}: {xs:?}");
            }
            let last = poses.last().unwrap().position;
            assert!((last - Vec3::new(10.0, 10.0, 0.0)).length() < 1e-3);
        }
    }

    #[test]
    fn test_path_step_length_is_steady() {
        let mut engine = PlaybackEngine::along_path(
            vec![at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), at(2.0, 0.0, 0.0), at(3.0, 0.0, 0.0)],
            RotationPolicy::GlobalSmooth,
            settings(1.0, Easing::QuadIn),
            unit_speed(),
        );
        let xs: Vec<f32> = drain(&mut engine, 0.25).iter().map(|p| p.position.x).collect();
        assert_eq!(xs.len(), 12);
        for (i, x) in xs.iter().enumerate() {
            assert!((x - (i + 1) as f32 * 0.25).abs() < 1e-4, "{xs:?}");
        }
    }

    #[test]
    fn test_per_segment_duplicate_checkpoints_keep_rotation_finite() {
        let mut checkpoints = vec![at(0.0, 0.0, 0.0), at(5.0, 0.0, 0.0), at(5.0, 0.0, 0.0)];
        checkpoints[1].rotation = Quat::from_rotation_y(0.8);
        checkpoints[2].rotation = Quat::from_rotation_y(-0.8);
        let samples =
            PathGenerator::new(6, RotationPolicy::PerSegment).generate(&checkpoints);
        let mut engine = PlaybackEngine::along_path(
            samples,
            RotationPolicy::PerSegment,
            settings(2.0, Easing::EaseInOutSine),
            unit_speed(),
        );
        let poses = drain(&mut engine, 0.1);
        assert!(!poses.is_empty());
        for pose in &poses {
            assert!(pose.rotation.is_finite(), "{:?}", pose.rotation);
            assert!(pose.rotation.is_normalized());
            assert!(pose.position.is_finite());
        }
        let last = poses.last().unwrap();
        assert!((last.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-3);
    }
}
