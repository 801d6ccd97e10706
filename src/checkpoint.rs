//! Operator-recorded dolly route: a start, optional intermediate
//! checkpoints, and an end.
//!
//! Once a start is recorded the end follows the live camera pose (see
//! [`CheckpointRecorder::track`]) until an explicit end is set or playback
//! freezes it.

use crate::pose::Pose;

/// Collects the poses a dolly run will visit.
#[derive(Debug, Clone, Default)]
pub struct CheckpointRecorder {
    start: Option<Pose>,
    checkpoints: Vec<Pose>,
    end: Option<Pose>,
    /// Whether `end` follows the live pose.
    tracking_end: bool,
}

impl CheckpointRecorder {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start pose. Intermediate checkpoints are discarded and
    /// the end starts following the live pose from here.
    pub fn set_start(&mut self, pose: &Pose) {
        self.start = Some(pose.stripped());
        self.checkpoints.clear();
        self.end = Some(pose.stripped());
        self.tracking_end = true;
    }

    /// Append an intermediate checkpoint.
    pub fn add_checkpoint(&mut self, pose: &Pose) {
        self.checkpoints.push(pose.stripped());
    }

    /// Pin the end pose. It no longer follows the live pose.
    pub fn set_end(&mut self, pose: &Pose) {
        self.end = Some(pose.stripped());
        self.tracking_end = false;
    }

    /// Let the end follow `live` while it is being tracked.
    pub fn track(&mut self, live: &Pose) {
        if self.tracking_end {
            self.end = Some(live.stripped());
        }
    }

    /// Stop the end from following the live pose.
    pub fn freeze_end(&mut self) {
        self.tracking_end = false;
    }

    /// Whether the end currently follows the live pose.
    #[must_use]
    pub fn is_tracking_end(&self) -> bool {
        self.tracking_end
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.start = None;
        self.checkpoints.clear();
        self.end = None;
        self.tracking_end = false;
    }

    /// Recorded start pose.
    #[must_use]
    pub fn start(&self) -> Option<&Pose> {
        self.start.as_ref()
    }

    /// Recorded end pose.
    #[must_use]
    pub fn end(&self) -> Option<&Pose> {
        self.end.as_ref()
    }

    /// Intermediate checkpoints in recording order.
    #[must_use]
    pub fn checkpoints(&self) -> &[Pose] {
        &self.checkpoints
    }

    /// Start, checkpoints, then end. `None` until a start is recorded.
    #[must_use]
    pub fn route(&self) -> Option<Vec<Pose>> {
        let start = self.start.as_ref()?;
        let end = self.end.as_ref()?;
        let mut route = Vec::with_capacity(self.checkpoints.len() + 2);
        route.push(start.clone());
        route.extend(self.checkpoints.iter().cloned());
        route.push(end.clone());
        Some(route)
    }
}
