//! Per-tick arbitration of pose updates from concurrent producers.
//!
//! The [`PriorityCompositor`] exclusively owns the authoritative camera
//! pose. Producers [`submit`](PriorityCompositor::submit) tagged updates into
//! one bounded FIFO per tier; each [`tick`](PriorityCompositor::tick)
//! applies at most one update, from the highest-precedence tier that has
//! one. Lower tiers wait, in order, until higher tiers are empty.
//!
//! Position and FOV always follow the applied update. Rotation and the
//! focus/lens values follow it too, except for the autonomous `Dolly` tier,
//! where they only apply when `follow_rotation` / `auto_focus` is set: by
//! default the operator keeps rotational and focus control while the dolly
//! drives position.

mod queue;

use queue::TierQueues;

use crate::options::CompositorOptions;
use crate::pose::{Pose, PriorityTag, UpdateMessage};
use crate::speed::SharedSpeed;
use crate::status::{StatusSink, StatusSnapshot};
use crate::util::math::sanitize_rotation;

/// Owns the current pose and applies tiered updates once per tick.
pub struct PriorityCompositor {
    current: Pose,
    queues: TierQueues,
    follow_rotation: bool,
    auto_focus: bool,
    speed: Option<SharedSpeed>,
    status: Box<dyn StatusSink>,
    last_applied: Option<PriorityTag>,
}

impl PriorityCompositor {
    /// Compositor starting from `initial` with the given arbitration rules.
    #[must_use]
    pub fn new(initial: &Pose, options: &CompositorOptions) -> Self {
        let mut current = initial.stripped();
        current.rotation = sanitize_rotation(current.rotation);
        Self {
            current,
            queues: TierQueues::new(options.queue_capacity),
            follow_rotation: options.follow_rotation,
            auto_focus: options.auto_focus,
            speed: None,
            status: Box::new(()),
            last_applied: None,
        }
    }

    /// Report the multiplier of `speed` in status snapshots.
    #[must_use]
    pub fn with_speed(mut self, speed: SharedSpeed) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Replace the speed provider reported in status snapshots.
    pub fn set_speed(&mut self, speed: SharedSpeed) {
        self.speed = Some(speed);
    }

    /// Push a status snapshot to `sink` every tick.
    #[must_use]
    pub fn with_status_sink(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.status = sink;
        self
    }

    /// Replace the status sink.
    pub fn set_status_sink(&mut self, sink: Box<dyn StatusSink>) {
        self.status = sink;
    }

    /// Let dolly updates drive rotation.
    pub fn set_follow_rotation(&mut self, follow: bool) {
        self.follow_rotation = follow;
    }

    /// Let dolly updates drive focus distance and lens values.
    pub fn set_auto_focus(&mut self, auto_focus: bool) {
        self.auto_focus = auto_focus;
    }

    /// Whether dolly updates drive rotation.
    #[must_use]
    pub fn follow_rotation(&self) -> bool {
        self.follow_rotation
    }

    /// Whether dolly updates drive focus.
    #[must_use]
    pub fn auto_focus(&self) -> bool {
        self.auto_focus
    }

    /// Queue an update for a later tick.
    ///
    /// A full tier drops its oldest pending update.
    pub fn submit(&mut self, message: UpdateMessage) {
        let tier = message.priority;
        if self.queues.push(tier, message.pose).is_some() {
            log::debug!("{tier} queue full, dropped oldest update");
        }
    }

    /// Apply at most one queued update and publish the result.
    ///
    /// Returns the tier that was serviced, or `None` if every queue was
    /// empty (the pose is unchanged).
    pub fn tick(&mut self) -> Option<PriorityTag> {
        let applied = self.queues.pop_highest().map(|(tier, update)| {
            self.current = self.compose(tier, update);
            tier
        });
        self.last_applied = applied;

        let multiplier = self.speed.as_ref().map_or(1.0, |s| s.multiplier());
        let status =
            StatusSnapshot::from_pose(&self.current, applied, multiplier);
        self.status.show(&status);
        applied
    }

    /// The authoritative pose, as of the last tick.
    #[must_use]
    pub fn current(&self) -> &Pose {
        &self.current
    }

    /// Tier applied on the last tick, if any.
    #[must_use]
    pub fn last_applied(&self) -> Option<PriorityTag> {
        self.last_applied
    }

    /// Number of updates waiting in `tier`.
    #[must_use]
    pub fn pending(&self, tier: PriorityTag) -> usize {
        self.queues.len(tier)
    }

    /// Discard every pending update in `tier`. Returns how many were
    /// dropped.
    pub fn clear_tier(&mut self, tier: PriorityTag) -> usize {
        self.queues.clear(tier)
    }

    /// Build the next pose from the current one and an update.
    fn compose(&self, tier: PriorityTag, update: Pose) -> Pose {
        let autonomous = tier.is_autonomous();
        let take_rotation = !autonomous || self.follow_rotation;
        let take_focus = !autonomous || self.auto_focus;

        Pose {
            position: update.position,
            rotation: if take_rotation {
                sanitize_rotation(update.rotation)
            } else {
                self.current.rotation
            },
            fov: update.fov,
            focus_distance: if take_focus {
                update.focus_distance.max(0.0)
            } else {
                self.current.focus_distance
            },
            focal_length: if take_focus {
                update.focal_length
            } else {
                self.current.focal_length
            },
            aperture: if take_focus {
                update.aperture
            } else {
                self.current.aperture
            },
            control_points: None,
        }
    }
}

impl std::fmt::Debug for PriorityCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityCompositor")
            .field("current", &self.current)
            .field("queues", &self.queues)
            .field("follow_rotation", &self.follow_rotation)
            .field("auto_focus", &self.auto_focus)
            .field("last_applied", &self.last_applied)
            .finish_non_exhaustive()
    }
}
