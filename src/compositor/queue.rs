use std::collections::VecDeque;

use crate::pose::{Pose, PriorityTag, TIER_COUNT};

/// One bounded FIFO per priority tier, indexed by tier ordinal.
#[derive(Debug, Clone)]
pub(crate) struct TierQueues {
    tiers: [VecDeque<Pose>; TIER_COUNT],
    capacity: usize,
}

impl TierQueues {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tiers: std::array::from_fn(|_| VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Enqueue at the back of `tier`. Returns the oldest entry if the tier
    /// was full.
    pub(crate) fn push(&mut self, tier: PriorityTag, pose: Pose) -> Option<Pose> {
        let queue = &mut self.tiers[tier.index()];
        let dropped = if queue.len() >= self.capacity {
            queue.pop_front()
        } else {
            None
        };
        queue.push_back(pose);
        dropped
    }

    /// Dequeue one entry from the highest-precedence non-empty tier.
    pub(crate) fn pop_highest(&mut self) -> Option<(PriorityTag, Pose)> {
        PriorityTag::ALL.into_iter().find_map(|tier| {
            self.tiers[tier.index()].pop_front().map(|pose| (tier, pose))
        })
    }

    pub(crate) fn len(&self, tier: PriorityTag) -> usize {
        self.tiers[tier.index()].len()
    }

    pub(crate) fn clear(&mut self, tier: PriorityTag) -> usize {
        let queue = &mut self.tiers[tier.index()];
        let cleared = queue.len();
        queue.clear();
        cleared
    }
}
