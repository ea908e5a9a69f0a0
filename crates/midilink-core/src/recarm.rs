//! Record-arm propagation from matched children to their targets.
//!
//! Several source strips can share one target (inherited matches). A target
//! is armed if any strip pointing at it is armed.

use crate::error::Result;
use crate::strip::{ChannelId, ChannelStrip};
use crate::tree::{MatchOutcome, MatchSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecArmTarget {
    pub target: ChannelStrip,
    pub armed: bool,
}

/// Target states to write, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecArmPlan {
    targets: Vec<RecArmTarget>,
}

impl RecArmPlan {
    /// Aggregate rec-arm state over every matched strip in `outcome`.
    ///
    /// `armed` is queried once per source strip; its errors abort the plan.
    pub fn from_matches<F>(outcome: &MatchOutcome, mut armed: F) -> Result<Self>
    where
        F: FnMut(&ChannelStrip) -> Result<bool>,
    {
        let mut plan = Self::default();
        for matched in outcome.iter(MatchSet::Both) {
            let state = armed(&matched.strip)?;
            plan.merge(&matched.target, state);
        }
        Ok(plan)
    }

    fn merge(&mut self, target: &ChannelStrip, armed: bool) {
        match self.targets.iter_mut().find(|t| t.target.id == target.id) {
            Some(existing) => existing.armed |= armed,
            None => self.targets.push(RecArmTarget {
                target: target.clone(),
                armed,
            }),
        }
    }

    pub fn targets(&self) -> &[RecArmTarget] {
        &self.targets
    }

    pub fn is_armed(&self, id: &ChannelId) -> Option<bool> {
        self.targets
            .iter()
            .find(|t| &t.target.id == id)
            .map(|t| t.armed)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
