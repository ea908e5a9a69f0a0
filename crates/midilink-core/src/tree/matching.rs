//! Recursive matching of a source channel tree against a destination tree.
//!
//! Every source child whose address finds a counterpart at the same level of
//! the destination tree targets that counterpart and descends into it, with
//! the counterpart becoming the fallback for the next level down. A child
//! without a counterpart targets the current fallback, and so does its entire
//! subtree; nothing below an unmatched node is matched structurally.
//!
//! ```text
//! source                  dest               fallback F
//! ├─(1,0) A      ──▶      ├─(1,0) A'         A  → A'   primary
//! └─(2,0) B      ──▶      └─(2,0) B'         B  → B'   primary
//!    └─(1,1) B1                              B1 → B'   secondary (inherited)
//! ```
//!
//! Matching cannot fail: a missing counterpart simply falls through to the
//! fallback target.

use super::node::{ChannelNode, ChildMap};
use crate::strip::{ChannelId, ChannelStrip};
use std::collections::BTreeMap;

/// A source strip paired with the strip it was matched to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedChannel {
    pub strip: ChannelStrip,
    pub target: ChannelStrip,
}

/// Which half of a [`MatchOutcome`] to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchSet {
    #[default]
    Both,
    /// Directly address-matched
    Primary,
    /// Target inherited from an ancestor
    Secondary,
}

/// Result of matching two trees.
///
/// A channel identity appears at most once across both maps. When a strip is
/// reachable along several paths, the first visit decides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub primary: BTreeMap<ChannelId, MatchedChannel>,
    pub secondary: BTreeMap<ChannelId, MatchedChannel>,
}

impl MatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    pub fn contains(&self, id: &ChannelId) -> bool {
        self.primary.contains_key(id) || self.secondary.contains_key(id)
    }

    pub fn get(&self, id: &ChannelId) -> Option<&MatchedChannel> {
        self.primary.get(id).or_else(|| self.secondary.get(id))
    }

    pub fn target_of(&self, id: &ChannelId) -> Option<&ChannelStrip> {
        self.get(id).map(|m| &m.target)
    }

    /// Iterate the selected half (or both, primary first).
    pub fn iter(&self, set: MatchSet) -> Box<dyn Iterator<Item = &MatchedChannel> + '_> {
        match set {
            MatchSet::Both => Box::new(self.primary.values().chain(self.secondary.values())),
            MatchSet::Primary => Box::new(self.primary.values()),
            MatchSet::Secondary => Box::new(self.secondary.values()),
        }
    }

    fn record_primary(&mut self, node: &ChannelNode, target: &ChannelStrip) {
        if self.contains(node.id()) {
            tracing::debug!("Strip {} already matched, keeping first visit", node.id());
            return;
        }
        self.primary.insert(node.id().clone(), matched(node, target));
    }

    fn record_secondary(&mut self, node: &ChannelNode, target: &ChannelStrip) {
        if self.contains(node.id()) {
            tracing::debug!("Strip {} already matched, keeping first visit", node.id());
            return;
        }
        self.secondary.insert(node.id().clone(), matched(node, target));
    }
}

fn matched(node: &ChannelNode, target: &ChannelStrip) -> MatchedChannel {
    MatchedChannel {
        strip: node.strip.clone(),
        target: target.clone(),
    }
}

/// Match `source` against `dest`, setting `target` on every source node.
pub fn match_children(
    source: &mut ChildMap,
    dest: &ChildMap,
    fallback: &ChannelStrip,
) -> MatchOutcome {
    let mut outcome = MatchOutcome::new();
    match_level(source, dest, fallback, &mut outcome);
    outcome
}

fn match_level(
    source: &mut ChildMap,
    dest: &ChildMap,
    fallback: &ChannelStrip,
    outcome: &mut MatchOutcome,
) {
    for (address, child) in source.iter_mut() {
        match dest.find(address) {
            Some(counterpart) => {
                child.target = Some(counterpart.strip.clone());
                // Parent is recorded before its subtree so that the first
                // visit of a shared strip is the shallowest one
                outcome.record_primary(child, &counterpart.strip);
                if !child.children.is_empty() {
                    match_level(
                        &mut child.children,
                        &counterpart.children,
                        &counterpart.strip,
                        outcome,
                    );
                }
            }
            None => {
                tracing::trace!(
                    "No counterpart for {} at {}, inheriting {}",
                    child.id(),
                    address,
                    fallback.id
                );
                inherit(child, fallback, outcome);
            }
        }
    }
}

fn inherit(node: &mut ChannelNode, target: &ChannelStrip, outcome: &mut MatchOutcome) {
    node.target = Some(target.clone());
    outcome.record_secondary(node, target);
    for (_, child) in node.children.iter_mut() {
        inherit(child, target, outcome);
    }
}

impl ChannelNode {
    /// Match this node's children against `dest`'s children, with `dest`
    /// itself as the fallback target. Sets `self.target` to `dest`.
    pub fn match_against(&mut self, dest: &ChannelNode) -> MatchOutcome {
        self.target = Some(dest.strip.clone());
        match_children(&mut self.children, &dest.children, &dest.strip)
    }
}
