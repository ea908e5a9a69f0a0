//! Builds [`ChannelNode`] trees from a host's live receive/send graph.

use super::node::{ChannelNode, ChildMap};
use crate::address::AddressMatcher;
use crate::error::{Error, Result};
use crate::host::{ChildDirection, ConnectionSource};
use crate::strip::{ChannelId, ChannelStrip};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What to do when a strip is reached again through its own descendants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Drop the connection that closes the cycle and keep building
    #[default]
    Truncate,
    /// Fail with [`Error::RoutingCycle`]
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub cycle_policy: CyclePolicy,
}

/// Recursively enumerates MIDI receives (or sends) starting from a root strip.
///
/// Connections reporting the `(-1, -1)` address carry no MIDI and are skipped.
/// The other end of every remaining connection becomes a child, built the same
/// way. Must be called inside the root's host context.
pub struct ChannelTreeBuilder<'a, S: ConnectionSource + ?Sized> {
    source: &'a S,
    direction: ChildDirection,
    config: TreeConfig,
}

impl<'a, S: ConnectionSource + ?Sized> ChannelTreeBuilder<'a, S> {
    pub fn new(source: &'a S, direction: ChildDirection) -> Self {
        Self {
            source,
            direction,
            config: TreeConfig::default(),
        }
    }

    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.config.cycle_policy = policy;
        self
    }

    pub fn build(&self, root: &ChannelStrip) -> Result<ChannelNode> {
        let mut path = HashSet::new();
        path.insert(root.id.clone());
        let children = self.build_children(root, &mut path)?;
        Ok(ChannelNode {
            strip: root.clone(),
            target: None,
            children,
        })
    }

    fn build_children(
        &self,
        strip: &ChannelStrip,
        path: &mut HashSet<ChannelId>,
    ) -> Result<ChildMap> {
        let mut children = ChildMap::new();
        for conn in self.source.midi_connections(strip, self.direction)? {
            let Some(address) = AddressMatcher::from_raw(conn.bus, conn.channel)? else {
                tracing::trace!("Skipping non-MIDI connection {} -> {}", strip.id, conn.other.id);
                continue;
            };

            if !path.insert(conn.other.id.clone()) {
                match self.config.cycle_policy {
                    CyclePolicy::Truncate => {
                        tracing::warn!(
                            "Routing cycle: {} reaches ancestor {}, connection dropped",
                            strip.id,
                            conn.other.id
                        );
                        continue;
                    }
                    CyclePolicy::Error => {
                        return Err(Error::RoutingCycle {
                            strip: conn.other.id,
                        });
                    }
                }
            }

            let grandchildren = self.build_children(&conn.other, path);
            path.remove(&conn.other.id);
            let node = ChannelNode {
                strip: conn.other,
                target: None,
                children: grandchildren?,
            };
            if let Some(replaced) = children.insert(address, node) {
                tracing::debug!(
                    "Strip {} has two children at {}, keeping the later one (dropped {})",
                    strip.id,
                    address,
                    replaced.strip.id
                );
            }
        }
        Ok(children)
    }
}
