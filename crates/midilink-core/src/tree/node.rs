//! Channel-strip tree nodes and their address-keyed children.

use crate::address::AddressMatcher;
use crate::strip::{ChannelId, ChannelStrip};
use std::collections::BTreeMap;

/// One channel-strip in a receive/send tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelNode {
    pub strip: ChannelStrip,
    /// Counterpart on the other host, set by matching
    pub target: Option<ChannelStrip>,
    pub children: ChildMap,
}

impl ChannelNode {
    pub fn new(strip: ChannelStrip) -> Self {
        Self {
            strip,
            target: None,
            children: ChildMap::new(),
        }
    }

    pub fn with_child(mut self, address: AddressMatcher, child: ChannelNode) -> Self {
        self.children.insert(address, child);
        self
    }

    #[inline]
    pub fn id(&self) -> &ChannelId {
        &self.strip.id
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.node_count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildEntry {
    pub address: AddressMatcher,
    pub node: ChannelNode,
}

/// Children of a node keyed by [`AddressMatcher`].
///
/// Stored as an ordered list rather than a hash map: lookups use the wildcard
/// relation, which a hash of the literal values cannot honor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChildMap {
    entries: Vec<ChildEntry>,
}

impl ChildMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child. A child already stored under the literally identical
    /// address is replaced and returned.
    pub fn insert(&mut self, address: AddressMatcher, node: ChannelNode) -> Option<ChannelNode> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.address == address) {
            return Some(core::mem::replace(&mut entry.node, node));
        }
        self.entries.push(ChildEntry { address, node });
        None
    }

    /// First child whose address matches `address` under wildcard rules.
    pub fn find(&self, address: &AddressMatcher) -> Option<&ChannelNode> {
        self.entries
            .iter()
            .find(|e| e.address.matches(address))
            .map(|e| &e.node)
    }

    /// Child stored under exactly this address.
    pub fn get_exact(&self, address: &AddressMatcher) -> Option<&ChannelNode> {
        self.entries
            .iter()
            .find(|e| e.address == *address)
            .map(|e| &e.node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AddressMatcher, &ChannelNode)> {
        self.entries.iter().map(|e| (&e.address, &e.node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&AddressMatcher, &mut ChannelNode)> {
        self.entries.iter_mut().map(|e| (&e.address, &mut e.node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of nodes below this level.
    pub fn node_count(&self) -> usize {
        self.entries.iter().map(|e| e.node.node_count()).sum()
    }

    /// Every node in the tree as identity → strip. Targets are not consulted.
    pub fn flatten(&self) -> BTreeMap<ChannelId, ChannelStrip> {
        let mut out = BTreeMap::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut BTreeMap<ChannelId, ChannelStrip>) {
        for entry in &self.entries {
            out.entry(entry.node.strip.id.clone())
                .or_insert_with(|| entry.node.strip.clone());
            entry.node.children.flatten_into(out);
        }
    }
}

impl FromIterator<(AddressMatcher, ChannelNode)> for ChildMap {
    fn from_iter<I: IntoIterator<Item = (AddressMatcher, ChannelNode)>>(iter: I) -> Self {
        let mut map = ChildMap::new();
        for (address, node) in iter {
            map.insert(address, node);
        }
        map
    }
}
