//! Channel-strip trees connected by MIDI receives/sends, and their matching.

mod builder;
mod matching;
mod node;

pub use builder::{ChannelTreeBuilder, CyclePolicy, TreeConfig};
pub use matching::{match_children, MatchOutcome, MatchSet, MatchedChannel};
pub use node::{ChannelNode, ChildEntry, ChildMap};
