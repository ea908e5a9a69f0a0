//! Topology kernel for mirroring channel-strip hierarchies across DAW hosts.
//!
//! - [`AddressMatcher`] - wildcard `(bus, channel)` addressing
//! - [`ChannelTreeBuilder`] - receive/send trees from live host state
//! - [`match_children`] - recursive source → destination tree matching
//! - [`RecArmPlan`] - record-arm propagation over a match result
//! - [`HostGuard`] - scoped host-context switching
//!
//! Everything here is synchronous and allocation-bounded by the size of the
//! trees passed in. Host I/O happens behind the traits in [`host`].

pub mod address;
pub mod error;
pub mod host;
pub mod recarm;
pub mod strip;
pub mod tree;

pub use address::AddressMatcher;
pub use error::{Error, Result};
pub use host::{
    with_host_context, ChildDirection, ConnectionSource, HostContext, HostGuard, RecArm,
    StripConnection,
};
pub use recarm::{RecArmPlan, RecArmTarget};
pub use strip::{ChannelId, ChannelStrip, HostId};
pub use tree::{
    match_children, ChannelNode, ChannelTreeBuilder, ChildMap, CyclePolicy, MatchOutcome,
    MatchSet, MatchedChannel, TreeConfig,
};
