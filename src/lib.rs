//! # midilink - Multi-host MIDI session linking
//!
//! Mirrors channel-strip hierarchies across DAW hosts and wires every strip
//! that talks to another host to a concrete MIDI hardware port.
//!
//! ## Architecture
//!
//! midilink is an umbrella crate that coordinates:
//! - **midilink-core** - Wildcard addressing, channel trees, tree matching, rec-arm propagation
//! - **midilink-ports** - Patch-bay wiring, endpoint naming, port assignment, hardware routing
//!
//! ## Quick Start
//!
//! ```ignore
//! use midilink::prelude::*;
//!
//! let session = Session::builder(backend).build()?;
//!
//! // Which remote strip does each local child belong to?
//! let outcome = session.match_children(&master_bus, &slave_bus, ChildDirection::Receives)?;
//! session.sync_rec_arm(&outcome)?;
//!
//! // Assign and write MIDI ports on every host
//! let master = session.fetch_host_info(&HostId::localhost(), ins, outs)?;
//! let slave = session.fetch_host_info(&HostId::new("192.168.2.2"), slave_ins, Vec::new())?;
//! session.connect_all(&[master, slave])?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `toml-config`
//! - `toml-config` - Load [`SessionConfig`] from TOML

/// Re-export of midilink-core for direct access
pub use midilink_core as core;

/// Re-export of midilink-ports for direct access
pub use midilink_ports as ports;

pub use midilink_core::{
    AddressMatcher, ChannelId, ChannelNode, ChannelStrip, ChildDirection, ChildMap, CyclePolicy,
    HostGuard, HostId, MatchOutcome, MatchSet, MatchedChannel, RecArmPlan, TreeConfig,
};

pub use midilink_ports::{
    ConnectionsError, HostRouteInfo, MidiRouteValue, NamedEndpoint, NamingConfig, OutboundStrip,
    PatchPort, PortDirection, ResolvedAssignment, ResolvedPlan, RoutingIntent, WiredEndpoint,
};

mod error;
pub use error::{Error, Result};

mod config;
pub use config::SessionConfig;

mod builder;
mod memory;
mod session;

pub use builder::SessionBuilder;
pub use memory::MemoryBackend;
pub use session::{HostBackend, Session};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{MemoryBackend, Session, SessionBuilder, SessionConfig};

    pub use crate::core::{
        ChannelStrip, ChildDirection, CyclePolicy, HostId, MatchOutcome, MatchSet,
    };

    pub use crate::ports::{HostRouteInfo, OutboundStrip, PortDirection, ResolvedPlan};

    // Boundary traits, for implementing a backend
    pub use crate::core::{ConnectionSource, HostContext, RecArm};
    pub use crate::ports::{EndpointSource, HardwareRouting, PatchBay};
    pub use crate::HostBackend;
}
