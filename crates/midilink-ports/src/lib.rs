//! MIDI endpoint inventory for multi-host sessions.
//!
//! Discovers how each host's DAW ports are wired through the patch-bay,
//! annotates DAW endpoints with the host they lead to, assigns free endpoints
//! to strips and writes the result into the strips' hardware routing.

pub mod error;
pub use error::{ConnectionsError, Result};

pub mod port;
pub use port::{
    discover_wired, match_endpoints, EndpointSource, NamedEndpoint, NamingConfig, PatchBay,
    PatchPort, PortDirection, PortName, RoutedEndpoint, WiredEndpoint,
};

pub mod task;
pub use task::{
    intents_from_hosts, outbound_from_matches, HostRouteInfo, HostRouteInventory, OutboundStrip,
    ResolutionContext, ResolvedAssignment, ResolvedPlan, RouteInventories, RoutingIntent,
    RoutingTaskResolver,
};

mod apply;
pub use apply::{HardwareRouting, MidiRouteValue, RouteApplier};
