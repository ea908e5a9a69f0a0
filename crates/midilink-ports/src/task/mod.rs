//! Turning per-host snapshots into concrete strip → endpoint assignments.

mod intent;
mod inventory;
mod resolver;

pub use intent::{
    intents_from_hosts, outbound_from_matches, HostRouteInfo, OutboundStrip, RoutingIntent,
};
pub use inventory::{HostRouteInventory, RouteInventories};
pub use resolver::{ResolutionContext, ResolvedAssignment, ResolvedPlan, RoutingTaskResolver};
