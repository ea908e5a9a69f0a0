//! MIDI endpoints, patch-bay wiring and the naming rules that connect them.

mod endpoint;
mod naming;
mod wiring;

pub use endpoint::{
    EndpointSource, NamedEndpoint, PortDirection, PortName, RoutedEndpoint, WiredEndpoint,
};
pub use naming::{match_endpoints, NamingConfig};
pub use wiring::{discover_wired, PatchBay, PatchPort};
