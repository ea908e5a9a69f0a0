//! Matching DAW endpoint names to patch-bay wiring, with host alias normalization.
//!
//! The DAW lists MIDI devices by display name; the patch-bay knows what each of
//! the DAW's ports is wired to. A DAW endpoint named `N` corresponds to a wired
//! port `W` when `N == W.name`, or when `N` starts with `W.dest_host` and ends
//! with `W.dest_name` (hardware devices show up in the DAW under their
//! `client:port` name).
//!
//! Destination aliases are then normalized:
//!
//! | self host   | wired destination | result              |
//! |-------------|-------------------|---------------------|
//! | `localhost` | hardware alias    | dropped (loopback)  |
//! | remote      | hardware alias    | `localhost`         |
//! | any         | DAW alias         | `localhost`         |
//! | any         | anything else     | unchanged           |

use super::endpoint::{NamedEndpoint, RoutedEndpoint, WiredEndpoint};
use crate::error::{ConnectionsError, Result};
use midilink_core::HostId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Host and client aliases used by naming resolution and wiring discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Host id meaning "this machine"
    pub local_alias: String,
    /// Patch-bay client of the local MIDI hardware
    pub hardware_alias: String,
    /// Patch-bay client of the DAW itself
    pub daw_alias: String,
    /// Skip patch-bay ports with unparseable names instead of failing
    pub skip_unparseable: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            local_alias: HostId::LOCALHOST.to_string(),
            hardware_alias: "system".to_string(),
            daw_alias: "REAPER".to_string(),
            skip_unparseable: false,
        }
    }
}

impl NamingConfig {
    pub fn local_host(&self) -> HostId {
        HostId::new(self.local_alias.as_str())
    }

    /// Destination host for a wired peer client, `None` if the route is local
    /// hardware loopback on the local host.
    pub fn normalize_destination(&self, self_host: &HostId, dest_host: &str) -> Option<HostId> {
        let is_local = self_host.as_str() == self.local_alias;
        if dest_host == self.hardware_alias {
            if is_local {
                return None;
            }
            return Some(self.local_host());
        }
        if dest_host == self.daw_alias {
            return Some(self.local_host());
        }
        Some(HostId::new(dest_host))
    }
}

fn names_match(endpoint: &NamedEndpoint, wired: &WiredEndpoint) -> bool {
    endpoint.name == wired.name
        || (endpoint.name.starts_with(wired.dest_host.as_str())
            && endpoint.name.ends_with(wired.dest_name.as_str()))
}

/// Annotate each DAW endpoint with the destination its wiring leads to.
///
/// Endpoints with no wiring are left out. An endpoint whose wiring resolves to
/// more than one destination is an [`ConnectionsError::AmbiguousWiring`]. The
/// output follows the order of `endpoints` and does not depend on anything
/// but the inputs.
pub fn match_endpoints(
    endpoints: &[NamedEndpoint],
    wired: &[WiredEndpoint],
    self_host: &HostId,
    config: &NamingConfig,
) -> Result<Vec<RoutedEndpoint>> {
    let mut out = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let mut destinations: SmallVec<[(HostId, &WiredEndpoint); 2]> = SmallVec::new();
        for w in wired.iter().filter(|w| names_match(endpoint, w)) {
            let Some(dest) = config.normalize_destination(self_host, &w.dest_host) else {
                tracing::trace!(
                    "Endpoint '{}' on {} is local hardware loopback, dropped",
                    endpoint.name,
                    self_host
                );
                continue;
            };
            if !destinations.iter().any(|(d, _)| *d == dest) {
                destinations.push((dest, w));
            }
        }

        match destinations.len() {
            0 => {}
            1 => {
                let (destination, _) = destinations.remove(0);
                out.push(RoutedEndpoint {
                    endpoint: endpoint.clone(),
                    destination,
                });
            }
            _ => {
                return Err(ConnectionsError::AmbiguousWiring {
                    endpoint: endpoint.name.clone(),
                    candidates: destinations
                        .iter()
                        .map(|(_, w)| format!("{}:{}", w.dest_host, w.dest_name))
                        .collect(),
                });
            }
        }
    }
    Ok(out)
}
