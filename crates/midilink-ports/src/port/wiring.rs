//! Patch-bay wiring discovery.
//!
//! The patch-bay reports every port by its full `client:port` name together
//! with the full names of the ports it is connected to. For the DAW's own MIDI
//! ports we need exactly one routable peer each: a remote host (its client part
//! is an IP address), the local MIDI hardware, or another port of the DAW.

use super::endpoint::{PortDirection, PortName, WiredEndpoint};
use super::naming::NamingConfig;
use crate::error::{ConnectionsError, Result};
use midilink_core::HostId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::net::IpAddr;

/// One patch-bay port and everything it is connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchPort {
    pub name: String,
    #[serde(default)]
    pub connections: Vec<String>,
}

impl PatchPort {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: Vec::new(),
        }
    }

    pub fn connected_to(mut self, peer: impl Into<String>) -> Self {
        self.connections.push(peer.into());
        self
    }
}

/// The patch-bay daemon of a host. Called inside the host's context.
pub trait PatchBay {
    fn midi_ports(
        &self,
        host: &HostId,
        direction: PortDirection,
    ) -> midilink_core::Result<Vec<PatchPort>>;
}

fn is_routable_client(client: &str, config: &NamingConfig) -> bool {
    client == config.hardware_alias || client == config.daw_alias || client.parse::<IpAddr>().is_ok()
}

fn parse_or_skip<'a>(name: &'a str, config: &NamingConfig) -> Result<Option<PortName<'a>>> {
    match PortName::parse(name) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) if config.skip_unparseable => {
            tracing::warn!("Skipping patch-bay port: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Resolve the DAW's patch-bay ports to [`WiredEndpoint`]s.
///
/// Ports of other clients are ignored, as are ports without a routable peer.
/// A port with more than one routable peer cannot be assigned to a single
/// destination and fails with [`ConnectionsError::AmbiguousWiring`].
pub fn discover_wired(ports: &[PatchPort], config: &NamingConfig) -> Result<Vec<WiredEndpoint>> {
    let mut wired = Vec::new();
    for port in ports {
        let Some(own) = parse_or_skip(&port.name, config)? else {
            continue;
        };
        if own.client != config.daw_alias {
            continue;
        }

        let mut candidates: SmallVec<[PortName<'_>; 2]> = SmallVec::new();
        for peer in &port.connections {
            let Some(peer) = parse_or_skip(peer, config)? else {
                continue;
            };
            if is_routable_client(peer.client, config) {
                candidates.push(peer);
            }
        }

        match candidates.as_slice() {
            [] => {
                if !port.connections.is_empty() {
                    tracing::warn!("No routable connection for port {}", port.name);
                }
            }
            [peer] => wired.push(WiredEndpoint::new(own.port, peer.client, peer.port)),
            many => {
                return Err(ConnectionsError::AmbiguousWiring {
                    endpoint: port.name.clone(),
                    candidates: many
                        .iter()
                        .map(|p| format!("{}:{}", p.client, p.port))
                        .collect(),
                });
            }
        }
    }
    tracing::debug!("Discovered {} wired ports out of {}", wired.len(), ports.len());
    Ok(wired)
}
