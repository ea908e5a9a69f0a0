//! MIDI endpoints as reported by the DAW and by the patch-bay.

use crate::error::{ConnectionsError, Result};
use core::fmt;
use midilink_core::HostId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => f.write_str("in"),
            PortDirection::Output => f.write_str("out"),
        }
    }
}

/// A MIDI device as listed by the DAW. `index` is stable per host and
/// direction for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedEndpoint {
    pub index: u32,
    pub name: String,
}

impl NamedEndpoint {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// A patch-bay port name split into its `client:port` halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortName<'a> {
    pub client: &'a str,
    pub port: &'a str,
}

impl<'a> PortName<'a> {
    /// Split at the last `:`. Both halves must be non-empty.
    pub fn parse(full: &'a str) -> Result<Self> {
        match full.rsplit_once(':') {
            Some((client, port)) if !client.is_empty() && !port.is_empty() => {
                Ok(Self { client, port })
            }
            _ => Err(ConnectionsError::UnparseableName(full.to_string())),
        }
    }
}

/// A DAW-owned patch-bay port and the single remote port it is wired to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiredEndpoint {
    /// Port name without the DAW client prefix
    pub name: String,
    /// Client part of the peer port: a host address or a local client alias
    pub dest_host: String,
    pub dest_name: String,
}

impl WiredEndpoint {
    pub fn new(
        name: impl Into<String>,
        dest_host: impl Into<String>,
        dest_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dest_host: dest_host.into(),
            dest_name: dest_name.into(),
        }
    }
}

/// A DAW endpoint annotated with the host its wiring leads to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutedEndpoint {
    pub endpoint: NamedEndpoint,
    pub destination: HostId,
}

/// Lists the DAW's MIDI devices. Called inside the host's context.
pub trait EndpointSource {
    fn midi_endpoints(
        &self,
        host: &HostId,
        direction: PortDirection,
    ) -> midilink_core::Result<Vec<NamedEndpoint>>;
}
