//! Error types for endpoint naming and connection resolution.

use crate::port::PortDirection;
use midilink_core::{ChannelId, HostId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionsError {
    #[error("not enough {direction} ports for host '{host}' (strip {strip} wants a port to '{destination}')")]
    Exhausted {
        host: HostId,
        direction: PortDirection,
        strip: ChannelId,
        destination: HostId,
    },

    #[error("strange port name: {0}")]
    UnparseableName(String),

    #[error("too many connections from port \"{endpoint}\": {candidates:?}")]
    AmbiguousWiring {
        endpoint: String,
        candidates: Vec<String>,
    },

    #[error("no route inventory for host '{0}'")]
    UnknownHost(HostId),

    #[error("port index {index} of strip {strip} does not fit a routing value")]
    IndexOutOfRange { strip: ChannelId, index: u32 },

    #[error(transparent)]
    Core(#[from] midilink_core::Error),
}

pub type Result<T> = std::result::Result<T, ConnectionsError>;
