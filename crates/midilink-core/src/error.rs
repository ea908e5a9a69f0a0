//! Error types for midilink-core.

use crate::strip::{ChannelId, HostId};
use thiserror::Error;

/// Error type for topology operations.
///
/// Tree matching itself never fails; these come from building trees out of
/// live host state and from the host boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid MIDI address: bus={bus}, channel={channel}. Components must be in 0..=16")]
    InvalidAddress { bus: i32, channel: i32 },

    #[error("Routing cycle through strip {strip}")]
    RoutingCycle { strip: ChannelId },

    #[error("Host {host}: {message}")]
    Host { host: HostId, message: String },

    #[error("Host unavailable: {0}")]
    HostUnavailable(HostId),
}

impl Error {
    pub fn host(host: &HostId, message: impl Into<String>) -> Self {
        Error::Host {
            host: host.clone(),
            message: message.into(),
        }
    }
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
