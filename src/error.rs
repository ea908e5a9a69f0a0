//! Centralized error type for the midilink umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] midilink_core::Error),

    #[error("Connections: {0}")]
    Connections(#[from] midilink_ports::ConnectionsError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "toml-config")]
    #[error("Config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
