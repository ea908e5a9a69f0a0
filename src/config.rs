//! Session configuration.

use midilink_core::TreeConfig;
use midilink_ports::NamingConfig;
use serde::{Deserialize, Serialize};

/// Every knob of a [`Session`](crate::Session).
///
/// ```toml
/// [naming]
/// local_alias = "localhost"
/// hardware_alias = "system"
/// daw_alias = "REAPER"
/// skip_unparseable = false
///
/// [tree]
/// cycle_policy = "truncate"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub naming: NamingConfig,
    pub tree: TreeConfig,
}

#[cfg(feature = "toml-config")]
impl SessionConfig {
    /// Missing tables and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
