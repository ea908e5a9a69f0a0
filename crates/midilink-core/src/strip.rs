//! Stable identities for hosts and channel-strips.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Network identity of a DAW host: `"localhost"` or an address such as `"192.168.2.2"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    pub const LOCALHOST: &'static str = "localhost";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn localhost() -> Self {
        Self(Self::LOCALHOST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_localhost(&self) -> bool {
        self.0 == Self::LOCALHOST
    }
}

impl Default for HostId {
    fn default() -> Self {
        Self::localhost()
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for HostId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for HostId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HostId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Opaque, session-stable identity of a channel-strip as reported by its host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A channel-strip together with the context needed to reach it again:
/// the host it lives on and the project that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelStrip {
    pub id: ChannelId,
    pub name: String,
    pub host: HostId,
    /// Owning project, `None` = the host's current project
    #[serde(default)]
    pub project: Option<String>,
}

impl ChannelStrip {
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>, host: impl Into<HostId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            host: host.into(),
            project: None,
        }
    }

    pub fn in_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

impl fmt::Display for ChannelStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}@{})", self.name, self.id, self.host)
    }
}
