//! Boundary traits toward the DAW host and scoped host-context switching.
//!
//! Reading a strip's receives or writing its routing only works while the
//! owning host (and its project) is the current context. [`HostGuard`] enters
//! the context on creation and leaves it on drop, so every exit path, errors
//! included, tears the context down.

use crate::error::Result;
use crate::strip::{ChannelStrip, HostId};
use serde::{Deserialize, Serialize};

/// Which relationship of a strip forms its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildDirection {
    /// Children are the strips that send into this one (master side)
    Receives,
    /// Children are the strips this one sends to (remote side)
    Sends,
}

/// One receive or send as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripConnection {
    /// The strip at the other end of the connection
    pub other: ChannelStrip,
    /// Raw MIDI bus, `-1` when the connection carries no MIDI
    pub bus: i32,
    /// Raw MIDI channel, `-1` when the connection carries no MIDI
    pub channel: i32,
}

impl StripConnection {
    pub fn new(other: ChannelStrip, bus: i32, channel: i32) -> Self {
        Self {
            other,
            bus,
            channel,
        }
    }
}

/// Entering and leaving a host's execution context.
pub trait HostContext {
    fn enter(&self, host: &HostId) -> Result<()>;

    fn leave(&self, host: &HostId);
}

impl<T: HostContext + ?Sized> HostContext for &T {
    fn enter(&self, host: &HostId) -> Result<()> {
        (**self).enter(host)
    }

    fn leave(&self, host: &HostId) {
        (**self).leave(host)
    }
}

/// Reads the MIDI receives/sends of a strip. Called inside the strip's host context.
pub trait ConnectionSource {
    fn midi_connections(
        &self,
        strip: &ChannelStrip,
        direction: ChildDirection,
    ) -> Result<Vec<StripConnection>>;
}

/// Record-arm state of a strip. Called inside the strip's host context.
pub trait RecArm {
    fn rec_arm(&self, strip: &ChannelStrip) -> Result<bool>;

    fn set_rec_arm(&self, strip: &ChannelStrip, armed: bool) -> Result<()>;
}

/// Scoped host context. Leaves the host when dropped.
#[must_use = "the host context is left as soon as the guard is dropped"]
pub struct HostGuard<'a, C: HostContext + ?Sized> {
    ctx: &'a C,
    host: HostId,
}

impl<'a, C: HostContext + ?Sized> HostGuard<'a, C> {
    pub fn enter(ctx: &'a C, host: &HostId) -> Result<Self> {
        ctx.enter(host)?;
        tracing::trace!("Entered host context {}", host);
        Ok(Self {
            ctx,
            host: host.clone(),
        })
    }

    pub fn host(&self) -> &HostId {
        &self.host
    }
}

impl<C: HostContext + ?Sized> Drop for HostGuard<'_, C> {
    fn drop(&mut self) {
        self.ctx.leave(&self.host);
        tracing::trace!("Left host context {}", self.host);
    }
}

/// Run `f` inside `host`'s context.
pub fn with_host_context<C, R, F>(ctx: &C, host: &HostId, f: F) -> Result<R>
where
    C: HostContext + ?Sized,
    F: FnOnce() -> Result<R>,
{
    let _guard = HostGuard::enter(ctx, host)?;
    f()
}
