//! Writing resolved assignments to the hosts' hardware routing.

use crate::error::{ConnectionsError, Result};
use crate::port::PortDirection;
use crate::task::{ResolvedAssignment, ResolvedPlan};
use midilink_core::{ChannelStrip, HostContext, HostGuard};
use serde::{Deserialize, Serialize};

/// Packed hardware-routing value of a strip's MIDI input or output.
///
/// Outputs encode as `(index << 5) + channel`. Inputs carry an extra flag
/// bit: `4096 + (index << 5) + channel`. Channel `0` means all channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MidiRouteValue {
    pub direction: PortDirection,
    pub index: u32,
    pub channel: u8,
}

impl MidiRouteValue {
    pub const INPUT_FLAG: i32 = 4096;
    pub const CHANNEL_BITS: u32 = 5;
    const CHANNEL_MASK: i32 = (1 << Self::CHANNEL_BITS) - 1;
    /// Largest index that stays below the input flag
    pub const MAX_INDEX: u32 = (Self::INPUT_FLAG >> Self::CHANNEL_BITS) as u32 - 1;

    pub fn input(index: u32, channel: u8) -> Self {
        Self {
            direction: PortDirection::Input,
            index,
            channel,
        }
    }

    pub fn output(index: u32, channel: u8) -> Self {
        Self {
            direction: PortDirection::Output,
            index,
            channel,
        }
    }

    /// Index must not exceed [`MAX_INDEX`](Self::MAX_INDEX).
    pub fn encode(&self) -> i32 {
        let base = ((self.index as i32) << Self::CHANNEL_BITS) + (i32::from(self.channel) & Self::CHANNEL_MASK);
        match self.direction {
            PortDirection::Input => Self::INPUT_FLAG + base,
            PortDirection::Output => base,
        }
    }

    /// Inverse of [`encode`](Self::encode). `None` for negative values and for
    /// inputs without the flag bit.
    pub fn decode(direction: PortDirection, value: i32) -> Option<Self> {
        let base = match direction {
            PortDirection::Input if value >= Self::INPUT_FLAG => value - Self::INPUT_FLAG,
            PortDirection::Input => return None,
            PortDirection::Output if value >= 0 => value,
            PortDirection::Output => return None,
        };
        Some(Self {
            direction,
            index: (base >> Self::CHANNEL_BITS) as u32,
            channel: (base & Self::CHANNEL_MASK) as u8,
        })
    }
}

/// Hardware MIDI routing of a strip. Called inside the strip's host context.
pub trait HardwareRouting {
    fn set_midi_input(&self, strip: &ChannelStrip, value: MidiRouteValue) -> midilink_core::Result<()>;

    fn set_midi_output(&self, strip: &ChannelStrip, value: MidiRouteValue) -> midilink_core::Result<()>;
}

/// Writes a [`ResolvedPlan`] through [`HardwareRouting`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteApplier {
    channel: u8,
}

impl RouteApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// MIDI channel written with every route (`0` = all channels).
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Apply every assignment of `plan`, each inside its host's context.
    /// Returns the number of writes.
    ///
    /// Nothing is written if any endpoint index exceeds
    /// [`MidiRouteValue::MAX_INDEX`].
    pub fn apply<B>(&self, plan: &ResolvedPlan, backend: &B) -> Result<usize>
    where
        B: HostContext + HardwareRouting + ?Sized,
    {
        if let Some(bad) = plan
            .outbound
            .iter()
            .chain(&plan.inbound)
            .find(|a| a.endpoint.index > MidiRouteValue::MAX_INDEX)
        {
            return Err(ConnectionsError::IndexOutOfRange {
                strip: bad.strip.id.clone(),
                index: bad.endpoint.index,
            });
        }
        for assignment in &plan.outbound {
            self.write(backend, assignment, PortDirection::Output)?;
        }
        for assignment in &plan.inbound {
            self.write(backend, assignment, PortDirection::Input)?;
        }
        Ok(plan.len())
    }

    fn write<B>(&self, backend: &B, assignment: &ResolvedAssignment, direction: PortDirection) -> Result<()>
    where
        B: HostContext + HardwareRouting + ?Sized,
    {
        let _guard = HostGuard::enter(backend, &assignment.host)?;
        let value = MidiRouteValue {
            direction,
            index: assignment.endpoint.index,
            channel: self.channel,
        };
        match direction {
            PortDirection::Input => backend.set_midi_input(&assignment.strip, value)?,
            PortDirection::Output => backend.set_midi_output(&assignment.strip, value)?,
        }
        tracing::debug!(
            "Set MIDI {} of {} on {} to {} ({})",
            direction,
            assignment.strip,
            assignment.host,
            value.encode(),
            assignment.endpoint.name
        );
        Ok(())
    }
}
