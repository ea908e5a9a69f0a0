//! Wildcard (bus, channel) addressing of MIDI sub-paths.
//!
//! A receive or send between two channel-strips carries a MIDI bus and a MIDI
//! channel. `0` in either slot means "all buses" / "all channels", so two
//! addresses match when every slot is literally equal or wildcarded on at
//! least one side:
//!
//! ```text
//! (1,2) ~ (1,0)   yes   channel wildcard on the right
//! (1,2) ~ (0,1)   no    channels 2 and 1 differ, neither is 0
//! (0,0) ~ (5,7)   yes   left side is all-buses, all-channels
//! ```
//!
//! The relation is reflexive and symmetric but not transitive, so it is not
//! exposed as `PartialEq`. `==` and `Hash` compare the literal values; use
//! [`AddressMatcher::matches`] wherever wildcard semantics are wanted.

use crate::error::{Error, Result};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Highest bus or channel number a strip connection can report.
pub const MAX_ADDRESS_COMPONENT: u8 = 16;

/// Wildcard value for either slot.
pub const ANY: u8 = 0;

/// Raw value the host reports for a connection without MIDI routing.
pub const NO_MIDI: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AddressMatcher {
    bus: u8,
    channel: u8,
}

impl AddressMatcher {
    /// Both components must be in `0..=16`.
    pub fn new(bus: u8, channel: u8) -> Result<Self> {
        if bus > MAX_ADDRESS_COMPONENT || channel > MAX_ADDRESS_COMPONENT {
            return Err(Error::InvalidAddress {
                bus: bus as i32,
                channel: channel as i32,
            });
        }
        Ok(Self { bus, channel })
    }

    /// Matches every address.
    pub const fn any() -> Self {
        Self {
            bus: ANY,
            channel: ANY,
        }
    }

    /// Convert a host-reported `(bus, channel)` pair.
    ///
    /// Returns `Ok(None)` for the `(-1, -1)` "no MIDI" sentinel.
    pub fn from_raw(bus: i32, channel: i32) -> Result<Option<Self>> {
        if bus == NO_MIDI && channel == NO_MIDI {
            return Ok(None);
        }
        let invalid = || Error::InvalidAddress { bus, channel };
        let bus = u8::try_from(bus).map_err(|_| invalid())?;
        let channel = u8::try_from(channel).map_err(|_| invalid())?;
        Self::new(bus, channel)
            .map(Some)
            .map_err(|_| invalid())
    }

    #[inline]
    pub fn bus(&self) -> u8 {
        self.bus
    }

    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.bus == ANY || self.channel == ANY
    }

    /// Wildcard-aware equality.
    #[inline]
    pub fn matches(&self, other: &AddressMatcher) -> bool {
        slot_matches(self.bus, other.bus) && slot_matches(self.channel, other.channel)
    }
}

#[inline]
fn slot_matches(a: u8, b: u8) -> bool {
    a == b || a == ANY || b == ANY
}

impl Default for AddressMatcher {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for AddressMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(bus={}, channel={})", self.bus, self.channel)
    }
}
