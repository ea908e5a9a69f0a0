//! Routing intents and the per-host snapshot they are derived from.

use crate::port::{NamedEndpoint, PortDirection, WiredEndpoint};
use midilink_core::{ChannelStrip, HostId, MatchOutcome, MatchSet};
use serde::{Deserialize, Serialize};

/// A strip that sends MIDI to a declared strip on another (or the same) host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundStrip {
    pub strip: ChannelStrip,
    /// Receiving strip; its `host` is the destination host
    pub remote: ChannelStrip,
}

impl OutboundStrip {
    pub fn new(strip: ChannelStrip, remote: ChannelStrip) -> Self {
        Self { strip, remote }
    }
}

/// Turn matched strips into outbound declarations toward their targets.
pub fn outbound_from_matches(outcome: &MatchOutcome, set: MatchSet) -> Vec<OutboundStrip> {
    outcome
        .iter(set)
        .map(|m| OutboundStrip::new(m.strip.clone(), m.target.clone()))
        .collect()
}

/// Everything the resolver needs to know about one host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRouteInfo {
    pub host: HostId,
    pub inbound_strips: Vec<ChannelStrip>,
    pub outbound_strips: Vec<OutboundStrip>,
    pub inbound_endpoints: Vec<NamedEndpoint>,
    pub inbound_wired: Vec<WiredEndpoint>,
    pub outbound_endpoints: Vec<NamedEndpoint>,
    pub outbound_wired: Vec<WiredEndpoint>,
}

impl HostRouteInfo {
    pub fn new(host: impl Into<HostId>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }
}

/// One connection a strip needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingIntent {
    /// Any input on `strip`'s own host that terminates locally
    Inbound { strip: ChannelStrip },
    /// An output on `strip`'s host wired toward `remote.host`
    Outbound {
        strip: ChannelStrip,
        remote: ChannelStrip,
    },
}

impl RoutingIntent {
    pub fn host(&self) -> &HostId {
        &self.strip().host
    }

    pub fn strip(&self) -> &ChannelStrip {
        match self {
            RoutingIntent::Inbound { strip } | RoutingIntent::Outbound { strip, .. } => strip,
        }
    }

    pub fn direction(&self) -> PortDirection {
        match self {
            RoutingIntent::Inbound { .. } => PortDirection::Input,
            RoutingIntent::Outbound { .. } => PortDirection::Output,
        }
    }

    /// Host the assigned endpoint has to lead to.
    pub fn destination<'a>(&'a self, local: &'a HostId) -> &'a HostId {
        match self {
            RoutingIntent::Inbound { .. } => local,
            RoutingIntent::Outbound { remote, .. } => &remote.host,
        }
    }
}

/// Derive the ordered intent list from host snapshots.
///
/// Hosts are visited in the given order. Each host contributes one inbound
/// intent per inbound strip, then one outbound intent per outbound strip, both
/// in list order. Strips are bound to the snapshot's host whatever host they
/// carry themselves.
pub fn intents_from_hosts(hosts: &[HostRouteInfo]) -> Vec<RoutingIntent> {
    let mut intents = Vec::new();
    for host in hosts {
        for inbound in &host.inbound_strips {
            let mut strip = inbound.clone();
            strip.host = host.host.clone();
            intents.push(RoutingIntent::Inbound { strip });
        }
        for out in &host.outbound_strips {
            let mut strip = out.strip.clone();
            strip.host = host.host.clone();
            intents.push(RoutingIntent::Outbound {
                strip,
                remote: out.remote.clone(),
            });
        }
        tracing::debug!(
            "Host {}: {} inbound and {} outbound strips",
            host.host,
            host.inbound_strips.len(),
            host.outbound_strips.len()
        );
    }
    intents
}
