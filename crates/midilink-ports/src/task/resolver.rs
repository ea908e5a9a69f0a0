//! Greedy assignment of routing intents to free endpoints.

use super::intent::{intents_from_hosts, HostRouteInfo, RoutingIntent};
use super::inventory::RouteInventories;
use crate::error::{ConnectionsError, Result};
use crate::port::{NamedEndpoint, NamingConfig, PortDirection};
use midilink_core::{ChannelStrip, HostId};
use serde::{Deserialize, Serialize};

/// One strip bound to one endpoint on its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssignment {
    pub host: HostId,
    pub strip: ChannelStrip,
    pub endpoint: NamedEndpoint,
}

/// Result of a successful resolution run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    pub outbound: Vec<ResolvedAssignment>,
    pub inbound: Vec<ResolvedAssignment>,
}

impl ResolvedPlan {
    pub fn len(&self) -> usize {
        self.outbound.len() + self.inbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.inbound.is_empty()
    }

    pub fn assignments(&self, direction: PortDirection) -> &[ResolvedAssignment] {
        match direction {
            PortDirection::Input => &self.inbound,
            PortDirection::Output => &self.outbound,
        }
    }
}

/// Assigns intents first-come-first-served, in the order given.
///
/// Every intent takes the first free endpoint on its host whose destination
/// fits: inbound intents want an endpoint terminating on the local alias,
/// outbound intents one wired toward the remote strip's host. There is no
/// backtracking, so an earlier intent can take an endpoint a later one needed
/// even when a different order would have satisfied both.
#[derive(Debug, Clone)]
pub struct RoutingTaskResolver {
    local: HostId,
}

impl Default for RoutingTaskResolver {
    fn default() -> Self {
        Self::new(&NamingConfig::default())
    }
}

impl RoutingTaskResolver {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            local: config.local_host(),
        }
    }

    /// Resolve all intents or none.
    ///
    /// On success the used endpoints are removed from `inventories`. On
    /// failure `inventories` is left as it was and no assignment is reported.
    pub fn resolve(
        &self,
        intents: &[RoutingIntent],
        inventories: &mut RouteInventories,
    ) -> Result<ResolvedPlan> {
        let mut working = inventories.clone();
        let mut plan = ResolvedPlan::default();

        for intent in intents {
            let host = intent.host();
            let direction = intent.direction();
            let destination = intent.destination(&self.local);

            let endpoint = working
                .get_mut(host)?
                .take(direction, destination)
                .ok_or_else(|| ConnectionsError::Exhausted {
                    host: host.clone(),
                    direction,
                    strip: intent.strip().id.clone(),
                    destination: destination.clone(),
                })?;

            tracing::debug!(
                "Assigned {} port {} ({}) on {} to {}",
                direction,
                endpoint.index,
                endpoint.name,
                host,
                intent.strip()
            );
            let assignment = ResolvedAssignment {
                host: host.clone(),
                strip: intent.strip().clone(),
                endpoint,
            };
            match direction {
                PortDirection::Output => plan.outbound.push(assignment),
                PortDirection::Input => plan.inbound.push(assignment),
            }
        }

        *inventories = working;
        tracing::info!(
            "Resolved {} outbound and {} inbound connections",
            plan.outbound.len(),
            plan.inbound.len()
        );
        Ok(plan)
    }
}

/// Intents and inventories gathered once for a single resolution run.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    intents: Vec<RoutingIntent>,
    inventories: RouteInventories,
    resolver: RoutingTaskResolver,
}

impl ResolutionContext {
    pub fn new(
        intents: Vec<RoutingIntent>,
        inventories: RouteInventories,
        resolver: RoutingTaskResolver,
    ) -> Self {
        Self {
            intents,
            inventories,
            resolver,
        }
    }

    pub fn from_hosts(hosts: &[HostRouteInfo], config: &NamingConfig) -> Result<Self> {
        Ok(Self::new(
            intents_from_hosts(hosts),
            RouteInventories::from_hosts(hosts, config)?,
            RoutingTaskResolver::new(config),
        ))
    }

    pub fn intents(&self) -> &[RoutingIntent] {
        &self.intents
    }

    pub fn inventories(&self) -> &RouteInventories {
        &self.inventories
    }

    pub fn resolve(mut self) -> Result<ResolvedPlan> {
        self.resolver.resolve(&self.intents, &mut self.inventories)
    }
}
