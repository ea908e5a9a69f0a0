//! Free endpoints per host, consumed as intents are resolved.

use super::intent::HostRouteInfo;
use crate::error::{ConnectionsError, Result};
use crate::port::{match_endpoints, NamedEndpoint, NamingConfig, PortDirection, RoutedEndpoint};
use midilink_core::HostId;
use std::collections::BTreeMap;

/// Routed endpoints of one host that are still free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRouteInventory {
    pub host: HostId,
    pub inbound: Vec<RoutedEndpoint>,
    pub outbound: Vec<RoutedEndpoint>,
}

impl HostRouteInventory {
    pub fn new(host: impl Into<HostId>) -> Self {
        Self {
            host: host.into(),
            inbound: Vec::new(),
            outbound: Vec::new(),
        }
    }

    /// Annotate the host's DAW endpoints with their wiring destinations.
    pub fn from_info(info: &HostRouteInfo, config: &NamingConfig) -> Result<Self> {
        let inbound = match_endpoints(&info.inbound_endpoints, &info.inbound_wired, &info.host, config)?;
        let outbound =
            match_endpoints(&info.outbound_endpoints, &info.outbound_wired, &info.host, config)?;
        tracing::debug!(
            "Host {}: {} routed inputs, {} routed outputs",
            info.host,
            inbound.len(),
            outbound.len()
        );
        Ok(Self {
            host: info.host.clone(),
            inbound,
            outbound,
        })
    }

    pub fn endpoints(&self, direction: PortDirection) -> &[RoutedEndpoint] {
        match direction {
            PortDirection::Input => &self.inbound,
            PortDirection::Output => &self.outbound,
        }
    }

    /// Remove and return the first free endpoint leading to `destination`.
    pub fn take(&mut self, direction: PortDirection, destination: &HostId) -> Option<NamedEndpoint> {
        let pool = match direction {
            PortDirection::Input => &mut self.inbound,
            PortDirection::Output => &mut self.outbound,
        };
        let pos = pool.iter().position(|r| r.destination == *destination)?;
        Some(pool.remove(pos).endpoint)
    }
}

/// Inventories of every host taking part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInventories {
    hosts: BTreeMap<HostId, HostRouteInventory>,
}

impl RouteInventories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hosts(hosts: &[HostRouteInfo], config: &NamingConfig) -> Result<Self> {
        hosts
            .iter()
            .map(|info| HostRouteInventory::from_info(info, config))
            .collect()
    }

    pub fn insert(&mut self, inventory: HostRouteInventory) -> Option<HostRouteInventory> {
        self.hosts.insert(inventory.host.clone(), inventory)
    }

    pub fn get(&self, host: &HostId) -> Option<&HostRouteInventory> {
        self.hosts.get(host)
    }

    pub fn get_mut(&mut self, host: &HostId) -> Result<&mut HostRouteInventory> {
        self.hosts
            .get_mut(host)
            .ok_or_else(|| ConnectionsError::UnknownHost(host.clone()))
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl FromIterator<HostRouteInventory> for RouteInventories {
    fn from_iter<I: IntoIterator<Item = HostRouteInventory>>(iter: I) -> Self {
        let mut inventories = Self::new();
        for inventory in iter {
            inventories.insert(inventory);
        }
        inventories
    }
}
