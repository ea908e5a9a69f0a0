//! Orchestration over a host backend.

use crate::{Result, SessionBuilder, SessionConfig};
use midilink_core::{
    with_host_context, ChannelNode, ChannelStrip, ChannelTreeBuilder, ChildDirection,
    ConnectionSource, HostContext, HostGuard, HostId, MatchOutcome, RecArm, RecArmPlan,
};
use midilink_ports::{
    discover_wired, EndpointSource, HardwareRouting, HostRouteInfo, OutboundStrip, PatchBay,
    PortDirection, ResolutionContext, ResolvedPlan, RouteApplier,
};

/// Everything a [`Session`] needs from the hosts it links.
pub trait HostBackend:
    HostContext + ConnectionSource + EndpointSource + PatchBay + HardwareRouting + RecArm
{
}

impl<T> HostBackend for T where
    T: HostContext + ConnectionSource + EndpointSource + PatchBay + HardwareRouting + RecArm + ?Sized
{
}

/// A linked multi-host session.
///
/// Every host read or write happens inside that host's context. Each call
/// gathers its own snapshot; nothing is cached between calls.
pub struct Session<B> {
    backend: B,
    config: SessionConfig,
}

impl<B> Session<B> {
    pub fn builder(backend: B) -> SessionBuilder<B> {
        SessionBuilder::new(backend)
    }

    pub(crate) fn from_parts(backend: B, config: SessionConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: HostBackend> Session<B> {
    /// Build the MIDI receive (or send) tree of `root`.
    pub fn build_tree(&self, root: &ChannelStrip, direction: ChildDirection) -> Result<ChannelNode> {
        let tree = with_host_context(&self.backend, &root.host, || {
            ChannelTreeBuilder::new(&self.backend, direction)
                .config(self.config.tree.clone())
                .build(root)
        })?;
        tracing::debug!("Built tree of {} with {} nodes", root, tree.node_count());
        Ok(tree)
    }

    /// Match the children of `source` against those of `dest`.
    ///
    /// Both trees are built fresh with the same `direction`; `dest` is the
    /// fallback target for unmatched children.
    pub fn match_children(
        &self,
        source: &ChannelStrip,
        dest: &ChannelStrip,
        direction: ChildDirection,
    ) -> Result<MatchOutcome> {
        let mut source_tree = self.build_tree(source, direction)?;
        let dest_tree = self.build_tree(dest, direction)?;
        let outcome = source_tree.match_against(&dest_tree);
        tracing::info!(
            "Matched {} children of {}: {} primary, {} secondary",
            outcome.len(),
            source,
            outcome.primary.len(),
            outcome.secondary.len()
        );
        Ok(outcome)
    }

    /// Copy record-arm state from matched children to their targets.
    pub fn sync_rec_arm(&self, outcome: &MatchOutcome) -> Result<RecArmPlan> {
        let plan = RecArmPlan::from_matches(outcome, |strip| {
            with_host_context(&self.backend, &strip.host, || self.backend.rec_arm(strip))
        })?;
        for target in plan.targets() {
            let strip = &target.target;
            with_host_context(&self.backend, &strip.host, || {
                self.backend.set_rec_arm(strip, target.armed)
            })?;
            tracing::debug!("Rec-arm of {} set to {}", strip, target.armed);
        }
        Ok(plan)
    }

    /// Snapshot `host`'s endpoints and patch-bay wiring for resolution.
    pub fn fetch_host_info(
        &self,
        host: &HostId,
        inbound_strips: Vec<ChannelStrip>,
        outbound_strips: Vec<OutboundStrip>,
    ) -> Result<HostRouteInfo> {
        let _guard = HostGuard::enter(&self.backend, host)?;
        let naming = &self.config.naming;

        let inbound_endpoints = self.backend.midi_endpoints(host, PortDirection::Input)?;
        let outbound_endpoints = self.backend.midi_endpoints(host, PortDirection::Output)?;
        let inbound_wired =
            discover_wired(&self.backend.midi_ports(host, PortDirection::Input)?, naming)?;
        let outbound_wired =
            discover_wired(&self.backend.midi_ports(host, PortDirection::Output)?, naming)?;

        Ok(HostRouteInfo {
            host: host.clone(),
            inbound_strips,
            outbound_strips,
            inbound_endpoints,
            inbound_wired,
            outbound_endpoints,
            outbound_wired,
        })
    }

    /// Resolve all hosts' intents to endpoints without touching the hosts.
    pub fn plan(&self, hosts: &[HostRouteInfo]) -> Result<ResolvedPlan> {
        Ok(ResolutionContext::from_hosts(hosts, &self.config.naming)?.resolve()?)
    }

    /// Resolve and write the hardware routing of every assigned strip.
    ///
    /// Nothing is written unless the whole resolution succeeds.
    pub fn connect_all(&self, hosts: &[HostRouteInfo]) -> Result<ResolvedPlan> {
        let plan = self.plan(hosts)?;
        let written = RouteApplier::new().apply(&plan, &self.backend)?;
        tracing::info!("Connected {} strips across {} hosts", written, hosts.len());
        Ok(plan)
    }
}
