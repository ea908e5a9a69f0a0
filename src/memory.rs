//! In-memory host backend.
//!
//! Holds the state of any number of hosts: strip connections, DAW endpoints,
//! patch-bay ports and record-arm flags. Hardware routing writes are recorded
//! instead of applied. Strip-level calls fail unless the strip's host is the
//! current context, mirroring a real DAW connection.

use midilink_core::{
    ChannelId, ChannelStrip, ChildDirection, ConnectionSource, Error, HostContext, HostId, RecArm,
    Result, StripConnection,
};
use midilink_ports::{
    EndpointSource, HardwareRouting, MidiRouteValue, NamedEndpoint, PatchBay, PatchPort,
    PortDirection,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct HostState {
    connections: HashMap<(ChannelId, ChildDirection), Vec<StripConnection>>,
    endpoints: HashMap<PortDirection, Vec<NamedEndpoint>>,
    patch_ports: HashMap<PortDirection, Vec<PatchPort>>,
    rec_arm: HashMap<ChannelId, bool>,
    routes: HashMap<(ChannelId, PortDirection), MidiRouteValue>,
    unavailable: bool,
    enters: usize,
    leaves: usize,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    hosts: RwLock<BTreeMap<HostId, HostState>>,
    /// Entered hosts, innermost last
    stack: Mutex<Vec<HostId>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_host<R>(&self, host: &HostId, f: impl FnOnce(&mut HostState) -> R) -> R {
        let mut hosts = self.hosts.write();
        f(hosts.entry(host.clone()).or_default())
    }

    /// `sender` sends MIDI on `(bus, channel)` to `receiver`; both must live on
    /// the same host.
    pub fn connect(&self, sender: &ChannelStrip, receiver: &ChannelStrip, bus: i32, channel: i32) {
        self.with_host(&receiver.host, |state| {
            state
                .connections
                .entry((receiver.id.clone(), ChildDirection::Receives))
                .or_default()
                .push(StripConnection::new(sender.clone(), bus, channel));
            state
                .connections
                .entry((sender.id.clone(), ChildDirection::Sends))
                .or_default()
                .push(StripConnection::new(receiver.clone(), bus, channel));
        });
    }

    pub fn set_endpoints(&self, host: &HostId, direction: PortDirection, endpoints: Vec<NamedEndpoint>) {
        self.with_host(host, |state| {
            state.endpoints.insert(direction, endpoints);
        });
    }

    pub fn set_patch_ports(&self, host: &HostId, direction: PortDirection, ports: Vec<PatchPort>) {
        self.with_host(host, |state| {
            state.patch_ports.insert(direction, ports);
        });
    }

    pub fn arm(&self, strip: &ChannelStrip, armed: bool) {
        self.with_host(&strip.host, |state| {
            state.rec_arm.insert(strip.id.clone(), armed);
        });
    }

    /// Make `enter` fail for `host`.
    pub fn set_unavailable(&self, host: &HostId, unavailable: bool) {
        self.with_host(host, |state| state.unavailable = unavailable);
    }

    pub fn is_armed(&self, strip: &ChannelStrip) -> bool {
        self.hosts
            .read()
            .get(&strip.host)
            .and_then(|state| state.rec_arm.get(&strip.id).copied())
            .unwrap_or(false)
    }

    /// Last routing value written for the strip's input or output.
    pub fn route(&self, strip: &ChannelStrip, direction: PortDirection) -> Option<MidiRouteValue> {
        self.hosts
            .read()
            .get(&strip.host)
            .and_then(|state| state.routes.get(&(strip.id.clone(), direction)).copied())
    }

    /// `(enters, leaves)` of `host`'s context so far.
    pub fn context_counts(&self, host: &HostId) -> (usize, usize) {
        self.hosts
            .read()
            .get(host)
            .map_or((0, 0), |state| (state.enters, state.leaves))
    }

    pub fn current_host(&self) -> Option<HostId> {
        self.stack.lock().last().cloned()
    }

    fn require_current(&self, host: &HostId) -> Result<()> {
        match self.stack.lock().last() {
            Some(current) if current == host => Ok(()),
            Some(current) => Err(Error::host(host, format!("current context is {current}"))),
            None => Err(Error::host(host, "not inside a host context")),
        }
    }

    fn read<R>(&self, host: &HostId, f: impl FnOnce(&HostState) -> R) -> Result<R> {
        self.require_current(host)?;
        let hosts = self.hosts.read();
        let state = hosts.get(host).ok_or_else(|| Error::HostUnavailable(host.clone()))?;
        Ok(f(state))
    }

    fn write(&self, host: &HostId, f: impl FnOnce(&mut HostState)) -> Result<()> {
        self.require_current(host)?;
        let mut hosts = self.hosts.write();
        let state = hosts.get_mut(host).ok_or_else(|| Error::HostUnavailable(host.clone()))?;
        f(state);
        Ok(())
    }
}

impl HostContext for MemoryBackend {
    fn enter(&self, host: &HostId) -> Result<()> {
        let mut hosts = self.hosts.write();
        match hosts.get_mut(host) {
            Some(state) if !state.unavailable => {
                state.enters += 1;
                self.stack.lock().push(host.clone());
                Ok(())
            }
            _ => Err(Error::HostUnavailable(host.clone())),
        }
    }

    fn leave(&self, host: &HostId) {
        {
            let mut stack = self.stack.lock();
            if let Some(pos) = stack.iter().rposition(|h| h == host) {
                stack.remove(pos);
            }
        }
        if let Some(state) = self.hosts.write().get_mut(host) {
            state.leaves += 1;
        }
    }
}

impl ConnectionSource for MemoryBackend {
    fn midi_connections(
        &self,
        strip: &ChannelStrip,
        direction: ChildDirection,
    ) -> Result<Vec<StripConnection>> {
        self.read(&strip.host, |state| {
            state
                .connections
                .get(&(strip.id.clone(), direction))
                .cloned()
                .unwrap_or_default()
        })
    }
}

impl RecArm for MemoryBackend {
    fn rec_arm(&self, strip: &ChannelStrip) -> Result<bool> {
        self.read(&strip.host, |state| {
            state.rec_arm.get(&strip.id).copied().unwrap_or(false)
        })
    }

    fn set_rec_arm(&self, strip: &ChannelStrip, armed: bool) -> Result<()> {
        self.write(&strip.host, |state| {
            state.rec_arm.insert(strip.id.clone(), armed);
        })
    }
}

impl EndpointSource for MemoryBackend {
    fn midi_endpoints(&self, host: &HostId, direction: PortDirection) -> Result<Vec<NamedEndpoint>> {
        self.read(host, |state| {
            state.endpoints.get(&direction).cloned().unwrap_or_default()
        })
    }
}

impl PatchBay for MemoryBackend {
    fn midi_ports(&self, host: &HostId, direction: PortDirection) -> Result<Vec<PatchPort>> {
        self.read(host, |state| {
            state.patch_ports.get(&direction).cloned().unwrap_or_default()
        })
    }
}

impl HardwareRouting for MemoryBackend {
    fn set_midi_input(&self, strip: &ChannelStrip, value: MidiRouteValue) -> Result<()> {
        self.write(&strip.host, |state| {
            state.routes.insert((strip.id.clone(), PortDirection::Input), value);
        })
    }

    fn set_midi_output(&self, strip: &ChannelStrip, value: MidiRouteValue) -> Result<()> {
        self.write(&strip.host, |state| {
            state.routes.insert((strip.id.clone(), PortDirection::Output), value);
        })
    }
}
