//! Test helpers and fixtures for midilink integration tests
//!
//! The two-host fixture has a master on `localhost` and a slave on
//! `192.168.2.2`. The master sends three strips to the slave through network
//! MIDI bridges and one strip back into itself through a DAW loopback cable.

use midilink::prelude::*;
use midilink::{NamedEndpoint, PatchPort};

pub const SLAVE: &str = "192.168.2.2";

/// Route library logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn slave_host() -> HostId {
    HostId::new(SLAVE)
}

pub fn master_track(n: u32) -> ChannelStrip {
    let id = format!("master_track_{n}");
    ChannelStrip::new(id.as_str(), id.as_str(), "localhost").in_project("master_project")
}

pub fn slave_track(n: u32) -> ChannelStrip {
    let (host, project) = match n {
        1 => ("localhost", "slave_project_1"),
        4 => (SLAVE, "slave_project_3"),
        _ => (SLAVE, "slave_project_2"),
    };
    let id = format!("slave_track_{n}");
    ChannelStrip::new(id.as_str(), id.as_str(), host).in_project(project)
}

fn endpoints(names: &[&str]) -> Vec<NamedEndpoint> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| NamedEndpoint::new(i as u32, *name))
        .collect()
}

/// `(own port, peer)` pairs; an empty peer leaves the port unconnected.
fn patch_ports(kind: &str, wiring: &[(u32, &str)]) -> Vec<PatchPort> {
    wiring
        .iter()
        .map(|&(n, peer)| {
            let port = PatchPort::new(format!("REAPER:MIDI {kind} {n}"));
            if peer.is_empty() {
                port
            } else {
                port.connected_to(peer)
            }
        })
        .collect()
}

pub fn two_host_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    let master = HostId::localhost();
    let slave = slave_host();

    backend.set_endpoints(
        &master,
        PortDirection::Input,
        endpoints(&[
            "system:midi_capture_1",
            "system:midi_capture_2",
            "MIDI Input 3",
            "MIDI Input 4",
            "MIDI Input 5",
        ]),
    );
    backend.set_patch_ports(
        &master,
        PortDirection::Input,
        patch_ports(
            "Input",
            &[
                (1, "system:midi_capture_1"),
                (2, "system:midi_capture_2"),
                (3, "REAPER:MIDI Output 6"),
                (4, "192.168.2.2:midi_from_slave_1"),
                (5, ""),
            ],
        ),
    );
    backend.set_endpoints(
        &master,
        PortDirection::Output,
        endpoints(&[
            "system:midi_playback_1",
            "system:midi_playback_2",
            "MIDI Output 3",
            "MIDI Output 4",
            "MIDI Output 5",
            "MIDI Output 6",
            "MIDI Output 7",
        ]),
    );
    backend.set_patch_ports(
        &master,
        PortDirection::Output,
        patch_ports(
            "Output",
            &[
                (1, "system:midi_playback_1"),
                (2, "system:midi_playback_2"),
                (3, "192.168.2.2:midi_to_slave_1"),
                (4, "192.168.2.2:midi_to_slave_2"),
                (5, "192.168.2.2:midi_to_slave_3"),
                (6, "REAPER:MIDI Input 3"),
                (7, ""),
            ],
        ),
    );

    backend.set_endpoints(
        &slave,
        PortDirection::Input,
        endpoints(&[
            "system:midi_capture_1",
            "system:midi_capture_2",
            "system:midi_capture_3",
            "system:midi_capture_4",
            "MIDI Input 5",
        ]),
    );
    backend.set_patch_ports(
        &slave,
        PortDirection::Input,
        patch_ports(
            "Input",
            &[
                (1, "system:midi_capture_1"),
                (2, "system:midi_capture_2"),
                (3, "system:midi_capture_3"),
                (4, "system:midi_capture_4"),
            ],
        ),
    );
    backend.set_endpoints(
        &slave,
        PortDirection::Output,
        endpoints(&["system:midi_playback_1", "MIDI Output 2"]),
    );
    backend.set_patch_ports(
        &slave,
        PortDirection::Output,
        patch_ports("Output", &[(1, "system:midi_playback_1")]),
    );

    backend
}

pub fn master_outbound() -> Vec<OutboundStrip> {
    vec![
        OutboundStrip::new(master_track(1), slave_track(2)),
        OutboundStrip::new(master_track(2), slave_track(3)),
        OutboundStrip::new(master_track(3), slave_track(4)),
        OutboundStrip::new(master_track(4), slave_track(1)),
    ]
}

pub fn slave_inbound() -> Vec<ChannelStrip> {
    vec![slave_track(2), slave_track(3), slave_track(4)]
}

/// Snapshot both hosts through `session`.
pub fn fetch_two_hosts<B: HostBackend>(session: &Session<B>) -> Vec<HostRouteInfo> {
    let master = session
        .fetch_host_info(&HostId::localhost(), vec![slave_track(1)], master_outbound())
        .expect("master snapshot");
    let slave = session
        .fetch_host_info(&slave_host(), slave_inbound(), Vec::new())
        .expect("slave snapshot");
    vec![master, slave]
}
