//! Connection integration tests
//!
//! Snapshots both fixture hosts through a session, resolves the port
//! assignment and checks what ends up in the strips' hardware routing.

use crate::helpers::*;
use midilink::prelude::*;
use midilink::{ConnectionsError, Error, MidiRouteValue, PatchPort};

fn session() -> Session<MemoryBackend> {
    init_tracing();
    Session::builder(two_host_backend()).build().unwrap()
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_fetch_discovers_wiring() {
    let session = session();
    let hosts = fetch_two_hosts(&session);

    let master = &hosts[0];
    assert_eq!(master.inbound_wired.len(), 4);
    assert_eq!(master.outbound_wired.len(), 6);
    assert_eq!(master.outbound_wired[5].dest_host, "REAPER");
    assert_eq!(master.outbound_endpoints.len(), 7);

    let slave = &hosts[1];
    assert_eq!(slave.host, slave_host());
    assert_eq!(slave.inbound_wired.len(), 4);
    assert!(slave.outbound_strips.is_empty());

    for host in [HostId::localhost(), slave_host()] {
        let (enters, leaves) = session.backend().context_counts(&host);
        assert_eq!(enters, 1);
        assert_eq!(leaves, 1);
    }
    assert_eq!(session.backend().current_host(), None);
}

#[test]
fn test_fetch_from_unavailable_host() {
    let session = session();
    session.backend().set_unavailable(&slave_host(), true);

    let err = session
        .fetch_host_info(&slave_host(), slave_inbound(), Vec::new())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Core(midilink::core::Error::HostUnavailable(ref host)) if *host == slave_host()
    ));
}

#[test]
fn test_ambiguous_patch_bay_port() {
    let session = session();
    session.backend().set_patch_ports(
        &slave_host(),
        PortDirection::Input,
        vec![PatchPort::new("REAPER:MIDI Input 1")
            .connected_to("system:midi_capture_1")
            .connected_to("10.0.0.4:midi_from_somewhere")],
    );

    let err = session
        .fetch_host_info(&slave_host(), slave_inbound(), Vec::new())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Connections(ConnectionsError::AmbiguousWiring { .. })
    ));
    // the guard left the host even though the snapshot failed
    assert_eq!(session.backend().current_host(), None);
}

// ---------------------------------------------------------------------------
// Resolution and routing writes
// ---------------------------------------------------------------------------

#[test]
fn test_connect_all_writes_routes() {
    let session = session();
    let hosts = fetch_two_hosts(&session);
    let plan = session.connect_all(&hosts).unwrap();
    assert_eq!(plan.len(), 8);

    let backend = session.backend();
    for (n, index) in [(1, 2), (2, 3), (3, 4), (4, 5)] {
        assert_eq!(
            backend.route(&master_track(n), PortDirection::Output),
            Some(MidiRouteValue::output(index, 0))
        );
    }
    for (n, index) in [(2, 0), (3, 1), (4, 2), (1, 2)] {
        assert_eq!(
            backend.route(&slave_track(n), PortDirection::Input),
            Some(MidiRouteValue::input(index, 0))
        );
    }
    assert_eq!(
        backend
            .route(&master_track(2), PortDirection::Output)
            .map(|v| v.encode()),
        Some(96)
    );
    assert_eq!(
        backend
            .route(&slave_track(3), PortDirection::Input)
            .map(|v| v.encode()),
        Some(4096 + 32)
    );
    assert_eq!(backend.current_host(), None);
}

#[test]
fn test_plan_does_not_write() {
    let session = session();
    let hosts = fetch_two_hosts(&session);
    let plan = session.plan(&hosts).unwrap();

    assert_eq!(plan.outbound.len(), 4);
    assert_eq!(plan.inbound.len(), 4);
    assert_eq!(session.backend().route(&master_track(1), PortDirection::Output), None);
}

#[test]
fn test_exhaustion_writes_nothing() {
    let session = session();
    // unplug the loopback cable master_track_4 needs
    session.backend().set_patch_ports(
        &HostId::localhost(),
        PortDirection::Output,
        vec![
            PatchPort::new("REAPER:MIDI Output 3").connected_to("192.168.2.2:midi_to_slave_1"),
            PatchPort::new("REAPER:MIDI Output 4").connected_to("192.168.2.2:midi_to_slave_2"),
            PatchPort::new("REAPER:MIDI Output 5").connected_to("192.168.2.2:midi_to_slave_3"),
        ],
    );
    let hosts = fetch_two_hosts(&session);

    let err = session.connect_all(&hosts).err().unwrap();
    assert_eq!(
        err.to_string(),
        "Connections: not enough out ports for host 'localhost' \
         (strip master_track_4 wants a port to 'localhost')"
    );
    for n in 1..=4 {
        assert_eq!(session.backend().route(&master_track(n), PortDirection::Output), None);
        assert_eq!(session.backend().route(&slave_track(n), PortDirection::Input), None);
    }
}

#[test]
fn test_unpaired_inbound_strip_is_routed() {
    let session = session();
    let mut hosts = fetch_two_hosts(&session);
    hosts[1].inbound_strips.push(slave_track(5));
    hosts[0].outbound_strips.retain(|o| o.remote.id.as_str() != "slave_track_4");

    let plan = session.connect_all(&hosts).unwrap();
    assert_eq!(plan.outbound.len(), 3);
    assert_eq!(plan.inbound.len(), 5);
    let backend = session.backend();
    assert_eq!(
        backend.route(&slave_track(4), PortDirection::Input),
        Some(MidiRouteValue::input(2, 0))
    );
    assert_eq!(
        backend.route(&slave_track(5), PortDirection::Input),
        Some(MidiRouteValue::input(3, 0))
    );
    assert_eq!(backend.route(&master_track(3), PortDirection::Output), None);
}
