//! Config integration tests
//!
//! Custom aliases change which patch-bay client is inspected and which
//! destinations count as local.

use crate::helpers::*;
use midilink::prelude::*;
use midilink::{NamedEndpoint, PatchPort};

fn ardour_backend() -> MemoryBackend {
    let backend = MemoryBackend::new();
    let host = HostId::localhost();
    backend.set_endpoints(
        &host,
        PortDirection::Output,
        vec![
            NamedEndpoint::new(0, "alsa_hw:playback_1"),
            NamedEndpoint::new(1, "MIDI out 2"),
            NamedEndpoint::new(2, "MIDI out 3"),
        ],
    );
    backend.set_patch_ports(
        &host,
        PortDirection::Output,
        vec![
            PatchPort::new("ardour:MIDI out 1").connected_to("alsa_hw:playback_1"),
            PatchPort::new("ardour:MIDI out 2").connected_to("10.1.1.20:from_master"),
            PatchPort::new("ardour:MIDI out 3").connected_to("ardour:MIDI in 1"),
            PatchPort::new("REAPER:MIDI Output 1").connected_to("10.1.1.21:from_reaper"),
        ],
    );
    backend
}

#[cfg(feature = "toml-config")]
#[test]
fn test_session_from_toml() {
    init_tracing();
    let config = SessionConfig::from_toml_str(
        r#"
        [naming]
        hardware_alias = "alsa_hw"
        daw_alias = "ardour"
        "#,
    )
    .unwrap();
    let session = Session::builder(ardour_backend()).config(config).build().unwrap();

    let info = session
        .fetch_host_info(&HostId::localhost(), Vec::new(), Vec::new())
        .unwrap();
    let wired: Vec<_> = info
        .outbound_wired
        .iter()
        .map(|w| (w.name.as_str(), w.dest_host.as_str()))
        .collect();
    assert_eq!(
        wired,
        vec![
            ("MIDI out 1", "alsa_hw"),
            ("MIDI out 2", "10.1.1.20"),
            ("MIDI out 3", "ardour"),
        ]
    );
}

#[test]
fn test_default_aliases_ignore_foreign_daw() {
    init_tracing();
    let session = Session::builder(ardour_backend()).build().unwrap();
    let info = session
        .fetch_host_info(&HostId::localhost(), Vec::new(), Vec::new())
        .unwrap();
    assert_eq!(info.outbound_wired.len(), 1);
    assert_eq!(info.outbound_wired[0].dest_host, "10.1.1.21");
}
