//! Topology integration tests
//!
//! A master bus receives from two strips, one of which has a receive of its
//! own. The slave bus mirrors only the first level.

use crate::helpers::*;
use midilink::prelude::*;
use midilink::ports::outbound_from_matches;
use midilink::{ChannelId, Error};

fn master(id: &str) -> ChannelStrip {
    ChannelStrip::new(id, id, "localhost").in_project("master_project")
}

fn slave(id: &str) -> ChannelStrip {
    ChannelStrip::new(id, id, SLAVE).in_project("slave_project_2")
}

fn backend() -> MemoryBackend {
    let backend = two_host_backend();
    backend.connect(&master("strings"), &master("m_bus"), 1, 0);
    backend.connect(&master("brass"), &master("m_bus"), 2, 0);
    backend.connect(&master("horns"), &master("brass"), 1, 1);
    // carries audio only
    backend.connect(&master("fx"), &master("m_bus"), -1, -1);

    backend.connect(&slave("s_strings"), &slave("s_bus"), 1, 0);
    backend.connect(&slave("s_brass"), &slave("s_bus"), 2, 0);
    backend
}

fn session(backend: MemoryBackend) -> Session<MemoryBackend> {
    init_tracing();
    Session::builder(backend).build().unwrap()
}

// ---------------------------------------------------------------------------
// Trees and matching
// ---------------------------------------------------------------------------

#[test]
fn test_build_tree_skips_non_midi() {
    let session = session(backend());
    let tree = session
        .build_tree(&master("m_bus"), ChildDirection::Receives)
        .unwrap();
    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.children.len(), 2);
    assert!(tree.children.flatten().contains_key(&ChannelId::from("horns")));
}

#[test]
fn test_match_children_across_hosts() {
    let session = session(backend());
    let outcome = session
        .match_children(&master("m_bus"), &slave("s_bus"), ChildDirection::Receives)
        .unwrap();

    assert_eq!(outcome.primary.len(), 2);
    assert_eq!(outcome.secondary.len(), 1);
    assert_eq!(outcome.target_of(&"strings".into()), Some(&slave("s_strings")));
    assert_eq!(outcome.target_of(&"brass".into()), Some(&slave("s_brass")));
    // horns has no counterpart and follows its matched parent
    assert_eq!(outcome.target_of(&"horns".into()), Some(&slave("s_brass")));
    assert!(outcome.secondary.contains_key(&ChannelId::from("horns")));

    for host in [HostId::localhost(), slave_host()] {
        let (enters, leaves) = session.backend().context_counts(&host);
        assert_eq!(enters, leaves);
    }
}

#[test]
fn test_primary_matches_become_outbound_strips() {
    let session = session(backend());
    let outcome = session
        .match_children(&master("m_bus"), &slave("s_bus"), ChildDirection::Receives)
        .unwrap();

    let outbound = outbound_from_matches(&outcome, MatchSet::Primary);
    let pairs: Vec<_> = outbound
        .iter()
        .map(|o| (o.strip.id.as_str(), o.remote.id.as_str(), o.remote.host.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("brass", "s_brass", SLAVE), ("strings", "s_strings", SLAVE)]
    );
}

#[test]
fn test_cycle_policy() {
    let backend = backend();
    backend.connect(&master("m_bus"), &master("horns"), 3, 0);

    let truncated = session(backend)
        .build_tree(&master("m_bus"), ChildDirection::Receives)
        .unwrap();
    assert_eq!(truncated.node_count(), 4);

    let backend = self::backend();
    backend.connect(&master("m_bus"), &master("horns"), 3, 0);
    let strict = Session::builder(backend)
        .cycle_policy(CyclePolicy::Error)
        .build()
        .unwrap();
    let err = strict
        .build_tree(&master("m_bus"), ChildDirection::Receives)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Core(midilink::core::Error::RoutingCycle { .. })
    ));
    assert_eq!(strict.backend().current_host(), None);
}

// ---------------------------------------------------------------------------
// Rec-arm
// ---------------------------------------------------------------------------

#[test]
fn test_sync_rec_arm() {
    let backend = backend();
    backend.arm(&master("horns"), true);
    backend.arm(&slave("s_strings"), true);
    let session = session(backend);

    let outcome = session
        .match_children(&master("m_bus"), &slave("s_bus"), ChildDirection::Receives)
        .unwrap();
    let plan = session.sync_rec_arm(&outcome).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(plan.is_armed(&"s_brass".into()), Some(true));
    assert_eq!(plan.is_armed(&"s_strings".into()), Some(false));
    assert!(session.backend().is_armed(&slave("s_brass")));
    assert!(!session.backend().is_armed(&slave("s_strings")));
}
