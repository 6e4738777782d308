//! Invariant tests over simulated links.
//!
//! Models are assembled from configuration the way a host would, driven
//! through a `SimLink`, and the recorded traces are checked against the
//! standard invariants.

use std::collections::BTreeSet;

use pkterr_core::{
    ErrorModel, ErrorModelConfig, ErrorUnit, ListErrorModel, ModelConfig, RateErrorModel,
    SharedSource,
};
use pkterr_harness::{
    InvariantRegistry, ListVerdictsMatchTargets, RateProfile, SimLink, packet_lengths,
};

fn config(json: &str) -> serde_json::Result<ErrorModelConfig> {
    serde_json::from_str(json)
}

#[test]
fn configured_rate_link_holds_invariants() {
    let model = config(r#"{ "model": { "kind": "rate", "unit": "byte", "rate": 1.0 } }"#)
        .expect("valid config")
        .build()
        .expect("valid rate");
    let mut link = SimLink::new(model);
    link.transmit_all(packet_lengths(1, 500, 0..=64));

    let snapshot =
        link.snapshot().with_rate(RateProfile { unit: ErrorUnit::Byte, rate: 1.0 });
    InvariantRegistry::standard().assert_all(&snapshot, "configured byte link");
}

#[test]
fn configured_list_link_holds_invariants() {
    let model = config(r#"{ "model": { "kind": "list", "targets": [11, 17] } }"#)
        .expect("valid config")
        .build()
        .expect("valid");
    let mut link = SimLink::new(model);
    link.transmit_all([100; 30]);

    let snapshot = link.snapshot().with_targets(BTreeSet::from([11, 17]));
    InvariantRegistry::standard().assert_all(&snapshot, "configured list link");
    assert_eq!(link.stats().corrupted, 2);
}

#[test]
fn disabled_config_link_never_corrupts() {
    let json = r#"{
        "enabled": false,
        "model": { "kind": "rate", "unit": "packet", "rate": 1.0 }
    }"#;
    let model = config(json).expect("valid config").build().expect("valid");
    let mut link = SimLink::new(model);

    assert_eq!(link.transmit_all([1500; 100]), 0);
    InvariantRegistry::standard().assert_all(&link.snapshot(), "disabled link");
}

#[test]
fn links_sharing_a_source_reproduce_a_single_stream() {
    let lens = packet_lengths(3, 200, 1..=32);
    let rate = ModelConfig::Rate { unit: ErrorUnit::Byte, rate: 0.02, seed: None };
    let config = ErrorModelConfig { enabled: true, model: rate };

    let run = || {
        let shared = SharedSource::seeded(44);
        let mut up = SimLink::new(config.build_with_source(shared.clone()).expect("valid"));
        let mut down = SimLink::new(config.build_with_source(shared).expect("valid"));
        for len in &lens {
            up.transmit(*len);
            down.transmit(*len);
        }
        (up.records().to_vec(), down.records().to_vec())
    };

    assert_eq!(run(), run());
}

#[test]
fn seed_in_config_is_reproducible() {
    let json = r#"{ "model": { "kind": "rate", "unit": "bit", "rate": 0.001, "seed": 12 } }"#;
    let config = config(json).expect("valid config");
    let lens = packet_lengths(8, 300, 0..=128);

    let mut first = SimLink::new(config.build().expect("valid"));
    let mut second = SimLink::new(config.build().expect("valid"));
    first.transmit_all(lens.iter().copied());
    second.transmit_all(lens.iter().copied());

    assert_eq!(first.records(), second.records());
}

#[test]
fn unseeded_links_drop_different_packets() {
    let rate = ModelConfig::Rate { unit: ErrorUnit::Packet, rate: 0.5, seed: None };
    let config = ErrorModelConfig { enabled: true, model: rate };

    let mut a = SimLink::new(config.build().expect("valid"));
    let mut b = SimLink::new(config.build().expect("valid"));
    a.transmit_all([1; 1000]);
    b.transmit_all([1; 1000]);

    let agree = a.records().iter().zip(b.records()).filter(|(x, y)| x.corrupt == y.corrupt).count();
    assert!(agree < 1000, "independent links dropped identical packets");
    assert!((a.stats().corruption_rate() - 0.5).abs() < 0.1);
    assert!((b.stats().corruption_rate() - 0.5).abs() < 0.1);
}

#[test]
fn list_link_tracks_target_changes_per_phase() {
    let mut link = SimLink::new(ErrorModel::new(ListErrorModel::with_targets([0, 2])));
    link.transmit_all([1; 4]);
    InvariantRegistry::standard().assert_all(&link.profiled_snapshot(), "phase one");

    link.clear_trace();
    link.model_mut().model_mut().set_list([5]);
    link.transmit_all([1; 4]);
    InvariantRegistry::standard().assert_all(&link.profiled_snapshot(), "phase two");

    let corrupted: Vec<_> = link.records().iter().filter(|r| r.corrupt).map(|r| r.uid).collect();
    assert_eq!(corrupted, vec![5]);
}

#[test]
fn list_invariant_catches_wrong_targets() {
    let mut link = SimLink::new(ErrorModel::new(ListErrorModel::with_targets([1])));
    link.transmit_all([1; 3]);

    let wrong = link.snapshot().with_targets(BTreeSet::from([2]));
    assert!(InvariantRegistry::standard().check_all(&wrong).is_err());

    let mut registry = InvariantRegistry::new();
    registry.add(ListVerdictsMatchTargets);
    assert!(registry.check_all(&link.profiled_snapshot()).is_ok());
}

#[test]
fn rate_link_reset_keeps_corrupting() {
    let model = RateErrorModel::new(ErrorUnit::Packet, 1.0).expect("valid");
    let mut link = SimLink::new(ErrorModel::new(model));
    link.transmit_all([10; 5]);
    link.model_mut().reset();
    link.transmit_all([10; 5]);

    assert_eq!(link.stats().corrupted, 10);
    InvariantRegistry::standard().assert_all(&link.profiled_snapshot(), "after reset");
}
