//! Fuzz target for rate error model configuration and decisions
//!
//! Feeds raw rates (including NaN, infinities, negatives) and scripted variates
//! through `RateErrorModel`.
//!
//! # Invariants
//!
//! - Configuration accepts exactly rates in [0.0, 1.0]
//! - A rejected rate leaves the previous rate in place
//! - Verdicts equal the exhaustive (no short-circuit) verdict
//! - Draw count never exceeds the number of trials
//! - Disabled models consume no randomness

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pkterr_core::{ErrorModel, ErrorUnit, Packet, PacketView, RateErrorModel};
use pkterr_harness::{ScriptedUniform, exhaustive_verdict};

#[derive(Debug, Arbitrary)]
struct RateScenario {
    /// Raw rate, validated by the model
    rate: f64,
    /// Second rate applied through set_rate
    next_rate: f64,
    /// 0 = bit, 1 = byte, otherwise packet
    unit: u8,
    /// Packet length in bytes
    len: u8,
    /// Variates in [0, 1) derived from raw u16s
    draws: Vec<u16>,
    /// Whether to disable before deciding
    disabled: bool,
}

fuzz_target!(|scenario: RateScenario| {
    let unit = match scenario.unit % 3 {
        0 => ErrorUnit::Bit,
        1 => ErrorUnit::Byte,
        _ => ErrorUnit::Packet,
    };
    let in_range = |rate: f64| (0.0..=1.0).contains(&rate);

    let model = match RateErrorModel::new(unit, scenario.rate) {
        Ok(model) => {
            assert!(in_range(scenario.rate));
            model
        },
        Err(_) => {
            assert!(!in_range(scenario.rate));
            return;
        },
    };
    let mut model = ErrorModel::new(model);

    let before = model.model().rate();
    match model.model_mut().set_rate(scenario.next_rate) {
        Ok(()) => assert!(in_range(scenario.next_rate)),
        Err(_) => assert_eq!(model.model().rate().to_bits(), before.to_bits()),
    }
    let rate = model.model().rate();

    let draws: Vec<f64> =
        scenario.draws.iter().map(|raw| f64::from(*raw) / (f64::from(u16::MAX) + 1.0)).collect();
    let (source, counter) = ScriptedUniform::new(draws.clone()).into_shared();
    model.model_mut().set_random_source(source);

    let packet = Packet::zeroed(0, usize::from(scenario.len));
    let trials = match unit {
        ErrorUnit::Bit => packet.bit_len(),
        ErrorUnit::Byte => packet.byte_len() as u64,
        ErrorUnit::Packet => 1,
    };

    if scenario.disabled {
        model.disable();
        assert!(!model.is_corrupt(&packet));
        assert_eq!(counter.get(), 0);
        return;
    }

    let verdict = model.is_corrupt(&packet);
    assert!(counter.get() <= trials);

    // Replay the exact variates the model saw, cycling like the script does
    if !draws.is_empty() {
        let seen: Vec<f64> = (0..trials as usize).map(|i| draws[i % draws.len()]).collect();
        assert_eq!(verdict, exhaustive_verdict(rate, &seen));
    }
});
