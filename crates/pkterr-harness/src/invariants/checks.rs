//! Standard invariant checks.
//!
//! Each check accepts every record when the snapshot lacks the context it
//! needs, so the whole standard set can run against any trace.

use pkterr_core::ErrorUnit;

use super::{Invariant, TraceSnapshot, VerdictRecord};

/// A disabled model never reports corruption.
pub struct DisabledNeverCorrupts;

impl Invariant for DisabledNeverCorrupts {
    fn name(&self) -> &'static str {
        "DisabledNeverCorrupts"
    }

    fn offense(&self, _state: &TraceSnapshot, record: &VerdictRecord) -> Option<String> {
        (!record.enabled && record.corrupt).then(|| "corrupted while disabled".to_owned())
    }
}

/// A zero rate never corrupts, whatever the unit or length.
pub struct ZeroRateNeverCorrupts;

impl Invariant for ZeroRateNeverCorrupts {
    fn name(&self) -> &'static str {
        "ZeroRateNeverCorrupts"
    }

    fn offense(&self, state: &TraceSnapshot, record: &VerdictRecord) -> Option<String> {
        let profile = state.rate?;
        (profile.rate <= 0.0 && record.corrupt).then(|| "corrupted at rate 0".to_owned())
    }
}

/// A full rate corrupts every enabled packet that has at least one trial.
pub struct FullRateCorruptsEveryTrial;

impl Invariant for FullRateCorruptsEveryTrial {
    fn name(&self) -> &'static str {
        "FullRateCorruptsEveryTrial"
    }

    fn offense(&self, state: &TraceSnapshot, record: &VerdictRecord) -> Option<String> {
        let profile = state.rate?;
        let missed = profile.rate >= 1.0
            && record.enabled
            && record.trials(profile.unit) > 0
            && !record.corrupt;
        missed.then(|| {
            format!("{} bytes survived at rate 1 with unit {:?}", record.byte_len, profile.unit)
        })
    }
}

/// A packet with zero bit or byte trials is never corrupted.
pub struct EmptyPacketsSurviveUnitTrials;

impl Invariant for EmptyPacketsSurviveUnitTrials {
    fn name(&self) -> &'static str {
        "EmptyPacketsSurviveUnitTrials"
    }

    fn offense(&self, state: &TraceSnapshot, record: &VerdictRecord) -> Option<String> {
        let profile = state.rate?;
        let empty = profile.unit != ErrorUnit::Packet && record.trials(profile.unit) == 0;
        (empty && record.corrupt)
            .then(|| format!("corrupted with zero {:?} trials", profile.unit))
    }
}

/// An enabled list model corrupts exactly its targets.
pub struct ListVerdictsMatchTargets;

impl Invariant for ListVerdictsMatchTargets {
    fn name(&self) -> &'static str {
        "ListVerdictsMatchTargets"
    }

    fn offense(&self, state: &TraceSnapshot, record: &VerdictRecord) -> Option<String> {
        let targets = state.targets.as_ref()?;
        let targeted = targets.contains(&record.uid);
        (record.enabled && record.corrupt != targeted).then(|| {
            format!("corrupt={} but targeted={targeted} (targets {targets:?})", record.corrupt)
        })
    }
}
