//! Invariant checking over verdict traces.
//!
//! A [`SimLink`](crate::SimLink) records one [`VerdictRecord`] per packet.
//! Each invariant judges those records one at a time against the rate profile
//! or target set the [`TraceSnapshot`] carries, and reports the first uid that
//! breaks it. Tests and fuzzers run the same registry over whatever trace they
//! produced.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = link.profiled_snapshot();
//! registry.check_all(&snapshot)?;
//! ```

use std::fmt;

use pkterr_core::PacketUid;

mod checks;
mod snapshot;

pub use checks::{
    DisabledNeverCorrupts, EmptyPacketsSurviveUnitTrials, FullRateCorruptsEveryTrial,
    ListVerdictsMatchTargets, ZeroRateNeverCorrupts,
};
pub use snapshot::{RateProfile, TraceSnapshot, VerdictRecord};

/// Outcome of checking one invariant against a trace.
pub type InvariantResult = Result<(), Violation>;

/// First record of a trace that breaks an invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Invariant that was broken.
    pub invariant: &'static str,
    /// Uid of the offending verdict.
    pub uid: PacketUid,
    /// What the verdict got wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at uid {}: {}", self.invariant, self.uid, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property every verdict in a trace must satisfy.
///
/// Implementors judge one record at a time, reading whatever context (rate
/// profile, targets) the snapshot carries. A check with no context to work
/// with accepts every record.
pub trait Invariant: Send + Sync {
    /// Name reported in violations.
    fn name(&self) -> &'static str;

    /// Why `record` breaks the invariant, or `None` if it holds.
    fn offense(&self, state: &TraceSnapshot, record: &VerdictRecord) -> Option<String>;

    /// Scan the trace in send order and report the first offending record.
    fn check(&self, state: &TraceSnapshot) -> InvariantResult {
        let found = state
            .records
            .iter()
            .find_map(|record| self.offense(state, record).map(|message| (record.uid, message)));
        match found {
            Some((uid, message)) => Err(Violation { invariant: self.name(), uid, message }),
            None => Ok(()),
        }
    }
}

/// Set of invariants run together over one trace.
#[derive(Default)]
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantRegistry {
    /// Registry with no invariants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding [`DisabledNeverCorrupts`], [`ZeroRateNeverCorrupts`],
    /// [`FullRateCorruptsEveryTrial`], [`EmptyPacketsSurviveUnitTrials`] and
    /// [`ListVerdictsMatchTargets`]. Safe to run on any trace.
    pub fn standard() -> Self {
        Self::new()
            .with(DisabledNeverCorrupts)
            .with(ZeroRateNeverCorrupts)
            .with(FullRateCorruptsEveryTrial)
            .with(EmptyPacketsSurviveUnitTrials)
            .with(ListVerdictsMatchTargets)
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with<I: Invariant + 'static>(mut self, invariant: I) -> Self {
        self.add(invariant);
        self
    }

    /// Register another invariant.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Names of the registered invariants, in check order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.invariants.iter().map(|inv| inv.name())
    }

    /// Run every invariant, collecting one violation per broken invariant.
    pub fn check_all(&self, state: &TraceSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// [`check_all`](Self::check_all), panicking with every violation and the
    /// trace size.
    #[allow(clippy::panic, reason = "Test assertion helper")]
    pub fn assert_all(&self, state: &TraceSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!(
                "{context}: {} verdicts, broken invariants:\n  {}",
                state.records.len(),
                messages.join("\n  ")
            );
        }
    }
}
