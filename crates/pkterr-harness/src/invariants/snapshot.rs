//! Verdict traces for invariant checking.
//!
//! Invariants operate on a recorded trace plus whatever model context the
//! test knows, rather than on live models, so a check never consumes
//! randomness or disturbs model state.

use std::collections::BTreeSet;

use pkterr_core::{ErrorUnit, PacketUid};

/// One verdict as observed by the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictRecord {
    /// Packet uid.
    pub uid: PacketUid,
    /// Packet length in bytes.
    pub byte_len: usize,
    /// Packet length in bits.
    pub bit_len: u64,
    /// Whether the model was enabled when consulted.
    pub enabled: bool,
    /// The verdict.
    pub corrupt: bool,
}

impl VerdictRecord {
    /// Number of Bernoulli trials a rate model runs for this packet.
    pub fn trials(&self, unit: ErrorUnit) -> u64 {
        match unit {
            ErrorUnit::Packet => 1,
            ErrorUnit::Byte => self.byte_len as u64,
            ErrorUnit::Bit => self.bit_len,
        }
    }
}

/// Rate model configuration in effect for a whole trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateProfile {
    /// Trial granularity.
    pub unit: ErrorUnit,
    /// Per-unit error rate.
    pub rate: f64,
}

/// A recorded trace plus optional model context.
#[derive(Debug, Clone, Default)]
pub struct TraceSnapshot {
    /// Verdicts in send order.
    pub records: Vec<VerdictRecord>,
    /// Rate configuration, if the trace came from a rate model.
    pub rate: Option<RateProfile>,
    /// Target set, if the trace came from a list model.
    pub targets: Option<BTreeSet<PacketUid>>,
}

impl TraceSnapshot {
    /// Create a snapshot without model context.
    pub fn new(records: Vec<VerdictRecord>) -> Self {
        Self { records, ..Default::default() }
    }

    /// Attach rate model context.
    #[must_use]
    pub fn with_rate(mut self, profile: RateProfile) -> Self {
        self.rate = Some(profile);
        self
    }

    /// Attach list model context.
    #[must_use]
    pub fn with_targets(mut self, targets: BTreeSet<PacketUid>) -> Self {
        self.targets = Some(targets);
        self
    }
}
