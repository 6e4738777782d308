//! Simulated link driving packets through an error model.
//!
//! `SimLink` plays the host's role: it assigns sequential uids, asks the
//! error model for a verdict on every packet, and records what it saw. It does
//! not drop or deliver anything; verdicts are only recorded.

use std::ops::RangeInclusive;

use pkterr_core::{
    CorruptionModel, ErrorModel, ListErrorModel, Packet, PacketUid, PacketView, RateErrorModel,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::invariants::{RateProfile, TraceSnapshot, VerdictRecord};

/// Counters for a link's verdicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Packets offered to the error model.
    pub sent: u64,
    /// Packets the error model flagged as corrupt.
    pub corrupted: u64,
}

impl LinkStats {
    /// Fraction of sent packets flagged as corrupt.
    pub fn corruption_rate(&self) -> f64 {
        if self.sent == 0 { 0.0 } else { self.corrupted as f64 / self.sent as f64 }
    }
}

/// A simulated link consulting an error model once per packet.
#[derive(Debug)]
pub struct SimLink<M = Box<dyn CorruptionModel>> {
    model: ErrorModel<M>,
    next_uid: PacketUid,
    records: Vec<VerdictRecord>,
    stats: LinkStats,
}

impl<M: CorruptionModel> SimLink<M> {
    /// Create a link whose first packet gets uid 0.
    pub fn new(model: ErrorModel<M>) -> Self {
        Self::starting_at(model, 0)
    }

    /// Create a link whose first packet gets `first_uid`.
    pub fn starting_at(model: ErrorModel<M>, first_uid: PacketUid) -> Self {
        Self { model, next_uid: first_uid, records: Vec::new(), stats: LinkStats::default() }
    }

    /// Send a zeroed packet of `len` bytes with the next uid.
    ///
    /// Returns the verdict.
    pub fn transmit(&mut self, len: usize) -> bool {
        let packet = Packet::zeroed(self.next_uid, len);
        self.next_uid += 1;
        self.transmit_packet(&packet)
    }

    /// Send a host-built packet. The uid counter is left alone.
    pub fn transmit_packet(&mut self, packet: &dyn PacketView) -> bool {
        let enabled = self.model.is_enabled();
        let corrupt = self.model.is_corrupt(packet);

        self.stats.sent += 1;
        if corrupt {
            self.stats.corrupted += 1;
        }
        self.records.push(VerdictRecord {
            uid: packet.uid(),
            byte_len: packet.byte_len(),
            bit_len: packet.bit_len(),
            enabled,
            corrupt,
        });
        corrupt
    }

    /// Send one packet per length. Returns how many were flagged corrupt.
    pub fn transmit_all(&mut self, lens: impl IntoIterator<Item = usize>) -> u64 {
        let before = self.stats.corrupted;
        for len in lens {
            self.transmit(len);
        }
        let corrupted = self.stats.corrupted - before;
        tracing::debug!(
            sent = self.stats.sent,
            corrupted = self.stats.corrupted,
            "link batch complete"
        );
        corrupted
    }

    /// The link's error model.
    pub fn model(&self) -> &ErrorModel<M> {
        &self.model
    }

    /// The link's error model, mutably.
    pub fn model_mut(&mut self) -> &mut ErrorModel<M> {
        &mut self.model
    }

    /// Uid the next [`transmit`](Self::transmit) will use.
    pub fn next_uid(&self) -> PacketUid {
        self.next_uid
    }

    /// Verdict counters.
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    /// Every verdict recorded so far, in send order.
    pub fn records(&self) -> &[VerdictRecord] {
        &self.records
    }

    /// Drop recorded verdicts and counters. Uids keep counting.
    pub fn clear_trace(&mut self) {
        self.records.clear();
        self.stats = LinkStats::default();
    }

    /// Snapshot of the recorded verdicts without model context.
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot::new(self.records.clone())
    }
}

impl SimLink<RateErrorModel> {
    /// Snapshot carrying the rate model's current unit and rate.
    ///
    /// Only meaningful if the configuration did not change while the trace
    /// was recorded.
    pub fn profiled_snapshot(&self) -> TraceSnapshot {
        let rate = self.model.model();
        self.snapshot().with_rate(RateProfile { unit: rate.unit(), rate: rate.rate() })
    }
}

impl SimLink<ListErrorModel> {
    /// Snapshot carrying the list model's current targets.
    ///
    /// Only meaningful if the targets did not change while the trace was
    /// recorded.
    pub fn profiled_snapshot(&self) -> TraceSnapshot {
        self.snapshot().with_targets(self.model.model().list())
    }
}

/// Deterministic packet lengths drawn uniformly from `range`.
pub fn packet_lengths(seed: u64, count: usize, range: RangeInclusive<usize>) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(range.clone())).collect()
}
