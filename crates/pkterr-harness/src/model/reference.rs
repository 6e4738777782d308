//! Naive reference implementations.

use std::collections::BTreeSet;

use pkterr_core::PacketUid;

use super::{ListOperation, Observation};

/// Reference list model: an unordered `Vec` walked linearly on every query.
#[derive(Debug, Clone)]
pub struct ReferenceListModel {
    enabled: bool,
    targets: Vec<PacketUid>,
}

impl Default for ReferenceListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceListModel {
    /// Create an enabled reference with no targets.
    pub fn new() -> Self {
        Self { enabled: true, targets: Vec::new() }
    }

    /// Apply an operation and return what a caller would observe.
    pub fn apply(&mut self, op: &ListOperation) -> Observation {
        match op {
            ListOperation::Enable => {
                self.enabled = true;
                Observation::Done
            },
            ListOperation::Disable => {
                self.enabled = false;
                Observation::Done
            },
            ListOperation::Reset => {
                self.targets.clear();
                Observation::Done
            },
            ListOperation::SetList { targets } => {
                self.targets = targets.iter().map(|uid| PacketUid::from(*uid)).collect();
                Observation::Done
            },
            ListOperation::Query { uid, .. } | ListOperation::MutateSnapshot { uid } => {
                Observation::Verdict(self.verdict(PacketUid::from(*uid)))
            },
            ListOperation::ReadList => {
                Observation::List(self.targets.iter().copied().collect::<BTreeSet<_>>())
            },
            ListOperation::ReadEnabled => Observation::Enabled(self.enabled),
        }
    }

    fn verdict(&self, uid: PacketUid) -> bool {
        if !self.enabled {
            return false;
        }
        for target in &self.targets {
            if *target == uid {
                return true;
            }
        }
        false
    }
}

/// Verdict from drawing every trial, with no short-circuit.
///
/// `draws` holds one variate per unit. A trial fails iff `u <= rate`; a zero
/// rate never fails.
pub fn exhaustive_verdict(rate: f64, draws: &[f64]) -> bool {
    rate > 0.0 && draws.iter().any(|u| *u <= rate)
}
