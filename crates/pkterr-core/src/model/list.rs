//! Deny-list error model.
//!
//! Corrupts exactly the packets whose uid is in a target set. Membership is a
//! pure static test: the model does not compensate for hosts whose uid
//! assignment shifts once a targeted packet is lost, so picking uids from an
//! unerrored trace may take some trial and error.

use std::collections::{BTreeSet, HashSet};

use super::CorruptionModel;
use crate::packet::{PacketUid, PacketView};

/// Corrupts packets whose uid is in the target set.
///
/// [`reset`](CorruptionModel::reset) empties the target set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListErrorModel {
    targets: HashSet<PacketUid>,
}

impl ListErrorModel {
    /// Create a model with no targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model targeting `uids`.
    pub fn with_targets(uids: impl IntoIterator<Item = PacketUid>) -> Self {
        Self { targets: uids.into_iter().collect() }
    }

    /// Snapshot of the target set.
    ///
    /// The returned set is a copy; changing it does not affect the model.
    pub fn list(&self) -> BTreeSet<PacketUid> {
        self.targets.iter().copied().collect()
    }

    /// Replace the target set with `uids`.
    ///
    /// Previous targets are discarded, not merged.
    pub fn set_list(&mut self, uids: impl IntoIterator<Item = PacketUid>) {
        self.targets = uids.into_iter().collect();
        tracing::debug!(targets = self.targets.len(), "target list replaced");
    }

    /// True if `uid` is targeted.
    pub fn contains(&self, uid: PacketUid) -> bool {
        self.targets.contains(&uid)
    }

    /// Number of targeted uids.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True if no uids are targeted.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl CorruptionModel for ListErrorModel {
    fn corrupts(&mut self, packet: &dyn PacketView) -> bool {
        self.targets.contains(&packet.uid())
    }

    fn reset(&mut self) {
        self.targets.clear();
    }

    fn kind(&self) -> &'static str {
        "list"
    }
}
