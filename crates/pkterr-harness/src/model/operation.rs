//! Operations for model-based testing of the list model.
//!
//! Operations are generated randomly by proptest or `arbitrary` and applied to
//! both the reference and the real model.

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use pkterr_core::{ErrorModel, ListErrorModel, Packet, PacketUid};

/// Packet uid in operations (u8 keeps collisions with targets frequent).
pub type ModelUid = u8;

/// Operations that can be applied to a list error model.
#[derive(Debug, Clone, Arbitrary)]
pub enum ListOperation {
    /// Enable the model.
    Enable,

    /// Disable the model.
    Disable,

    /// Reset the model (clears targets, keeps enable state).
    Reset,

    /// Replace the target set.
    SetList {
        /// New targets; duplicates allowed.
        targets: Vec<ModelUid>,
    },

    /// Ask for a verdict on a packet.
    Query {
        /// Packet uid.
        uid: ModelUid,
        /// Packet length in bytes (irrelevant to the verdict).
        len: u8,
    },

    /// Read the target set.
    ReadList,

    /// Read the enable flag.
    ReadEnabled,

    /// Take a target snapshot, add `uid` to the copy, then query `uid`.
    ///
    /// The copy must be detached, so the verdict only depends on the model's
    /// own targets.
    MutateSnapshot {
        /// Uid added to the copy and then queried.
        uid: ModelUid,
    },
}

/// Observable outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Operation has no observable output.
    Done,
    /// Corrupt verdict.
    Verdict(bool),
    /// Target set snapshot.
    List(BTreeSet<PacketUid>),
    /// Enable flag.
    Enabled(bool),
}

impl ListOperation {
    /// Apply this operation to a real list error model.
    pub fn apply_to(&self, model: &mut ErrorModel<ListErrorModel>) -> Observation {
        match self {
            Self::Enable => {
                model.enable();
                Observation::Done
            },
            Self::Disable => {
                model.disable();
                Observation::Done
            },
            Self::Reset => {
                model.reset();
                Observation::Done
            },
            Self::SetList { targets } => {
                model.model_mut().set_list(targets.iter().map(|uid| PacketUid::from(*uid)));
                Observation::Done
            },
            Self::Query { uid, len } => {
                let packet = Packet::zeroed(PacketUid::from(*uid), usize::from(*len));
                Observation::Verdict(model.is_corrupt(&packet))
            },
            Self::ReadList => Observation::List(model.model().list()),
            Self::ReadEnabled => Observation::Enabled(model.is_enabled()),
            Self::MutateSnapshot { uid } => {
                let uid = PacketUid::from(*uid);
                let mut snapshot = model.model().list();
                snapshot.insert(uid);
                Observation::Verdict(model.is_corrupt(&Packet::zeroed(uid, 1)))
            },
        }
    }
}
