//! Deterministic test harness for pkterr error models.
//!
//! Tools for exercising error models the way a host simulation would, with
//! reproducible randomness and checkable traces.
//!
//! # Scripted Randomness
//!
//! [`ScriptedUniform`] replays a fixed sequence of variates and counts draws,
//! so tests can pin down exactly which trial fails and how many draws a
//! decision consumed.
//!
//! # Simulated Links
//!
//! [`SimLink`] assigns sequential uids to packets the way a host packet system
//! would, runs each through an error model, and records a [`VerdictRecord`]
//! per packet.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks behavioral properties over a
//! [`TraceSnapshot`]. Use [`InvariantRegistry::standard()`] for the properties
//! every error model must satisfy.
//!
//! # Model-Based Testing
//!
//! The `model` module provides [`ReferenceListModel`], a deliberately naive
//! reference for the list model, and [`ListOperation`] sequences generated by
//! `arbitrary` or proptest and applied to both.

#![forbid(unsafe_code)]

pub mod invariants;
pub mod link;
pub mod model;
pub mod scripted;

pub use invariants::{
    DisabledNeverCorrupts, EmptyPacketsSurviveUnitTrials, FullRateCorruptsEveryTrial, Invariant,
    InvariantRegistry, InvariantResult, ListVerdictsMatchTargets, RateProfile, TraceSnapshot,
    VerdictRecord, Violation, ZeroRateNeverCorrupts,
};
pub use link::{LinkStats, SimLink, packet_lengths};
pub use model::{ListOperation, ModelUid, Observation, ReferenceListModel, exhaustive_verdict};
pub use scripted::{DrawCounter, ScriptedUniform};
