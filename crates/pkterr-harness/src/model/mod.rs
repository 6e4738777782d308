//! Reference models for model-based testing.
//!
//! References are deliberately naive: easy to read, obviously correct, and
//! free to be slow. Property tests and fuzzers apply the same operations to
//! a reference and to the real model and compare observations.

mod operation;
mod reference;

pub use operation::{ListOperation, ModelUid, Observation};
pub use reference::{ReferenceListModel, exhaustive_verdict};
