//! Packet-error decision models for network simulation.
//!
//! An error model is consulted once per packet on a transmission or reception
//! path and answers a single question: should this packet be treated as
//! lost or corrupted? The verdict is a signal only. Models never touch the
//! packet payload, and what happens to a corrupted packet (drop, mark, trace)
//! is the caller's business.
//!
//! # Architecture
//!
//! - [`ErrorModel`] is the decision contract. It owns the enable flag and
//!   short-circuits to "not corrupt" while disabled.
//! - [`CorruptionModel`] is the model-specific half, implemented by:
//!   - [`RateErrorModel`]: independent Bernoulli trials per bit, byte, or
//!     packet against a configured rate
//!   - [`ListErrorModel`]: exact-match deny-list of packet uids
//! - [`UniformSource`] / [`SharedSource`]: the uniform variate stream the rate
//!   model draws from, shareable across models for reproducible runs
//! - [`ErrorModelConfig`]: serde description of a model for assembly time
//!
//! # Usage
//!
//! ```
//! use pkterr_core::{ErrorModel, ErrorUnit, Packet, RateErrorModel};
//!
//! let rate = RateErrorModel::new(ErrorUnit::Packet, 1.0)?;
//! let mut model = ErrorModel::new(rate);
//!
//! let packet = Packet::zeroed(7, 512);
//! assert!(model.is_corrupt(&packet));
//!
//! model.disable();
//! assert!(!model.is_corrupt(&packet));
//! # Ok::<(), pkterr_core::ConfigError>(())
//! ```
//!
//! # Concurrency
//!
//! Decisions are synchronous and bounded. A model instance assumes one caller
//! at a time; a [`SharedSource`] serializes draws internally so it can feed
//! several models.

pub mod config;
pub mod error;
pub mod model;
pub mod packet;
pub mod random;

pub use config::{ErrorModelConfig, ModelConfig};
pub use error::ConfigError;
pub use model::{
    CorruptionModel, ErrorModel, ErrorUnit, ListErrorModel, RateErrorModel, create_default,
};
pub use packet::{Packet, PacketUid, PacketView};
pub use random::{DEFAULT_SEED, SeededUniform, SharedSource, UniformSource};
