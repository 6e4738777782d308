//! The error model decision contract.
//!
//! [`ErrorModel`] wraps a [`CorruptionModel`] with the enable flag every model
//! shares. The split mirrors the two halves of a decision:
//!
//! - The wrapper decides *whether to ask* (disabled models never consult their
//!   model, consume randomness, or touch state).
//! - The [`CorruptionModel`] decides *what the answer is*.
//!
//! Enable state and reset are orthogonal: [`ErrorModel::reset`] clears model
//! state and never changes the enable flag.

mod list;
mod rate;

use std::fmt;

pub use list::ListErrorModel;
pub use rate::{ErrorUnit, RateErrorModel};

use crate::packet::PacketView;

/// Model-specific half of an error model.
///
/// Implementations are only consulted while the owning [`ErrorModel`] is
/// enabled.
pub trait CorruptionModel: fmt::Debug + Send {
    /// Decide whether `packet` is corrupted.
    ///
    /// May consume randomness. Must not fail and must not modify the packet.
    fn corrupts(&mut self, packet: &dyn PacketView) -> bool;

    /// Clear accumulated state, keeping configuration.
    fn reset(&mut self);

    /// Short name used in log events.
    fn kind(&self) -> &'static str {
        "custom"
    }
}

impl<M: CorruptionModel + ?Sized> CorruptionModel for Box<M> {
    fn corrupts(&mut self, packet: &dyn PacketView) -> bool {
        (**self).corrupts(packet)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

/// An error model: enable flag plus a [`CorruptionModel`].
///
/// The default type parameter is a boxed trait object, which is what hosts
/// hold when the concrete model is chosen at configuration time. Keep the
/// concrete type (`ErrorModel<RateErrorModel>`) when typed access to the
/// model's configuration is needed.
///
/// # Invariants
///
/// - While disabled, [`is_corrupt`](Self::is_corrupt) returns `false` without
///   consulting the model.
/// - [`reset`](Self::reset) never changes the enable flag.
/// - New models start enabled.
#[derive(Debug, Clone)]
pub struct ErrorModel<M = Box<dyn CorruptionModel>> {
    enabled: bool,
    model: M,
}

impl<M: CorruptionModel> ErrorModel<M> {
    /// Wrap a model. The result starts enabled.
    pub fn new(model: M) -> Self {
        Self { enabled: true, model }
    }

    /// True if the packet is to be treated as corrupted.
    pub fn is_corrupt(&mut self, packet: &dyn PacketView) -> bool {
        if !self.enabled {
            return false;
        }

        let corrupt = self.model.corrupts(packet);
        if corrupt {
            tracing::trace!(uid = packet.uid(), model = self.model.kind(), "packet corrupted");
        }
        corrupt
    }

    /// Reset model state. The enable flag is left unchanged.
    pub fn reset(&mut self) {
        tracing::debug!(enabled = self.enabled, "error model reset");
        self.model.reset();
    }

    /// Enable the model.
    pub fn enable(&mut self) {
        if !self.enabled {
            tracing::debug!("error model enabled");
        }
        self.enabled = true;
    }

    /// Disable the model.
    pub fn disable(&mut self) {
        if self.enabled {
            tracing::debug!("error model disabled");
        }
        self.enabled = false;
    }

    /// True if the model is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The wrapped model, mutably (for reconfiguration).
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Unwrap into the model, discarding the enable flag.
    pub fn into_inner(self) -> M {
        self.model
    }
}

impl<M: CorruptionModel + 'static> ErrorModel<M> {
    /// Erase the concrete model type, keeping the enable flag.
    pub fn boxed(self) -> ErrorModel {
        ErrorModel { enabled: self.enabled, model: Box::new(self.model) }
    }
}

impl Default for ErrorModel {
    fn default() -> Self {
        create_default()
    }
}

/// Ready-to-use default error model.
///
/// An enabled [`RateErrorModel`] with [`ErrorUnit::Byte`], rate `0.0`, and its
/// own default-seeded source. It corrupts nothing until reconfigured, which
/// makes it a safe placeholder wherever a host wants an error model slot.
pub fn create_default() -> ErrorModel {
    ErrorModel::new(RateErrorModel::default()).boxed()
}
