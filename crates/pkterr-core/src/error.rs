//! Error types for error model configuration.
//!
//! Only configuration can fail. Once a model is assembled, every decision is
//! total and returns a plain boolean.

use thiserror::Error;

/// Errors raised while configuring an error model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Error rate outside the closed interval [0.0, 1.0], or NaN.
    #[error("error rate must be within [0.0, 1.0], got {rate}")]
    RateOutOfRange {
        /// The rejected rate
        rate: f64,
    },
}

/// Validate that `rate` is a probability.
///
/// NaN fails the range check and is rejected along with out-of-range values.
pub(crate) fn validate_rate(rate: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&rate) { Ok(rate) } else { Err(ConfigError::RateOutOfRange { rate }) }
}
