//! Assembly-time configuration for error models.
//!
//! Hosts describe an error model as data (for example in a scenario file) and
//! build it once. Validation happens here, so a malformed rate fails at
//! assembly time instead of silently skewing corruption statistics later.
//!
//! ```
//! use pkterr_core::ErrorModelConfig;
//!
//! let config: ErrorModelConfig =
//!     serde_json::from_str(r#"{ "model": { "kind": "list", "targets": [11, 17] } }"#)?;
//! let model = config.build()?;
//! assert!(model.is_enabled());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    model::{ErrorModel, ErrorUnit, ListErrorModel, RateErrorModel},
    packet::PacketUid,
    random::SharedSource,
};

/// Description of an error model plus its initial enable state.
///
/// Unknown keys are rejected, so a misspelled field fails at parse time
/// instead of silently falling back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorModelConfig {
    /// Whether the built model starts enabled.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    /// Which model to build.
    pub model: ModelConfig,
}

/// Model-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum ModelConfig {
    /// A [`RateErrorModel`].
    Rate {
        /// Trial granularity.
        #[serde(default)]
        unit: ErrorUnit,
        /// Per-unit error rate in [0.0, 1.0].
        rate: f64,
        /// Seed for the model's own source. Without one the model gets a
        /// fresh stream of [`DEFAULT_SEED`](crate::DEFAULT_SEED).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },

    /// A [`ListErrorModel`].
    List {
        /// Uids to corrupt.
        #[serde(default)]
        targets: Vec<PacketUid>,
    },
}

fn enabled_by_default() -> bool {
    true
}

impl Default for ErrorModelConfig {
    /// Describes the model returned by [`create_default`](crate::create_default).
    fn default() -> Self {
        Self {
            enabled: true,
            model: ModelConfig::Rate { unit: ErrorUnit::default(), rate: 0.0, seed: None },
        }
    }
}

impl ErrorModelConfig {
    /// Build the model. Rate models get their own source.
    pub fn build(&self) -> Result<ErrorModel, ConfigError> {
        let source = match self.model {
            ModelConfig::Rate { seed: Some(seed), .. } => SharedSource::seeded(seed),
            _ => SharedSource::default(),
        };
        self.build_with_source(source)
    }

    /// Build the model drawing from a shared `source`.
    ///
    /// Any configured seed is ignored. List models ignore the source.
    pub fn build_with_source(&self, source: SharedSource) -> Result<ErrorModel, ConfigError> {
        let mut model = match &self.model {
            ModelConfig::Rate { unit, rate, .. } => {
                ErrorModel::new(RateErrorModel::with_source(*unit, *rate, source)?).boxed()
            },
            ModelConfig::List { targets } => {
                ErrorModel::new(ListErrorModel::with_targets(targets.iter().copied())).boxed()
            },
        };

        if !self.enabled {
            model.disable();
        }
        tracing::debug!(config = ?self, "error model built");
        Ok(model)
    }
}
