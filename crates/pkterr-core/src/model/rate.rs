//! Rate-based error model.
//!
//! Each packet is split into error units (bits, bytes, or the whole packet)
//! and every unit is an independent Bernoulli trial that fails with the
//! configured rate. The packet is corrupt iff at least one trial fails.
//!
//! # Draw Policy
//!
//! Trials are drawn one uniform variate at a time and stop at the first
//! failure. The verdict has the same distribution as drawing every trial
//! (`1 - (1 - rate)^n`), but the number of draws consumed is
//! `min(first failure + 1, n)`. A seeded source therefore replays identical
//! verdicts and identical draw counts for identical packet sequences.
//!
//! A trial fails iff the draw `u` satisfies `u <= rate`. A rate of zero draws
//! nothing and never corrupts.

use serde::{Deserialize, Serialize};

use super::CorruptionModel;
use crate::{
    error::{ConfigError, validate_rate},
    packet::PacketView,
    random::SharedSource,
};

/// Granularity at which independent error trials are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorUnit {
    /// One trial per bit.
    Bit,
    /// One trial per byte.
    #[default]
    Byte,
    /// One trial for the whole packet.
    Packet,
}

/// Corrupts packets according to a per-unit error rate.
///
/// Stateless beyond its configuration, so [`reset`](CorruptionModel::reset)
/// does nothing.
#[derive(Debug, Clone)]
pub struct RateErrorModel {
    unit: ErrorUnit,
    rate: f64,
    source: SharedSource,
}

impl RateErrorModel {
    /// Create a model drawing from its own default-seeded source.
    pub fn new(unit: ErrorUnit, rate: f64) -> Result<Self, ConfigError> {
        Self::with_source(unit, rate, SharedSource::default())
    }

    /// Create a model drawing from `source`.
    pub fn with_source(
        unit: ErrorUnit,
        rate: f64,
        source: SharedSource,
    ) -> Result<Self, ConfigError> {
        let rate = validate_rate(rate)?;
        Ok(Self { unit, rate, source })
    }

    /// Error unit in use.
    pub fn unit(&self) -> ErrorUnit {
        self.unit
    }

    /// Set the error unit.
    pub fn set_unit(&mut self, unit: ErrorUnit) {
        tracing::debug!(?unit, "error unit changed");
        self.unit = unit;
    }

    /// Per-unit error rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Set the per-unit error rate.
    ///
    /// Rates outside [0.0, 1.0] (and NaN) are rejected and the previous rate
    /// is kept.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), ConfigError> {
        self.rate = validate_rate(rate).inspect_err(|e| {
            tracing::warn!(rate, error = %e, "rejected error rate");
        })?;
        tracing::debug!(rate, "error rate changed");
        Ok(())
    }

    /// Replace the uniform source.
    pub fn set_random_source(&mut self, source: SharedSource) {
        self.source = source;
    }

    /// Uniform source this model draws from.
    pub fn random_source(&self) -> &SharedSource {
        &self.source
    }

    /// Run up to `trials` Bernoulli trials, stopping at the first failure.
    fn any_unit_fails(&self, trials: u64) -> bool {
        if self.rate <= 0.0 {
            return false;
        }
        (0..trials).any(|_| self.source.draw() <= self.rate)
    }
}

impl Default for RateErrorModel {
    fn default() -> Self {
        Self { unit: ErrorUnit::default(), rate: 0.0, source: SharedSource::default() }
    }
}

impl CorruptionModel for RateErrorModel {
    fn corrupts(&mut self, packet: &dyn PacketView) -> bool {
        match self.unit {
            ErrorUnit::Packet => self.any_unit_fails(1),
            ErrorUnit::Byte => self.any_unit_fails(packet.byte_len() as u64),
            ErrorUnit::Bit => self.any_unit_fails(packet.bit_len()),
        }
    }

    fn reset(&mut self) {}

    fn kind(&self) -> &'static str {
        "rate"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{
        packet::{Packet, PacketUid},
        random::UniformSource,
    };

    /// Cycles through fixed values and counts draws.
    struct Fixed {
        values: Vec<f64>,
        draws: Arc<AtomicUsize>,
    }

    impl UniformSource for Fixed {
        fn next_uniform(&mut self) -> f64 {
            let i = self.draws.fetch_add(1, Ordering::Relaxed);
            self.values[i % self.values.len()]
        }
    }

    fn fixed(values: &[f64]) -> (SharedSource, Arc<AtomicUsize>) {
        let draws = Arc::new(AtomicUsize::new(0));
        let source = Fixed { values: values.to_vec(), draws: Arc::clone(&draws) };
        (SharedSource::new(source), draws)
    }

    #[test]
    fn default_is_byte_unit_zero_rate() {
        let model = RateErrorModel::default();
        assert_eq!(model.unit(), ErrorUnit::Byte);
        assert!(model.rate() <= 0.0);
    }

    #[test]
    fn packet_unit_draws_once() {
        let (source, draws) = fixed(&[0.3]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Packet, 0.5, source).unwrap();

        assert!(model.corrupts(&Packet::zeroed(1, 1500)));
        assert_eq!(draws.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn trial_fails_at_exact_rate() {
        let (source, _) = fixed(&[0.25]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Packet, 0.25, source).unwrap();
        assert!(model.corrupts(&Packet::zeroed(1, 1)));
    }

    #[test]
    fn byte_unit_stops_at_first_failure() {
        let (source, draws) = fixed(&[0.9, 0.9, 0.1, 0.9, 0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Byte, 0.5, source).unwrap();

        assert!(model.corrupts(&Packet::zeroed(1, 5)));
        assert_eq!(draws.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn byte_unit_draws_every_byte_when_clean() {
        let (source, draws) = fixed(&[0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Byte, 0.5, source).unwrap();

        assert!(!model.corrupts(&Packet::zeroed(1, 5)));
        assert_eq!(draws.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn bit_unit_draws_eight_per_byte() {
        let (source, draws) = fixed(&[0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Bit, 0.5, source).unwrap();

        assert!(!model.corrupts(&Packet::zeroed(1, 2)));
        assert_eq!(draws.load(Ordering::Relaxed), 16);
    }

    /// Frame whose last byte is only partly on the wire.
    struct PartialFrame;

    impl PacketView for PartialFrame {
        fn uid(&self) -> PacketUid {
            3
        }

        fn byte_len(&self) -> usize {
            2
        }

        fn bit_len(&self) -> u64 {
            13
        }
    }

    #[test]
    fn bit_unit_uses_reported_bit_len() {
        let (source, draws) = fixed(&[0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Bit, 0.5, source).unwrap();

        assert!(!model.corrupts(&PartialFrame));
        assert_eq!(draws.load(Ordering::Relaxed), 13);
    }

    #[test]
    fn byte_unit_ignores_reported_bit_len() {
        let (source, draws) = fixed(&[0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Byte, 0.5, source).unwrap();

        assert!(!model.corrupts(&PartialFrame));
        assert_eq!(draws.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn zero_rate_draws_nothing() {
        let (source, draws) = fixed(&[0.0]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Bit, 0.0, source).unwrap();

        assert!(!model.corrupts(&Packet::zeroed(1, 1500)));
        assert_eq!(draws.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn empty_packet_has_no_trials() {
        let (source, draws) = fixed(&[0.0]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Byte, 1.0, source).unwrap();

        assert!(!model.corrupts(&Packet::zeroed(1, 0)));
        assert_eq!(draws.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn rejected_rate_keeps_previous() {
        let mut model = RateErrorModel::new(ErrorUnit::Packet, 0.1).unwrap();
        assert_eq!(model.set_rate(1.01), Err(ConfigError::RateOutOfRange { rate: 1.01 }));
        assert!((model.rate() - 0.1).abs() < f64::EPSILON);

        model.set_rate(0.75).unwrap();
        assert!((model.rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn constructor_rejects_invalid_rate() {
        assert!(RateErrorModel::new(ErrorUnit::Byte, -0.5).is_err());
        assert!(RateErrorModel::new(ErrorUnit::Byte, f64::NAN).is_err());
    }

    #[test]
    fn reset_keeps_configuration() {
        let source = SharedSource::seeded(3);
        let mut model =
            RateErrorModel::with_source(ErrorUnit::Bit, 0.2, source.clone()).unwrap();
        model.reset();

        assert_eq!(model.unit(), ErrorUnit::Bit);
        assert!((model.rate() - 0.2).abs() < f64::EPSILON);
        assert!(model.random_source().ptr_eq(&source));
    }

    #[test]
    fn replacing_source_redirects_draws() {
        let (first, first_draws) = fixed(&[0.9]);
        let (second, second_draws) = fixed(&[0.9]);
        let mut model = RateErrorModel::with_source(ErrorUnit::Packet, 0.5, first).unwrap();

        model.corrupts(&Packet::zeroed(1, 1));
        model.set_random_source(second);
        model.corrupts(&Packet::zeroed(2, 1));

        assert_eq!(first_draws.load(Ordering::Relaxed), 1);
        assert_eq!(second_draws.load(Ordering::Relaxed), 1);
    }
}
