//! Decision contract tests shared by every error model.
//!
//! The enable flag, reset, and the default factory behave the same whichever
//! model sits behind the contract.

use pkterr_core::{
    ErrorModel, ErrorModelConfig, ErrorUnit, ListErrorModel, ModelConfig, Packet, RateErrorModel,
    create_default,
};
use pkterr_harness::ScriptedUniform;

/// One instance of every model kind, all configured to corrupt uid 5.
#[allow(clippy::unwrap_used, reason = "Literal rates are in range")]
fn all_models() -> Vec<ErrorModel> {
    vec![
        ErrorModel::new(ListErrorModel::with_targets([5])).boxed(),
        ErrorModel::new(RateErrorModel::new(ErrorUnit::Packet, 1.0).unwrap()).boxed(),
        ErrorModel::new(RateErrorModel::new(ErrorUnit::Byte, 1.0).unwrap()).boxed(),
        ErrorModel::new(RateErrorModel::new(ErrorUnit::Bit, 1.0).unwrap()).boxed(),
    ]
}

#[test]
fn every_model_corrupts_target_while_enabled() {
    for mut model in all_models() {
        assert!(model.is_corrupt(&Packet::zeroed(5, 64)), "{model:?}");
    }
}

#[test]
fn disabled_models_never_corrupt() {
    for mut model in all_models() {
        model.disable();
        for uid in 0..100 {
            assert!(!model.is_corrupt(&Packet::zeroed(uid, 64)), "{model:?} uid {uid}");
        }
        assert!(!model.is_corrupt(&Packet::zeroed(5, 64)));
    }
}

#[test]
fn re_enabling_restores_verdicts() {
    for mut model in all_models() {
        model.disable();
        model.enable();
        assert!(model.is_corrupt(&Packet::zeroed(5, 64)));
    }
}

#[test]
fn disabled_rate_model_consumes_no_randomness() {
    let (source, draws) = ScriptedUniform::constant(0.0).into_shared();
    let rate = RateErrorModel::with_source(ErrorUnit::Bit, 0.5, source).unwrap();
    let mut model = ErrorModel::new(rate);
    model.disable();

    for uid in 0..50 {
        model.is_corrupt(&Packet::zeroed(uid, 1500));
    }
    assert_eq!(draws.get(), 0);

    model.enable();
    assert!(model.is_corrupt(&Packet::zeroed(50, 1500)));
    assert_eq!(draws.get(), 1);
}

#[test]
fn reset_never_touches_enable_flag() {
    for mut model in all_models() {
        model.reset();
        assert!(model.is_enabled());

        model.disable();
        model.reset();
        assert!(!model.is_enabled());
    }
}

#[test]
fn reset_keeps_rate_configuration() {
    let mut model = ErrorModel::new(RateErrorModel::new(ErrorUnit::Packet, 1.0).unwrap());
    model.reset();

    assert_eq!(model.model().unit(), ErrorUnit::Packet);
    assert!(model.is_corrupt(&Packet::zeroed(1, 1)));
}

#[test]
fn default_factory_is_ready_to_use() {
    let mut model = create_default();
    assert!(model.is_enabled());
    for uid in 0..10_000 {
        assert!(!model.is_corrupt(&Packet::zeroed(uid, (uid % 1500) as usize)));
    }

    let mut from_trait: ErrorModel = ErrorModel::default();
    assert!(!from_trait.is_corrupt(&Packet::zeroed(0, 1500)));
}

#[test]
fn default_config_matches_default_factory() {
    let config = ErrorModelConfig::default();
    assert!(config.enabled);
    assert_eq!(config.model, ModelConfig::Rate { unit: ErrorUnit::Byte, rate: 0.0, seed: None });
}

#[test]
fn typed_access_survives_wrapping() {
    let mut model = ErrorModel::new(ListErrorModel::new());
    model.model_mut().set_list([1, 2]);
    assert_eq!(model.model().len(), 2);

    let list = model.into_inner();
    assert!(list.contains(1));
}
