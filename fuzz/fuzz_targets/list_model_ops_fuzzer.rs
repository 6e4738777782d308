//! Fuzz target for the list error model against its reference
//!
//! Applies arbitrary operation sequences to both `ErrorModel<ListErrorModel>`
//! and `ReferenceListModel`.
//!
//! # Invariants
//!
//! - Every observation matches the reference
//! - A disabled model never reports corruption
//! - Reset never changes the enable flag

#![no_main]

use libfuzzer_sys::fuzz_target;
use pkterr_core::{ErrorModel, ListErrorModel};
use pkterr_harness::{ListOperation, Observation, ReferenceListModel};

fuzz_target!(|ops: Vec<ListOperation>| {
    let mut reference = ReferenceListModel::new();
    let mut real = ErrorModel::new(ListErrorModel::new());

    for (i, op) in ops.iter().enumerate() {
        let enabled_before = real.is_enabled();
        let expected = reference.apply(op);
        let actual = op.apply_to(&mut real);

        assert_eq!(expected, actual, "divergence at operation {i}: {op:?}");

        if !real.is_enabled() {
            if let Observation::Verdict(corrupt) = actual {
                assert!(!corrupt, "disabled model corrupted at operation {i}");
            }
        }
        if matches!(op, ListOperation::Reset) {
            assert_eq!(real.is_enabled(), enabled_before, "reset changed enable flag");
        }
    }
});
