//! Property-based batching-equivalence tests.
//!
//! These compare the strip-mined public entry points against unbatched
//! scalar references over randomized buffers, lengths, and vector-unit
//! capacities, to protect the batch-size-independence guarantee through
//! future refactors.

#![allow(clippy::cast_precision_loss)]

use proptest::{
    collection::vec,
    prelude::{prop_assert, prop_assert_eq, prop_oneof, Just, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};
use stripmine_core::golden;
use stripmine_core::kernel::elementwise::{self, MaskPolicy};
use stripmine_core::kernel::reduce::{self, ReduceMode};
use stripmine_core::kernel::transcendental;
use stripmine_core::VectorUnit;

const PROP_CASES: u32 = 256;
const PROP_MAX_SHRINK_ITERS: u32 = 2048;

// Tolerance envelope for reassociated f32 math: absolute or relative,
// whichever is looser at the result's magnitude.
fn assert_close(label: &str, actual: f32, expected: f32) {
    let delta = (actual - expected).abs();
    let allowed = 1.0e-3_f32.max(2.0e-4 * expected.abs());
    assert!(
        delta <= allowed,
        "{label}: actual={actual}, expected={expected}, delta={delta}, allowed={allowed}"
    );
}

/// Lengths hugging the grant boundaries of every capacity under test.
fn boundary_len_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0_usize),
        Just(1_usize),
        Just(7_usize),
        Just(8_usize),
        Just(9_usize),
        Just(63_usize),
        Just(64_usize),
        Just(65_usize),
        Just(255_usize),
        Just(256_usize),
        Just(257_usize),
        0_usize..=1536,
    ]
}

fn vlen_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(8_usize), Just(16), Just(32), Just(64), Just(128), Just(256)]
}

fn unit(vlen: usize) -> VectorUnit {
    VectorUnit::with_vlen_bytes(vlen).expect("power-of-two capacity")
}

fn vector_pair_strategy() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    boundary_len_strategy().prop_flat_map(|len| {
        let a = vec(-100.0_f32..100.0_f32, len);
        let b = vec(-100.0_f32..100.0_f32, len);
        (a, b)
    })
}

fn prop_config() -> ProptestConfig {
    ProptestConfig {
        cases: PROP_CASES,
        max_shrink_iters: PROP_MAX_SHRINK_ITERS,
        // Integration tests have no nearby lib.rs, so pin an explicit
        // persistence root for reproducible counterexamples.
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "batching-property-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(prop_config())]

    #[test]
    fn add_is_batch_size_independent((a, b) in vector_pair_strategy(), vlen in vlen_strategy()) {
        let unit = unit(vlen);
        let mut got = vec![0.0_f32; a.len()];
        let mut want = vec![0.0_f32; a.len()];
        elementwise::add_f32(&unit, &a, &b, &mut got).expect("equal lengths");
        golden::add(&a, &b, &mut want);
        // Elementwise add never reassociates, so equality is exact.
        prop_assert_eq!(got, want);
    }

    #[test]
    fn ordered_dot_is_bit_identical_to_scalar((a, b) in vector_pair_strategy(), vlen in vlen_strategy()) {
        let unit = unit(vlen);
        let got = reduce::dot_f32(&unit, &a, &b, ReduceMode::Ordered).expect("equal lengths");
        let want = golden::dot(&a, &b);
        prop_assert!(got.to_bits() == want.to_bits(),
            "ordered dot diverged: got={got}, want={want}, vlen={vlen}");
    }

    #[test]
    fn unordered_dot_is_reassociation_stable((a, b) in vector_pair_strategy(), vlen in vlen_strategy()) {
        let unit = unit(vlen);
        let got = reduce::dot_f32(&unit, &a, &b, ReduceMode::Unordered).expect("equal lengths");
        assert_close("unordered dot", got, golden::dot(&a, &b));
    }

    #[test]
    fn ordered_sum_is_bit_identical_to_scalar(values in boundary_len_strategy()
        .prop_flat_map(|len| vec(-100.0_f32..100.0_f32, len)), vlen in vlen_strategy())
    {
        let unit = unit(vlen);
        let got = reduce::sum_f32(&unit, &values, ReduceMode::Ordered);
        let want = golden::sum(&values);
        prop_assert!(got.to_bits() == want.to_bits());
    }

    #[test]
    fn unordered_sum_is_reassociation_stable(values in boundary_len_strategy()
        .prop_flat_map(|len| vec(-100.0_f32..100.0_f32, len)), vlen in vlen_strategy())
    {
        let unit = unit(vlen);
        let got = reduce::sum_f32(&unit, &values, ReduceMode::Unordered);
        assert_close("unordered sum", got, golden::sum(&values));
    }

    #[test]
    fn max_is_batch_size_independent(values in boundary_len_strategy()
        .prop_flat_map(|len| vec(-1000.0_f32..1000.0_f32, len)), vlen in vlen_strategy())
    {
        let unit = unit(vlen);
        prop_assert_eq!(reduce::max(&unit, &values), golden::max(&values));
    }

    #[test]
    fn dropout_is_batch_size_independent(
        (values, keep) in boundary_len_strategy().prop_flat_map(|len| {
            (vec(-10.0_f32..10.0_f32, len), vec(proptest::bool::ANY, len))
        }),
        vlen in vlen_strategy())
    {
        let unit = unit(vlen);
        let mut got = vec![f32::NAN; values.len()];
        let mut want = vec![0.0_f32; values.len()];
        elementwise::masked_scale(&unit, &values, &keep, 1.5, MaskPolicy::ZeroFill, &mut got)
            .expect("equal lengths");
        golden::dropout(&values, &keep, 1.5, &mut want);
        prop_assert_eq!(got, want);
    }

    #[test]
    fn exp_buffer_is_batch_size_independent(values in boundary_len_strategy()
        .prop_flat_map(|len| vec(-80.0_f32..80.0_f32, len)), vlen in vlen_strategy())
    {
        let unit = unit(vlen);
        let mut got = vec![0.0_f32; values.len()];
        transcendental::exp_f32_buf(&unit, &values, &mut got).expect("equal lengths");
        // The per-element body is deterministic, so batching must be
        // invisible bit for bit.
        for (i, &x) in values.iter().enumerate() {
            prop_assert!(got[i].to_bits() == transcendental::exp_f32(x).to_bits(),
                "index {i}, x={x}");
        }
    }
}
