//! Tests for the comparator (separate file per project rules).

use crate::golden::{compare_scalars, compare_slices, Tolerance};

#[test]
fn exact_mode_is_bitwise() {
    assert!(compare_scalars(42_i32, 42, Tolerance::Exact));
    assert!(!compare_scalars(42_i32, 43, Tolerance::Exact));
    assert!(compare_scalars(1.5_f32, 1.5, Tolerance::Exact));
    assert!(!compare_scalars(1.5_f32, 1.5 + f32::EPSILON, Tolerance::Exact));
}

#[test]
fn nan_against_nan_is_agreement() {
    // The sentinel convention: a NaN answer checked against a NaN reference
    // matches in every mode.
    for tolerance in [Tolerance::Exact, Tolerance::Absolute(0.0), Tolerance::Relative(0.0)] {
        assert!(compare_scalars(f32::NAN, f32::NAN, tolerance));
    }
    assert!(!compare_scalars(f32::NAN, 0.0, Tolerance::Absolute(1.0)));
    assert!(!compare_scalars(0.0, f32::NAN, Tolerance::Absolute(1.0)));
}

#[test]
fn absolute_mode_ignores_magnitude() {
    assert!(compare_scalars(100.0_f64, 100.4, Tolerance::Absolute(0.5)));
    assert!(!compare_scalars(100.0_f64, 100.6, Tolerance::Absolute(0.5)));
    // The known weakness of absolute mode: a huge result fails a check
    // its precision cannot honor. Documented behavior.
    assert!(!compare_scalars(1e9_f32, 1e9 + 128.0, Tolerance::Absolute(1.0)));
}

#[test]
fn relative_mode_scales_with_the_expected_value() {
    assert!(compare_scalars(1e9_f32, 1e9 + 128.0, Tolerance::Relative(1e-6)));
    assert!(!compare_scalars(1.0_f32, 1.1, Tolerance::Relative(1e-6)));
    // Near zero the envelope floors at 1.0, so tiny absolute noise passes.
    assert!(compare_scalars(0.0_f64, 1e-9, Tolerance::Relative(1e-6)));
}

#[test]
fn report_lists_every_mismatch_with_both_values() {
    let actual = [1.0_f32, 2.0, 99.0, 4.0, -5.0];
    let expected = [1.0_f32, 2.0, 3.0, 4.0, 5.0];
    let report = compare_slices(&actual, &expected, Tolerance::Absolute(1e-6));
    assert!(!report.is_match());
    assert_eq!(report.checked, 5);
    assert_eq!(report.mismatches.len(), 2);

    assert_eq!(report.mismatches[0].index, 2);
    assert!((report.mismatches[0].actual - 99.0).abs() < 1e-12);
    assert!((report.mismatches[0].expected - 3.0).abs() < 1e-12);
    assert_eq!(report.mismatches[1].index, 4);
}

#[test]
fn length_difference_counts_as_mismatches() {
    let actual = [1_i32, 2, 3];
    let expected = [1_i32, 2];
    let report = compare_slices(&actual, &expected, Tolerance::Exact);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].index, 2);
}

#[test]
fn matching_slices_produce_an_empty_report() {
    let values = [0.5_f64, 1.5, -2.5];
    let report = compare_slices(&values, &values, Tolerance::Exact);
    assert!(report.is_match());
    assert_eq!(report.checked, 3);
}
