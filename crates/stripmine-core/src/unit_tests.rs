//! Tests for the batch-size negotiator (separate file per project rules).

use crate::error::KernelError;
use crate::unit::{VectorUnit, DEFAULT_GROUP};
use crate::width::ElementWidth;

#[test]
fn zero_remaining_is_the_termination_sentinel() {
    let unit = VectorUnit::with_vlen_bytes(32).unwrap();
    for width in [
        ElementWidth::I8,
        ElementWidth::I16,
        ElementWidth::I32,
        ElementWidth::I64,
        ElementWidth::F16,
        ElementWidth::F32,
        ElementWidth::F64,
    ] {
        assert_eq!(unit.next_batch(0, width), 0);
    }
}

#[test]
fn grant_is_positive_and_bounded() {
    let unit = VectorUnit::with_vlen_bytes(32).unwrap();
    let max = unit.max_batch(ElementWidth::F32);
    for remaining in [1, 2, max - 1, max, max + 1, 10 * max + 3] {
        let grant = unit.next_batch(remaining, ElementWidth::F32);
        assert!(grant > 0);
        assert!(grant <= remaining);
        assert!(grant <= max);
    }
}

#[test]
fn doubling_width_halves_the_grant() {
    let unit = VectorUnit::with_vlen_bytes(64).unwrap();
    let huge = usize::MAX / 2;
    let b8 = unit.next_batch(huge, ElementWidth::I8);
    let b16 = unit.next_batch(huge, ElementWidth::I16);
    let b32 = unit.next_batch(huge, ElementWidth::I32);
    let b64 = unit.next_batch(huge, ElementWidth::I64);
    assert_eq!(b8, 2 * b16);
    assert_eq!(b16, 2 * b32);
    assert_eq!(b32, 2 * b64);
    assert_eq!(b64, 64 * DEFAULT_GROUP / 8);
}

#[test]
fn float_and_int_widths_agree() {
    let unit = VectorUnit::with_vlen_bytes(16).unwrap();
    assert_eq!(
        unit.max_batch(ElementWidth::F32),
        unit.max_batch(ElementWidth::I32)
    );
    assert_eq!(
        unit.max_batch(ElementWidth::F64),
        unit.max_batch(ElementWidth::I64)
    );
}

#[test]
fn rejects_unusable_capacities() {
    for bad in [0, 1, 4, 12, 24, 33] {
        match VectorUnit::with_vlen_bytes(bad) {
            Err(KernelError::InvalidVlen(v)) => assert_eq!(v, bad),
            other => panic!("expected InvalidVlen for {bad}, got {other:?}"),
        }
    }
}

#[test]
fn detect_reports_a_usable_unit() {
    let unit = VectorUnit::detect();
    assert!(unit.vlen_bytes() >= 8);
    assert!(unit.max_batch(ElementWidth::F64) >= 1);
}

#[test]
fn group_scales_capacity() {
    let base = VectorUnit::with_vlen_bytes(16).unwrap().with_group(1).unwrap();
    let ganged = VectorUnit::with_vlen_bytes(16).unwrap().with_group(4).unwrap();
    assert_eq!(
        ganged.max_batch(ElementWidth::F32),
        4 * base.max_batch(ElementWidth::F32)
    );
    assert!(VectorUnit::with_vlen_bytes(16).unwrap().with_group(0).is_err());
}
