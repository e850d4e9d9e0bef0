//! Scalar fallback implementations for the f32 SIMD kernels.
//!
//! These functions serve as:
//! - fallback on platforms without SIMD support
//! - tail handlers for the remainder elements of the SIMD main loops
//! - reference implementations for the dispatch tests

/// Scalar dot product, left-to-right single accumulator.
#[inline]
pub(crate) fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Scalar elementwise add.
#[inline]
pub(crate) fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    for ((x, y), o) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
        *o = x + y;
    }
}

/// Scalar sum, left-to-right single accumulator.
#[inline]
pub(crate) fn sum_f32(values: &[f32]) -> f32 {
    values.iter().sum()
}
