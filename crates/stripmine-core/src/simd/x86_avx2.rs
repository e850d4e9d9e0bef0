//! AVX2+FMA kernel implementations for x86_64.
//!
//! All functions here require runtime AVX2+FMA detection before calling;
//! the dispatch layer is the only caller.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::similar_names)]

use std::arch::x86_64::*;

use super::scalar;

/// Horizontal sum of one 256-bit accumulator.
///
/// # Safety
///
/// Caller must ensure the CPU supports AVX2 (checked at dispatch).
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn hsum256(v: __m256) -> f32 {
    // SAFETY: Pure register arithmetic, no memory access.
    let hi = _mm256_extractf128_ps(v, 1);
    let lo = _mm256_castps256_ps128(v);
    let quad = _mm_add_ps(lo, hi);
    let pair = _mm_add_ps(quad, _mm_movehdup_ps(quad));
    _mm_cvtss_f32(_mm_add_ss(pair, _mm_movehl_ps(pair, pair)))
}

/// AVX2 dot product, two 8-lane FMA accumulators (16 elements per step).
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2+FMA (enforced by `#[target_feature]` and runtime
///   detection at the dispatch site)
/// - `a.len() == b.len()` (enforced by the dispatch entry point)
#[target_feature(enable = "avx2", enable = "fma")]
#[inline]
pub(crate) unsafe fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: offset = i * 16 with i < len / 16, so every 8-lane load stays
    // in bounds; `_mm256_loadu_ps` permits unaligned access.
    let len = a.len();
    let main = len / 16;

    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    for i in 0..main {
        let offset = i * 16;

        let va0 = _mm256_loadu_ps(a_ptr.add(offset));
        let vb0 = _mm256_loadu_ps(b_ptr.add(offset));
        acc0 = _mm256_fmadd_ps(va0, vb0, acc0);

        let va1 = _mm256_loadu_ps(a_ptr.add(offset + 8));
        let vb1 = _mm256_loadu_ps(b_ptr.add(offset + 8));
        acc1 = _mm256_fmadd_ps(va1, vb1, acc1);
    }

    let mut result = hsum256(_mm256_add_ps(acc0, acc1));

    // 8-lane cleanup, then scalar tail (at most 7 elements).
    let mut base = main * 16;
    if len - base >= 8 {
        let va = _mm256_loadu_ps(a_ptr.add(base));
        let vb = _mm256_loadu_ps(b_ptr.add(base));
        result += hsum256(_mm256_mul_ps(va, vb));
        base += 8;
    }
    result + scalar::dot_f32(&a[base..], &b[base..])
}

/// AVX2 elementwise add, 8 lanes per step.
///
/// # Safety
///
/// Same contract as [`dot_f32`]; additionally `out.len() == a.len()`.
#[target_feature(enable = "avx2")]
#[inline]
pub(crate) unsafe fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    // SAFETY: offset = i * 8 with i < len / 8; loads and the store are
    // unaligned-tolerant intrinsics within slice bounds.
    let len = a.len();
    let main = len / 8;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();
    let o_ptr = out.as_mut_ptr();

    for i in 0..main {
        let offset = i * 8;
        let va = _mm256_loadu_ps(a_ptr.add(offset));
        let vb = _mm256_loadu_ps(b_ptr.add(offset));
        _mm256_storeu_ps(o_ptr.add(offset), _mm256_add_ps(va, vb));
    }

    let base = main * 8;
    scalar::add_f32(&a[base..], &b[base..], &mut out[base..]);
}

/// AVX2 sum, two 8-lane accumulators.
///
/// # Safety
///
/// Caller must ensure the CPU supports AVX2 (checked at dispatch).
#[target_feature(enable = "avx2")]
#[inline]
pub(crate) unsafe fn sum_f32(values: &[f32]) -> f32 {
    // SAFETY: offset = i * 16 with i < len / 16 keeps all loads in bounds.
    let len = values.len();
    let main = len / 16;

    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();

    let ptr = values.as_ptr();
    for i in 0..main {
        let offset = i * 16;
        acc0 = _mm256_add_ps(acc0, _mm256_loadu_ps(ptr.add(offset)));
        acc1 = _mm256_add_ps(acc1, _mm256_loadu_ps(ptr.add(offset + 8)));
    }

    let result = hsum256(_mm256_add_ps(acc0, acc1));
    result + scalar::sum_f32(&values[main * 16..])
}
