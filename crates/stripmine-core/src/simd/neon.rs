//! ARM NEON kernel implementations for aarch64.
//!
//! NEON is always available on aarch64, so no runtime detection is needed;
//! the dispatch layer still owns the routing decisions.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::similar_names)]

use super::scalar;

/// NEON dot product, two 4-lane FMA accumulators (8 elements per step).
#[inline]
pub(crate) fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::aarch64::*;

    let len = a.len();
    let main = len / 8;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    // SAFETY: NEON register initialization is always available on aarch64.
    let mut acc0 = unsafe { vdupq_n_f32(0.0) };
    let mut acc1 = unsafe { vdupq_n_f32(0.0) };

    for i in 0..main {
        let offset = i * 8;
        // SAFETY: offset + 8 <= len; `vld1q_f32` handles unaligned loads.
        unsafe {
            let va0 = vld1q_f32(a_ptr.add(offset));
            let vb0 = vld1q_f32(b_ptr.add(offset));
            acc0 = vfmaq_f32(acc0, va0, vb0);

            let va1 = vld1q_f32(a_ptr.add(offset + 4));
            let vb1 = vld1q_f32(b_ptr.add(offset + 4));
            acc1 = vfmaq_f32(acc1, va1, vb1);
        }
    }

    // SAFETY: Horizontal reduction of register values only.
    let result = unsafe { vaddvq_f32(vaddq_f32(acc0, acc1)) };

    let base = main * 8;
    result + scalar::dot_f32(&a[base..], &b[base..])
}

/// NEON elementwise add, 4 lanes per step.
#[inline]
pub(crate) fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    use std::arch::aarch64::*;

    let len = a.len();
    let main = len / 4;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();
    let o_ptr = out.as_mut_ptr();

    for i in 0..main {
        let offset = i * 4;
        // SAFETY: offset + 4 <= len for loads and store; unaligned-tolerant.
        unsafe {
            let va = vld1q_f32(a_ptr.add(offset));
            let vb = vld1q_f32(b_ptr.add(offset));
            vst1q_f32(o_ptr.add(offset), vaddq_f32(va, vb));
        }
    }

    let base = main * 4;
    scalar::add_f32(&a[base..], &b[base..], &mut out[base..]);
}

/// NEON sum, two 4-lane accumulators.
#[inline]
pub(crate) fn sum_f32(values: &[f32]) -> f32 {
    use std::arch::aarch64::*;

    let len = values.len();
    let main = len / 8;

    let ptr = values.as_ptr();

    // SAFETY: NEON register initialization is always available on aarch64.
    let mut acc0 = unsafe { vdupq_n_f32(0.0) };
    let mut acc1 = unsafe { vdupq_n_f32(0.0) };

    for i in 0..main {
        let offset = i * 8;
        // SAFETY: offset + 8 <= len; `vld1q_f32` handles unaligned loads.
        unsafe {
            acc0 = vaddq_f32(acc0, vld1q_f32(ptr.add(offset)));
            acc1 = vaddq_f32(acc1, vld1q_f32(ptr.add(offset + 4)));
        }
    }

    // SAFETY: Horizontal reduction of register values only.
    let result = unsafe { vaddvq_f32(vaddq_f32(acc0, acc1)) };

    result + scalar::sum_f32(&values[main * 8..])
}
