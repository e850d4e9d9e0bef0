//! Elementwise transform kernels: add, scale, axpy, masked select.

use crate::driver::{self, batches};
use crate::error::{KernelError, Result};
use crate::simd;
use crate::unit::VectorUnit;

use super::Arith;

/// What a masked-select kernel writes at mask-false positions.
///
/// The reference dropout kernel clears its destination register before the
/// masked multiply, so dropped elements read as exact zero; the alternative
/// leaves the destination byte-for-byte as it was (the tail-undisturbed
/// register policy). The two disagree observably, so the choice is an
/// explicit parameter, never a default buried in the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskPolicy {
    /// Mask-false outputs become exactly zero.
    #[default]
    ZeroFill,
    /// Mask-false outputs keep whatever the output buffer already held.
    Undisturbed,
}

/// Strip-mined elementwise add: `out[i] = a[i] + b[i]`.
pub fn add<T: Arith>(unit: &VectorUnit, a: &[T], b: &[T], out: &mut [T]) -> Result<()> {
    driver::zip_map(unit, a, b, out, |a, b, out| {
        for ((x, y), o) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *o = *x + *y;
        }
    })
}

/// Strip-mined f32 add routed through the native SIMD dispatch per batch.
pub fn add_f32(unit: &VectorUnit, a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    driver::zip_map(unit, a, b, out, simd::add_f32)
}

/// Strip-mined scale: `out[i] = src[i] * factor`.
pub fn scale<T: Arith>(unit: &VectorUnit, src: &[T], factor: T, out: &mut [T]) -> Result<()> {
    driver::map(unit, src, out, |src, out| {
        for (x, o) in src.iter().zip(out.iter_mut()) {
            *o = *x * factor;
        }
    })
}

/// Strip-mined axpy: `out[i] = alpha * x[i] + y[i]`.
pub fn axpy<T: Arith>(
    unit: &VectorUnit,
    alpha: T,
    x: &[T],
    y: &[T],
    out: &mut [T],
) -> Result<()> {
    driver::zip_map(unit, x, y, out, |x, y, out| {
        for ((xv, yv), o) in x.iter().zip(y.iter()).zip(out.iter_mut()) {
            *o = alpha * *xv + *yv;
        }
    })
}

/// Strip-mined masked scale: `out[i] = src[i] * factor` where `keep[i]`,
/// with mask-false positions handled per `policy`.
pub fn masked_scale<T: Arith>(
    unit: &VectorUnit,
    src: &[T],
    keep: &[bool],
    factor: T,
    policy: MaskPolicy,
    out: &mut [T],
) -> Result<()> {
    if src.len() != keep.len() {
        return Err(KernelError::LengthMismatch {
            left: src.len(),
            right: keep.len(),
        });
    }
    if src.len() != out.len() {
        return Err(KernelError::LengthMismatch {
            left: src.len(),
            right: out.len(),
        });
    }
    for batch in batches(unit, T::WIDTH, src.len()) {
        let end = batch.offset + batch.len;
        let (src, keep, out) = (
            &src[batch.offset..end],
            &keep[batch.offset..end],
            &mut out[batch.offset..end],
        );
        for ((x, &k), o) in src.iter().zip(keep.iter()).zip(out.iter_mut()) {
            if k {
                *o = *x * factor;
            } else if policy == MaskPolicy::ZeroFill {
                *o = T::default();
            }
        }
    }
    Ok(())
}

/// Dropout: masked scale with the zero-fill policy of the reference kernel.
pub fn dropout<T: Arith>(
    unit: &VectorUnit,
    src: &[T],
    keep: &[bool],
    scale: T,
    out: &mut [T],
) -> Result<()> {
    masked_scale(unit, src, keep, scale, MaskPolicy::ZeroFill, out)
}
