//! Reduction kernels: dot product, sum, max.
//!
//! Every floating-point reduction takes an explicit [`ReduceMode`]. The
//! hardware the reference kernels target offers both an ordered reduction
//! (sequential, bit-reproducible) and an unordered one (tree-shaped, faster,
//! result depends on grant sizes); silently picking one is exactly the kind
//! of ambiguity this library exists to remove.

use half::f16;

use crate::driver;
use crate::error::Result;
use crate::simd;
use crate::unit::VectorUnit;
use crate::width::Element;

use super::Arith;

/// Combine order for floating-point reductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceMode {
    /// Strictly left-to-right, single accumulator. Bit-identical to an
    /// unbatched scalar pass for every grant sequence.
    Ordered,
    /// Per-batch tree combine (multi-accumulator SIMD where available).
    /// Equal to the scalar result only up to rounding re-association.
    Unordered,
}

/// Strip-mined dot product.
///
/// `Ordered` threads one accumulator through every element in order;
/// `Unordered` reduces each batch independently and adds the partials in
/// batch order.
pub fn dot<T: Arith>(unit: &VectorUnit, a: &[T], b: &[T], mode: ReduceMode) -> Result<T> {
    match mode {
        ReduceMode::Ordered => driver::reduce2(unit, a, b, T::default(), |acc, ca, cb| {
            ca.iter()
                .zip(cb.iter())
                .fold(acc, |acc, (x, y)| acc + *x * *y)
        }),
        ReduceMode::Unordered => driver::reduce2(unit, a, b, T::default(), |acc, ca, cb| {
            let partial = ca
                .iter()
                .zip(cb.iter())
                .map(|(x, y)| *x * *y)
                .fold(T::default(), |p, v| p + v);
            acc + partial
        }),
    }
}

/// f32 dot product; unordered batches go through the native SIMD dispatch.
pub fn dot_f32(unit: &VectorUnit, a: &[f32], b: &[f32], mode: ReduceMode) -> Result<f32> {
    match mode {
        ReduceMode::Ordered => dot(unit, a, b, mode),
        ReduceMode::Unordered => {
            driver::reduce2(unit, a, b, 0.0_f32, |acc, ca, cb| acc + simd::dot_f32(ca, cb))
        }
    }
}

/// f16 dot product, accumulated in f32 and rounded once at the end.
///
/// The 16-bit reference kernel accumulates in its element width and is
/// correspondingly loose (its own pass threshold is a full unit); widening
/// the accumulator keeps the result usable without changing the interface.
pub fn dot_f16(unit: &VectorUnit, a: &[f16], b: &[f16], mode: ReduceMode) -> Result<f16> {
    let acc = match mode {
        ReduceMode::Ordered => driver::reduce2(unit, a, b, 0.0_f32, |acc, ca, cb| {
            ca.iter()
                .zip(cb.iter())
                .fold(acc, |acc, (x, y)| acc + x.to_f32() * y.to_f32())
        })?,
        ReduceMode::Unordered => driver::reduce2(unit, a, b, 0.0_f32, |acc, ca, cb| {
            let partial: f32 = ca
                .iter()
                .zip(cb.iter())
                .map(|(x, y)| x.to_f32() * y.to_f32())
                .sum();
            acc + partial
        })?,
    };
    Ok(f16::from_f32(acc))
}

/// Strip-mined sum.
pub fn sum<T: Arith>(unit: &VectorUnit, src: &[T], mode: ReduceMode) -> T {
    match mode {
        ReduceMode::Ordered => driver::reduce(unit, src, T::default(), |acc, chunk| {
            chunk.iter().fold(acc, |acc, x| acc + *x)
        }),
        ReduceMode::Unordered => driver::reduce(unit, src, T::default(), |acc, chunk| {
            let partial = chunk.iter().fold(T::default(), |p, x| p + *x);
            acc + partial
        }),
    }
}

/// f32 sum; unordered batches go through the native SIMD dispatch.
#[must_use]
pub fn sum_f32(unit: &VectorUnit, src: &[f32], mode: ReduceMode) -> f32 {
    match mode {
        ReduceMode::Ordered => sum(unit, src, mode),
        ReduceMode::Unordered => {
            driver::reduce(unit, src, 0.0_f32, |acc, chunk| acc + simd::sum_f32(chunk))
        }
    }
}

/// Strip-mined running max. Commutative and associative, so no mode
/// parameter. Comparisons resolve toward the incumbent: a NaN candidate
/// never replaces the running max.
pub fn max<T: Element + PartialOrd>(unit: &VectorUnit, src: &[T]) -> Option<T> {
    driver::reduce(unit, src, None, |acc: Option<T>, chunk| {
        chunk.iter().fold(acc, |acc, x| match acc {
            None => Some(*x),
            Some(m) => {
                if *x > m {
                    Some(*x)
                } else {
                    Some(m)
                }
            }
        })
    })
}
