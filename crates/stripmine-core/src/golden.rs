//! Golden scalar references and the result comparator.
//!
//! Everything here is deliberately naive: ordinary scalar loops with no
//! batching, no dispatch, and no shared code with the strip-mined paths.
//! The references exist solely to validate the vectorized kernels, so they
//! must not inherit their structure. Transcendental references use `std`
//! math: the approximation kernels are checked against the real function
//! within a tolerance, not against another copy of the same polynomial.

use crate::kernel::Arith;
use crate::width::Element;

// =============================================================================
// Scalar references
// =============================================================================

/// Reference elementwise add.
pub fn add<T: Arith>(a: &[T], b: &[T], out: &mut [T]) {
    for i in 0..a.len().min(b.len()).min(out.len()) {
        out[i] = a[i] + b[i];
    }
}

/// Reference scale.
pub fn scale<T: Arith>(src: &[T], factor: T, out: &mut [T]) {
    for i in 0..src.len().min(out.len()) {
        out[i] = src[i] * factor;
    }
}

/// Reference axpy.
pub fn axpy<T: Arith>(alpha: T, x: &[T], y: &[T], out: &mut [T]) {
    for i in 0..x.len().min(y.len()).min(out.len()) {
        out[i] = alpha * x[i] + y[i];
    }
}

/// Reference dropout: kept elements scaled, dropped elements exactly zero.
pub fn dropout<T: Arith>(src: &[T], keep: &[bool], scale: T, out: &mut [T]) {
    for i in 0..src.len().min(keep.len()).min(out.len()) {
        out[i] = if keep[i] { src[i] * scale } else { T::default() };
    }
}

/// Reference dot product, strictly left to right.
#[must_use]
pub fn dot<T: Arith>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::default(), |acc, (x, y)| acc + *x * *y)
}

/// Reference sum, strictly left to right.
#[must_use]
pub fn sum<T: Arith>(src: &[T]) -> T {
    src.iter().fold(T::default(), |acc, x| acc + *x)
}

/// Reference max.
#[must_use]
pub fn max<T: Element + PartialOrd>(src: &[T]) -> Option<T> {
    src.iter().copied().fold(None, |acc, x| match acc {
        None => Some(x),
        Some(m) => {
            if x > m {
                Some(x)
            } else {
                Some(m)
            }
        }
    })
}

/// Reference exp (std math).
pub fn exp_f32(src: &[f32], out: &mut [f32]) {
    for (x, o) in src.iter().zip(out.iter_mut()) {
        *o = x.exp();
    }
}

/// Reference ln (std math). `std` returns NaN for negative inputs and
/// `-inf` for zero; the comparator treats any-NaN-vs-any-NaN as a match,
/// which is what the sentinel convention needs.
pub fn ln_f32(src: &[f32], out: &mut [f32]) {
    for (x, o) in src.iter().zip(out.iter_mut()) {
        *o = x.ln();
    }
}

/// Reference cos (std math).
pub fn cos_f32(src: &[f32], out: &mut [f32]) {
    for (x, o) in src.iter().zip(out.iter_mut()) {
        *o = x.cos();
    }
}

// =============================================================================
// Comparator
// =============================================================================

/// How two results are allowed to differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Bit-for-bit equality (integer kernels, ordered reductions).
    Exact,
    /// `|actual - expected| <= limit`. Blind to magnitude; kept because
    /// many validation thresholds are quoted as absolute values.
    Absolute(f64),
    /// `|actual - expected| <= limit * max(|expected|, 1)`, the better fit
    /// for results whose magnitude varies.
    Relative(f64),
}

impl Tolerance {
    fn accepts(self, actual: f64, expected: f64) -> bool {
        // Sentinel convention: a NaN answer checked against a NaN reference
        // is agreement, not a mismatch.
        if actual.is_nan() && expected.is_nan() {
            return true;
        }
        match self {
            Self::Exact => actual == expected || actual.to_bits() == expected.to_bits(),
            Self::Absolute(limit) => (actual - expected).abs() <= limit,
            Self::Relative(limit) => {
                (actual - expected).abs() <= limit * expected.abs().max(1.0)
            }
        }
    }
}

/// One disagreement between a kernel result and its golden reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    /// Element index.
    pub index: usize,
    /// What the kernel produced.
    pub actual: f64,
    /// What the reference produced.
    pub expected: f64,
}

/// Outcome of comparing a kernel result against its golden reference.
///
/// Every mismatch is collected; discovering all of them is worth more than
/// aborting at the first.
#[derive(Debug, Clone, Default)]
pub struct CompareReport {
    /// Elements compared.
    pub checked: usize,
    /// All disagreements, in index order.
    pub mismatches: Vec<Mismatch>,
}

impl CompareReport {
    /// True when no element disagreed.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compares two scalars under `tolerance`.
#[must_use]
pub fn compare_scalars<T: Element>(actual: T, expected: T, tolerance: Tolerance) -> bool {
    tolerance.accepts(actual.to_f64(), expected.to_f64())
}

/// Compares a kernel result slice against its golden reference slice.
///
/// A length difference is reported as mismatches at every index past the
/// shorter slice.
#[must_use]
pub fn compare_slices<T: Element>(actual: &[T], expected: &[T], tolerance: Tolerance) -> CompareReport {
    let len = actual.len().max(expected.len());
    let mut report = CompareReport {
        checked: len,
        mismatches: Vec::new(),
    };
    for index in 0..len {
        match (actual.get(index), expected.get(index)) {
            (Some(a), Some(e)) => {
                if !tolerance.accepts(a.to_f64(), e.to_f64()) {
                    report.mismatches.push(Mismatch {
                        index,
                        actual: a.to_f64(),
                        expected: e.to_f64(),
                    });
                }
            }
            (a, e) => {
                report.mismatches.push(Mismatch {
                    index,
                    actual: a.map_or(f64::NAN, |v| v.to_f64()),
                    expected: e.map_or(f64::NAN, |v| v.to_f64()),
                });
            }
        }
    }
    report
}
