//! Strip-mining drivers.
//!
//! A driver decomposes one long buffer operation into a sequence of bounded
//! grants negotiated with a [`VectorUnit`], invoking an elementwise kernel
//! over each grant and advancing every cursor in lockstep. The loop is a
//! two-state machine: RUNNING while elements remain, DONE once the
//! negotiator returns the zero sentinel. It never blocks, never retries,
//! and completes in `ceil(total / max_batch)` steps.

use tracing::trace;

use crate::error::{KernelError, Result};
use crate::unit::VectorUnit;
use crate::width::{Element, ElementWidth};

/// One negotiated strip-mine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Element offset of this batch in every participating buffer.
    pub offset: usize,
    /// Granted element count.
    pub len: usize,
}

/// Iterator over the grant sequence for `total` elements of `width`.
///
/// Yields nothing for a zero-length invocation.
#[derive(Debug, Clone)]
pub struct Batches {
    unit: VectorUnit,
    width: ElementWidth,
    offset: usize,
    remaining: usize,
}

impl Iterator for Batches {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        let grant = self.unit.next_batch(self.remaining, self.width);
        if grant == 0 {
            return None;
        }
        let batch = Batch {
            offset: self.offset,
            len: grant,
        };
        self.offset += grant;
        self.remaining -= grant;
        trace!(
            offset = batch.offset,
            grant,
            remaining = self.remaining,
            "strip-mine step"
        );
        Some(batch)
    }
}

/// The grant sequence for `total` elements of `width` on `unit`.
#[must_use]
pub fn batches(unit: &VectorUnit, width: ElementWidth, total: usize) -> Batches {
    Batches {
        unit: *unit,
        width,
        offset: 0,
        remaining: total,
    }
}

fn check_len(left: usize, right: usize) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(KernelError::LengthMismatch { left, right })
    }
}

/// Strip-mines a unary transform from `src` into `dst`.
///
/// When the two element widths differ the grant is negotiated at the wider
/// width, so both cursors advance in lockstep and neither side's batch
/// exceeds the unit's capacity.
pub fn map<T, U, F>(unit: &VectorUnit, src: &[T], dst: &mut [U], mut kernel: F) -> Result<()>
where
    T: Element,
    U: Element,
    F: FnMut(&[T], &mut [U]),
{
    check_len(src.len(), dst.len())?;
    let width = T::WIDTH.widest(U::WIDTH);
    for batch in batches(unit, width, src.len()) {
        let end = batch.offset + batch.len;
        kernel(&src[batch.offset..end], &mut dst[batch.offset..end]);
    }
    Ok(())
}

/// Strip-mines a binary transform from `a` and `b` into `dst`.
pub fn zip_map<T, F>(unit: &VectorUnit, a: &[T], b: &[T], dst: &mut [T], mut kernel: F) -> Result<()>
where
    T: Element,
    F: FnMut(&[T], &[T], &mut [T]),
{
    check_len(a.len(), b.len())?;
    check_len(a.len(), dst.len())?;
    for batch in batches(unit, T::WIDTH, a.len()) {
        let end = batch.offset + batch.len;
        kernel(&a[batch.offset..end], &b[batch.offset..end], &mut dst[batch.offset..end]);
    }
    Ok(())
}

/// Strip-mines a two-input reduction, threading the accumulator through
/// every batch. The caller finalizes the accumulator exactly once after the
/// driver returns (the horizontal-reduce step of the reference kernels).
pub fn reduce2<T, A, F>(unit: &VectorUnit, a: &[T], b: &[T], init: A, mut step: F) -> Result<A>
where
    T: Element,
    F: FnMut(A, &[T], &[T]) -> A,
{
    check_len(a.len(), b.len())?;
    let mut acc = init;
    for batch in batches(unit, T::WIDTH, a.len()) {
        let end = batch.offset + batch.len;
        acc = step(acc, &a[batch.offset..end], &b[batch.offset..end]);
    }
    Ok(acc)
}

/// Strip-mines a single-input reduction.
pub fn reduce<T, A, F>(unit: &VectorUnit, src: &[T], init: A, mut step: F) -> A
where
    T: Element,
    F: FnMut(A, &[T]) -> A,
{
    let mut acc = init;
    for batch in batches(unit, T::WIDTH, src.len()) {
        let end = batch.offset + batch.len;
        acc = step(acc, &src[batch.offset..end]);
    }
    acc
}
