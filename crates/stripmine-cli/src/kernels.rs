//! Per-kernel runners: generate data, run both paths, time, compare.

use anyhow::Result;
use clap::ValueEnum;
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::debug;

use stripmine_core::golden::{self, compare_scalars, compare_slices, Mismatch, Tolerance};
use stripmine_core::kernel::elementwise::{self, MaskPolicy};
use stripmine_core::kernel::reduce::{self, ReduceMode};
use stripmine_core::kernel::transcendental;
use stripmine_core::VectorUnit;

/// Relative envelope for reassociated reductions.
const REL_TOLERANCE: f64 = 1e-4;

/// One runnable kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KernelId {
    Add,
    Scale,
    Axpy,
    Dropout,
    Dot,
    Sum,
    Max,
    Exp,
    Ln,
    Cos,
}

impl KernelId {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Add,
            Self::Scale,
            Self::Axpy,
            Self::Dropout,
            Self::Dot,
            Self::Sum,
            Self::Max,
            Self::Exp,
            Self::Ln,
            Self::Cos,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Scale => "scale",
            Self::Axpy => "axpy",
            Self::Dropout => "dropout",
            Self::Dot => "dot",
            Self::Sum => "sum",
            Self::Max => "max",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Cos => "cos",
        }
    }
}

/// Result of one kernel run.
pub struct RunOutcome {
    pub name: &'static str,
    pub golden_elapsed: Duration,
    pub stripmined_elapsed: Duration,
    pub mismatches: usize,
    pub first_mismatch: Option<Mismatch>,
}

impl RunOutcome {
    pub fn stripmined_throughput(&self, len: usize) -> f64 {
        throughput(len, self.stripmined_elapsed)
    }

    pub fn golden_throughput(&self, len: usize) -> f64 {
        throughput(len, self.golden_elapsed)
    }
}

#[allow(clippy::cast_precision_loss)]
fn throughput(len: usize, elapsed: Duration) -> f64 {
    len as f64 / elapsed.as_secs_f64().max(1e-9) / 1e6
}

fn uniform_vec(rng: &mut StdRng, len: usize, lo: f32, hi: f32) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(lo..hi)).collect()
}

/// Runs one kernel through both paths and compares the results.
#[allow(clippy::too_many_lines)]
pub fn run(
    id: KernelId,
    unit: &VectorUnit,
    len: usize,
    seed: u64,
    abs_tolerance: f64,
) -> Result<RunOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);
    debug!(kernel = id.name(), len, seed, "running kernel");
    match id {
        KernelId::Add => {
            let a = uniform_vec(&mut rng, len, -100.0, 100.0);
            let b = uniform_vec(&mut rng, len, -100.0, 100.0);
            let mut got = vec![0.0_f32; len];
            let mut want = vec![0.0_f32; len];

            let start = Instant::now();
            elementwise::add_f32(unit, &a, &b, &mut got)?;
            let stripmined = start.elapsed();

            let start = Instant::now();
            golden::add(&a, &b, &mut want);
            let golden_t = start.elapsed();

            Ok(slice_outcome(id, golden_t, stripmined, &got, &want, Tolerance::Exact))
        }
        KernelId::Scale => {
            let src = uniform_vec(&mut rng, len, -100.0, 100.0);
            let mut got = vec![0.0_f32; len];
            let mut want = vec![0.0_f32; len];

            let start = Instant::now();
            elementwise::scale(unit, &src, 1.75_f32, &mut got)?;
            let stripmined = start.elapsed();

            let start = Instant::now();
            golden::scale(&src, 1.75_f32, &mut want);
            let golden_t = start.elapsed();

            Ok(slice_outcome(id, golden_t, stripmined, &got, &want, Tolerance::Exact))
        }
        KernelId::Axpy => {
            let x = uniform_vec(&mut rng, len, -100.0, 100.0);
            let y = uniform_vec(&mut rng, len, -100.0, 100.0);
            let mut got = vec![0.0_f32; len];
            let mut want = vec![0.0_f32; len];

            let start = Instant::now();
            elementwise::axpy(unit, 0.5_f32, &x, &y, &mut got)?;
            let stripmined = start.elapsed();

            let start = Instant::now();
            golden::axpy(0.5_f32, &x, &y, &mut want);
            let golden_t = start.elapsed();

            Ok(slice_outcome(id, golden_t, stripmined, &got, &want, Tolerance::Exact))
        }
        KernelId::Dropout => {
            let src = uniform_vec(&mut rng, len, -10.0, 10.0);
            let keep: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.5)).collect();
            let mut got = vec![0.0_f32; len];
            let mut want = vec![0.0_f32; len];

            let start = Instant::now();
            elementwise::masked_scale(unit, &src, &keep, 2.0, MaskPolicy::ZeroFill, &mut got)?;
            let stripmined = start.elapsed();

            let start = Instant::now();
            golden::dropout(&src, &keep, 2.0, &mut want);
            let golden_t = start.elapsed();

            Ok(slice_outcome(id, golden_t, stripmined, &got, &want, Tolerance::Exact))
        }
        KernelId::Dot => {
            let a = uniform_vec(&mut rng, len, -10.0, 10.0);
            let b = uniform_vec(&mut rng, len, -10.0, 10.0);

            let start = Instant::now();
            let unordered = reduce::dot_f32(unit, &a, &b, ReduceMode::Unordered)?;
            let stripmined = start.elapsed();
            let ordered = reduce::dot_f32(unit, &a, &b, ReduceMode::Ordered)?;

            let start = Instant::now();
            let want = golden::dot(&a, &b);
            let golden_t = start.elapsed();

            let checks = [
                (ordered, Tolerance::Exact),
                (unordered, Tolerance::Relative(REL_TOLERANCE)),
            ];
            Ok(scalar_outcome(id, golden_t, stripmined, &checks, want))
        }
        KernelId::Sum => {
            let values = uniform_vec(&mut rng, len, -10.0, 10.0);

            let start = Instant::now();
            let unordered = reduce::sum_f32(unit, &values, ReduceMode::Unordered);
            let stripmined = start.elapsed();
            let ordered = reduce::sum_f32(unit, &values, ReduceMode::Ordered);

            let start = Instant::now();
            let want = golden::sum(&values);
            let golden_t = start.elapsed();

            let checks = [
                (ordered, Tolerance::Exact),
                (unordered, Tolerance::Relative(REL_TOLERANCE)),
            ];
            Ok(scalar_outcome(id, golden_t, stripmined, &checks, want))
        }
        KernelId::Max => {
            let values = uniform_vec(&mut rng, len, -1000.0, 1000.0);

            let start = Instant::now();
            let got = reduce::max(unit, &values);
            let stripmined = start.elapsed();

            let start = Instant::now();
            let want = golden::max(&values);
            let golden_t = start.elapsed();

            let agree = match (got, want) {
                (Some(g), Some(w)) => compare_scalars(g, w, Tolerance::Exact),
                (None, None) => true,
                _ => false,
            };
            let first_mismatch = (!agree).then(|| Mismatch {
                index: 0,
                actual: got.map_or(f64::NAN, f64::from),
                expected: want.map_or(f64::NAN, f64::from),
            });
            Ok(RunOutcome {
                name: id.name(),
                golden_elapsed: golden_t,
                stripmined_elapsed: stripmined,
                mismatches: usize::from(!agree),
                first_mismatch,
            })
        }
        KernelId::Exp => {
            let src = uniform_vec(&mut rng, len, -80.0, 80.0);
            transcendental_outcome(id, unit, &src, abs_tolerance, transcendental::exp_f32_buf, golden::exp_f32)
        }
        KernelId::Ln => {
            let src = uniform_vec(&mut rng, len, 1e-3, 1e4);
            transcendental_outcome(id, unit, &src, abs_tolerance, transcendental::ln_f32_buf, golden::ln_f32)
        }
        KernelId::Cos => {
            let src = uniform_vec(&mut rng, len, -10.0, 10.0);
            transcendental_outcome(id, unit, &src, abs_tolerance, transcendental::cos_f32_buf, golden::cos_f32)
        }
    }
}

fn slice_outcome(
    id: KernelId,
    golden_elapsed: Duration,
    stripmined_elapsed: Duration,
    got: &[f32],
    want: &[f32],
    tolerance: Tolerance,
) -> RunOutcome {
    let report = compare_slices(got, want, tolerance);
    RunOutcome {
        name: id.name(),
        golden_elapsed,
        stripmined_elapsed,
        mismatches: report.mismatches.len(),
        first_mismatch: report.mismatches.first().copied(),
    }
}

fn scalar_outcome(
    id: KernelId,
    golden_elapsed: Duration,
    stripmined_elapsed: Duration,
    checks: &[(f32, Tolerance)],
    want: f32,
) -> RunOutcome {
    let mut mismatches = 0;
    let mut first_mismatch = None;
    for &(got, tolerance) in checks {
        if !compare_scalars(got, want, tolerance) {
            mismatches += 1;
            first_mismatch.get_or_insert(Mismatch {
                index: 0,
                actual: f64::from(got),
                expected: f64::from(want),
            });
        }
    }
    RunOutcome {
        name: id.name(),
        golden_elapsed,
        stripmined_elapsed,
        mismatches,
        first_mismatch,
    }
}

fn transcendental_outcome(
    id: KernelId,
    unit: &VectorUnit,
    src: &[f32],
    abs_tolerance: f64,
    kernel: impl Fn(&VectorUnit, &[f32], &mut [f32]) -> stripmine_core::Result<()>,
    reference: impl Fn(&[f32], &mut [f32]),
) -> Result<RunOutcome> {
    let mut got = vec![0.0_f32; src.len()];
    let mut want = vec![0.0_f32; src.len()];

    let start = Instant::now();
    kernel(unit, src, &mut got)?;
    let stripmined = start.elapsed();

    let start = Instant::now();
    reference(src, &mut want);
    let golden_t = start.elapsed();

    // Approximation vs libm: absolute below unit magnitude, relative past it.
    let tolerance = Tolerance::Relative(abs_tolerance);
    Ok(slice_outcome(id, golden_t, stripmined, &got, &want, tolerance))
}
