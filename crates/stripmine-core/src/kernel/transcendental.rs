//! Polynomial transcendental approximations: exp, ln, cos.
//!
//! Cephes-lineage minimax polynomials with range reduction, the same
//! algorithm family the vectorized reference kernels use (via Pommier's
//! `sse_mathfun`). Domain policy is saturate-or-sentinel, never trap:
//!
//! - `exp` clamps its argument to ±88.3762626647949 before evaluation, so
//!   the result saturates instead of overflowing;
//! - `ln` of a non-positive input returns the all-ones-bit sentinel (a NaN
//!   with every payload bit set) rather than raising anything;
//! - `cos` accepts any finite argument.
//!
//! The f64 variants deliberately reuse the single-precision coefficient
//! set at double width, matching the reference kernels rather than chasing
//! extra precision. Expect single-precision accuracy from them.
//!
//! The `_checked` variants are the opt-in strict mode: domain violations
//! become [`KernelError::Domain`] instead of sentinels.

use crate::driver;
use crate::error::{KernelError, Result};
use crate::unit::VectorUnit;

// Shared cephes constants (single-precision lineage).
const EXP_HI: f64 = 88.376_262_664_794_9;
const LOG2EF: f64 = 1.442_695_040_888_963_4;
const EXP_C1: f64 = 0.693_359_375;
const EXP_C2: f64 = -2.121_944_40e-4;
const EXP_P: [f64; 6] = [
    1.987_569_15e-4,
    1.398_199_950_7e-3,
    8.333_451_907_3e-3,
    4.166_579_589_4e-2,
    1.666_666_545_9e-1,
    5.000_000_120_1e-1,
];

const SQRTHF: f64 = 0.707_106_781_186_547_5;
const LOG_P: [f64; 9] = [
    7.037_683_629_2e-2,
    -1.151_461_031_0e-1,
    1.167_699_874_0e-1,
    -1.242_014_084_6e-1,
    1.424_932_278_7e-1,
    -1.666_805_766_5e-1,
    2.000_071_476_5e-1,
    -2.499_999_399_3e-1,
    3.333_333_117_4e-1,
];
const LOG_Q1: f64 = -2.121_944_40e-4;
const LOG_Q2: f64 = 0.693_359_375;

const FOPI: f64 = 1.273_239_544_735_162_7; // 4/pi
const DP1: f64 = 0.785_156_25;
const DP2: f64 = 2.418_756_484_985_351_562_5e-4;
const DP3: f64 = 3.774_894_977_445_941_08e-8;
const SINCOF: [f64; 3] = [-1.951_529_589_1e-4, 8.332_160_873_6e-3, -1.666_665_461_1e-1];
const COSCOF: [f64; 3] = [2.443_315_711_809_948e-5, -1.388_731_625_493_765e-3, 4.166_664_568_298_827e-2];

// =============================================================================
// Scalar bodies, f32
// =============================================================================

/// exp(x) for f32, argument clamped to ±88.3762626647949.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `n` is in [-127, 128] after the clamp.
pub fn exp_f32(x: f32) -> f32 {
    let x = x.clamp(-(EXP_HI as f32), EXP_HI as f32);

    // Express exp(x) as 2^n * exp(r) with r in [-ln2/2, ln2/2].
    let n = (x * LOG2EF as f32 + 0.5).floor();
    // Cody-Waite: subtract n*ln2 in two parts to keep r exact.
    let r = x - n * EXP_C1 as f32 - n * EXP_C2 as f32;

    let mut y = EXP_P[0] as f32;
    for p in &EXP_P[1..] {
        y = y * r + *p as f32;
    }
    let y = y * r * r + r + 1.0;

    // 2^n by direct exponent construction.
    let two_n = f32::from_bits((((n as i32) + 127) << 23) as u32);
    y * two_n
}

/// Sentinel for `ln` of a non-positive input: every bit set.
#[must_use]
pub fn ln_sentinel_f32() -> f32 {
    f32::from_bits(u32::MAX)
}

/// ln(x) for f32. Non-positive inputs yield [`ln_sentinel_f32`]; denormals
/// are clamped to the smallest normal first.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn ln_f32(x: f32) -> f32 {
    if x <= 0.0 {
        return ln_sentinel_f32();
    }
    let x = x.max(f32::from_bits(0x0080_0000)); // cut off denormalized stuff

    // Split into exponent and a mantissa in [0.5, 1).
    let bits = x.to_bits();
    let mut e = ((bits >> 23) as i32 - 0x7f) as f32 + 1.0;
    let mut m = f32::from_bits((bits & !0x7f80_0000) | 0.5_f32.to_bits());

    if m < SQRTHF as f32 {
        e -= 1.0;
        m = m + m - 1.0;
    } else {
        m -= 1.0;
    }

    let z = m * m;
    let mut y = LOG_P[0] as f32;
    for p in &LOG_P[1..] {
        y = y * m + *p as f32;
    }
    y = y * m * z;
    y += e * LOG_Q1 as f32;
    y -= 0.5 * z;
    m + y + e * LOG_Q2 as f32
}

/// cos(x) for f32, quadrant range reduction by 4/pi.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn cos_f32(x: f32) -> f32 {
    let x = x.abs();

    // Quadrant index, forced even.
    let mut j = (x * FOPI as f32) as i64;
    let mut y = j as f32;
    if j & 1 == 1 {
        j += 1;
        y += 1.0;
    }
    j &= 7;
    let mut sign = false;
    if j > 3 {
        j -= 4;
        sign = !sign;
    }
    if j > 1 {
        sign = !sign;
    }

    // Extended-precision modular arithmetic.
    let r = ((x - y * DP1 as f32) - y * DP2 as f32) - y * DP3 as f32;
    let z = r * r;

    let result = if j == 1 || j == 2 {
        // Octants near the zero crossing use the sine polynomial.
        let mut p = SINCOF[0] as f32;
        p = p * z + SINCOF[1] as f32;
        p = p * z + SINCOF[2] as f32;
        p * z * r + r
    } else {
        let mut p = COSCOF[0] as f32;
        p = p * z + COSCOF[1] as f32;
        p = p * z + COSCOF[2] as f32;
        p * z * z - 0.5 * z + 1.0
    };
    if sign {
        -result
    } else {
        result
    }
}

// =============================================================================
// Scalar bodies, f64 (same coefficient set, wider arithmetic)
// =============================================================================

/// exp(x) for f64, argument clamped to ±88.3762626647949.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // `n` is in [-128, 128] after the clamp.
pub fn exp_f64(x: f64) -> f64 {
    let x = x.clamp(-EXP_HI, EXP_HI);

    let n = (x * LOG2EF + 0.5).floor();
    let r = x - n * EXP_C1 - n * EXP_C2;

    let mut y = EXP_P[0];
    for p in &EXP_P[1..] {
        y = y * r + *p;
    }
    let y = y * r * r + r + 1.0;

    let two_n = f64::from_bits((((n as i64) + 1023) << 52) as u64);
    y * two_n
}

/// Sentinel for `ln` of a non-positive input: every bit set.
#[must_use]
pub fn ln_sentinel_f64() -> f64 {
    f64::from_bits(u64::MAX)
}

/// ln(x) for f64. Non-positive inputs yield [`ln_sentinel_f64`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn ln_f64(x: f64) -> f64 {
    if x <= 0.0 {
        return ln_sentinel_f64();
    }
    let x = x.max(f64::from_bits(0x0010_0000_0000_0000)); // cut off denormalized stuff

    let bits = x.to_bits();
    let mut e = ((bits >> 52) as i64 - 1023) as f64 + 1.0;
    let mut m = f64::from_bits((bits & !0x7ff0_0000_0000_0000) | 0.5_f64.to_bits());

    if m < SQRTHF {
        e -= 1.0;
        m = m + m - 1.0;
    } else {
        m -= 1.0;
    }

    let z = m * m;
    let mut y = LOG_P[0];
    for p in &LOG_P[1..] {
        y = y * m + *p;
    }
    y = y * m * z;
    y += e * LOG_Q1;
    y -= 0.5 * z;
    m + y + e * LOG_Q2
}

/// cos(x) for f64, quadrant range reduction by 4/pi.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn cos_f64(x: f64) -> f64 {
    let x = x.abs();

    let mut j = (x * FOPI) as i64;
    let mut y = j as f64;
    if j & 1 == 1 {
        j += 1;
        y += 1.0;
    }
    j &= 7;
    let mut sign = false;
    if j > 3 {
        j -= 4;
        sign = !sign;
    }
    if j > 1 {
        sign = !sign;
    }

    let r = ((x - y * DP1) - y * DP2) - y * DP3;
    let z = r * r;

    let result = if j == 1 || j == 2 {
        let mut p = SINCOF[0];
        p = p * z + SINCOF[1];
        p = p * z + SINCOF[2];
        p * z * r + r
    } else {
        let mut p = COSCOF[0];
        p = p * z + COSCOF[1];
        p = p * z + COSCOF[2];
        p * z * z - 0.5 * z + 1.0
    };
    if sign {
        -result
    } else {
        result
    }
}

// =============================================================================
// Strip-mined buffer variants
// =============================================================================

macro_rules! buffer_variant {
    ($name:ident, $ty:ty, $body:path, $doc:literal) => {
        #[doc = $doc]
        pub fn $name(unit: &VectorUnit, src: &[$ty], dst: &mut [$ty]) -> Result<()> {
            driver::map(unit, src, dst, |src, dst| {
                for (x, d) in src.iter().zip(dst.iter_mut()) {
                    *d = $body(*x);
                }
            })
        }
    };
}

buffer_variant!(exp_f32_buf, f32, exp_f32, "Strip-mined f32 exp over a buffer.");
buffer_variant!(exp_f64_buf, f64, exp_f64, "Strip-mined f64 exp over a buffer.");
buffer_variant!(ln_f32_buf, f32, ln_f32, "Strip-mined f32 ln over a buffer.");
buffer_variant!(ln_f64_buf, f64, ln_f64, "Strip-mined f64 ln over a buffer.");
buffer_variant!(cos_f32_buf, f32, cos_f32, "Strip-mined f32 cos over a buffer.");
buffer_variant!(cos_f64_buf, f64, cos_f64, "Strip-mined f64 cos over a buffer.");

/// Strict-mode f32 ln: any non-positive input fails with
/// [`KernelError::Domain`] before anything is written.
pub fn ln_f32_buf_checked(unit: &VectorUnit, src: &[f32], dst: &mut [f32]) -> Result<()> {
    if let Some(bad) = src.iter().find(|x| **x <= 0.0) {
        return Err(KernelError::Domain {
            op: "ln",
            value: f64::from(*bad),
        });
    }
    ln_f32_buf(unit, src, dst)
}

/// Strict-mode f64 ln.
pub fn ln_f64_buf_checked(unit: &VectorUnit, src: &[f64], dst: &mut [f64]) -> Result<()> {
    if let Some(bad) = src.iter().find(|x| **x <= 0.0) {
        return Err(KernelError::Domain {
            op: "ln",
            value: *bad,
        });
    }
    ln_f64_buf(unit, src, dst)
}
