//! Runtime SIMD level detection and dispatch wiring.
//!
//! Detection runs once and is cached; every public entry point asserts the
//! lockstep length invariant and routes to the best kernel for the detected
//! level and input size. Short inputs skip SIMD entirely; the fixed cost of
//! setting up accumulators exceeds the win below one register's worth of
//! lanes.

use tracing::debug;

use super::scalar;

/// SIMD capability level detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdLevel {
    /// AVX-512F available (x86_64 only).
    Avx512,
    /// AVX2 + FMA available (x86_64 only).
    Avx2,
    /// NEON available (aarch64, always true).
    Neon,
    /// Scalar fallback.
    Scalar,
}

impl SimdLevel {
    /// Bytes of one vector register at this level.
    ///
    /// This is what [`crate::VectorUnit::detect`] uses as its capacity
    /// baseline. The scalar fallback reports 16 bytes: the batch loops are
    /// still worth running at the width auto-vectorization targets.
    #[must_use]
    pub const fn register_bytes(self) -> usize {
        match self {
            Self::Avx512 => 64,
            Self::Avx2 => 32,
            Self::Neon | Self::Scalar => 16,
        }
    }
}

static SIMD_LEVEL: std::sync::OnceLock<SimdLevel> = std::sync::OnceLock::new();

fn detect_simd_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f") {
            return SimdLevel::Avx512;
        }
        if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
            return SimdLevel::Avx2;
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        return SimdLevel::Neon;
    }

    #[allow(unreachable_code)]
    SimdLevel::Scalar
}

/// Returns the cached SIMD capability level.
#[inline]
#[must_use]
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(|| {
        let level = detect_simd_level();
        debug!(?level, register_bytes = level.register_bytes(), "detected SIMD level");
        level
    })
}

/// Runs each dispatched kernel once so first-call latency is paid up front.
#[inline]
pub fn warmup() {
    let _ = simd_level();
    let a = vec![0.01_f32; 256];
    let b = vec![0.01_f32; 256];
    let mut out = vec![0.0_f32; 256];
    for _ in 0..3 {
        let _ = dot_f32(&a, &b);
        let _ = sum_f32(&a);
        add_f32(&a, &b, &mut out);
    }
}

/// f32 dot product with automatic dispatch to the best available SIMD.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[inline]
#[must_use]
pub fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "buffer lengths must match");
    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx512 | SimdLevel::Avx2 if a.len() >= 16 => {
            // SAFETY: AVX2+FMA confirmed by runtime detection (AVX-512
            // machines also have AVX2).
            unsafe { super::x86_avx2::dot_f32(a, b) }
        }
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon if a.len() >= 8 => super::neon::dot_f32(a, b),
        _ => scalar::dot_f32(a, b),
    }
}

/// f32 elementwise add with automatic dispatch.
///
/// # Panics
///
/// Panics if the three buffer lengths differ.
#[inline]
pub fn add_f32(a: &[f32], b: &[f32], out: &mut [f32]) {
    assert_eq!(a.len(), b.len(), "buffer lengths must match");
    assert_eq!(a.len(), out.len(), "buffer lengths must match");
    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx512 | SimdLevel::Avx2 if a.len() >= 8 => {
            // SAFETY: AVX2 confirmed by runtime detection.
            unsafe { super::x86_avx2::add_f32(a, b, out) }
        }
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon if a.len() >= 4 => super::neon::add_f32(a, b, out),
        _ => scalar::add_f32(a, b, out),
    }
}

/// f32 sum with automatic dispatch.
#[inline]
#[must_use]
pub fn sum_f32(values: &[f32]) -> f32 {
    match simd_level() {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx512 | SimdLevel::Avx2 if values.len() >= 16 => {
            // SAFETY: AVX2 confirmed by runtime detection.
            unsafe { super::x86_avx2::sum_f32(values) }
        }
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon if values.len() >= 8 => super::neon::sum_f32(values),
        _ => scalar::sum_f32(values),
    }
}
