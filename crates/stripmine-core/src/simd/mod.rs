//! Native SIMD fast paths for the f32 kernels.
//!
//! The strip-mining drivers treat the vector unit as a black-box capacity;
//! this module is where that capacity is actually realized. It provides
//! hand-tuned `core::arch` kernels for the three operations that dominate
//! real workloads (dot product, elementwise add, and sum) with runtime
//! dispatch and scalar fallbacks.
//!
//! # Module structure
//!
//! - `scalar`: scalar fallbacks, doubling as tail handlers and as the
//!   reference for dispatch tests
//! - `x86_avx2`: AVX2+FMA kernels (x86_64 only)
//! - `neon`: ARM NEON kernels (aarch64 only)
//! - `dispatch`: runtime SIMD level detection and dispatch wiring

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe blocks in this module tree.
// - Condition 1: All pointer arithmetic is derived from slice pointers with
//   loop bounds proving in-range access for each lane width.
// - Condition 2: Target-featured functions are called only after runtime
//   feature checks or on architectures where the feature is guaranteed.
// - Condition 3: Unaligned loads use `*_loadu_*` / `vld1q_*` intrinsics that
//   permit unaligned access.

pub(crate) mod scalar;

#[cfg(target_arch = "x86_64")]
mod x86_avx2;

#[cfg(target_arch = "aarch64")]
mod neon;

mod dispatch;

pub use dispatch::{add_f32, dot_f32, simd_level, sum_f32, warmup, SimdLevel};
