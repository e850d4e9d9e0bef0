//! # `stripmine-core`
//!
//! Strip-mined SIMD reduction/transform kernels with golden scalar
//! references.
//!
//! The library generalizes one pattern: decomposing a long buffer operation
//! into a sequence of bounded batches negotiated with a fixed-capacity
//! vector unit. A [`VectorUnit`] answers "how many elements of this width
//! fit in one step", the drivers in [`driver`] run the loop and keep every
//! cursor in lockstep, the kernels in [`kernel`] do the per-batch math
//! (with native SIMD fast paths in [`simd`] where it pays), and [`golden`]
//! holds the independent scalar references and the comparator used to
//! validate all of it.
//!
//! ## Quick start
//!
//! ```rust
//! use stripmine_core::golden::{self, compare_slices, Tolerance};
//! use stripmine_core::kernel::elementwise;
//! use stripmine_core::kernel::reduce::{self, ReduceMode};
//! use stripmine_core::VectorUnit;
//!
//! fn main() -> Result<(), stripmine_core::KernelError> {
//!     let unit = VectorUnit::detect();
//!
//!     let a: Vec<f32> = (0..1000).map(|i| i as f32 + 2.0).collect();
//!     let b: Vec<f32> = (0..1000).map(|i| i as f32 - 3.0).collect();
//!     let mut c = vec![0.0_f32; 1000];
//!     elementwise::add_f32(&unit, &a, &b, &mut c)?;
//!
//!     let mut reference = vec![0.0_f32; 1000];
//!     golden::add(&a, &b, &mut reference);
//!     assert!(compare_slices(&c, &reference, Tolerance::Exact).is_match());
//!
//!     let dot = reduce::dot_f32(&unit, &a, &b, ReduceMode::Unordered)?;
//!     assert!(dot > 0.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Numeric policy
//!
//! The kernels never trap: out-of-domain transcendental inputs produce
//! sentinel values and `exp` saturates at its clamp boundary, matching the
//! hardware float semantics of the reference kernels. Strict `_checked`
//! variants turn domain violations into errors. Reduction order is always
//! an explicit [`kernel::reduce::ReduceMode`], and masked-select fallback
//! is always an explicit [`kernel::elementwise::MaskPolicy`].

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::float_cmp,
        clippy::doc_markdown,
        clippy::uninlined_format_args
    )
)]

pub mod config;
pub mod driver;
pub mod error;
pub mod golden;
#[cfg(test)]
mod golden_tests;
pub mod kernel;
pub mod simd;
pub mod unit;
#[cfg(test)]
mod unit_tests;
pub mod width;

pub use config::EngineConfig;
pub use error::{KernelError, Result};
pub use unit::VectorUnit;
pub use width::{Element, ElementWidth};
