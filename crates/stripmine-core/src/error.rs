//! Error types for the strip-mining engine.
//!
//! The numeric kernels themselves never fail: out-of-domain inputs produce
//! sentinel values (see `kernel::transcendental`). Errors here cover the
//! precondition checks the library adds on top of the raw kernels: buffer
//! length validation, negotiator construction, strict-mode domain checks,
//! and configuration loading.

use thiserror::Error;

/// Errors produced by drivers, the negotiator, and strict-mode kernels.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Buffers that must advance in lockstep have different lengths.
    #[error("buffer length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first buffer.
        left: usize,
        /// Length of the second buffer.
        right: usize,
    },

    /// Requested vector register capacity is unusable.
    #[error("invalid vector length {0} bytes: must be a power of two holding at least one 64-bit lane")]
    InvalidVlen(usize),

    /// Strict-mode domain violation in a transcendental kernel.
    #[error("domain violation: {op}({value})")]
    Domain {
        /// Operation name, e.g. `"ln"`.
        op: &'static str,
        /// The offending input, widened for reporting.
        value: f64,
    },

    /// Configuration extraction failed.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KernelError>;
