//! Batch-size negotiation: the model of the vector unit's capacity.
//!
//! A [`VectorUnit`] answers one question: how many elements of a given
//! width fit in one strip-mine step. It is a pure capacity query: asking
//! never fails and never mutates anything, and the element width is passed
//! explicitly on every call rather than being bound into unit-global mode
//! state.

use tracing::debug;

use crate::error::{KernelError, Result};
use crate::simd;
use crate::width::ElementWidth;

/// Default register-grouping factor.
///
/// The reference kernels strip-mine at the widest grouping their ISA
/// offers (eight registers ganged per operation); grants scale by the same
/// factor here.
pub const DEFAULT_GROUP: usize = 8;

/// A fixed-capacity vector execution unit.
///
/// Capacity is `vlen_bytes` (bytes of one vector register) times `group`
/// (how many registers one operation gangs together). The maximum grant for
/// a width is the number of elements of that width the ganged registers
/// hold, so doubling the element width at most halves the grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorUnit {
    vlen_bytes: usize,
    group: usize,
}

impl VectorUnit {
    /// Builds a unit sized from the runtime-detected SIMD level.
    #[must_use]
    pub fn detect() -> Self {
        let vlen_bytes = simd::simd_level().register_bytes();
        debug!(vlen_bytes, group = DEFAULT_GROUP, "vector unit detected");
        Self {
            vlen_bytes,
            group: DEFAULT_GROUP,
        }
    }

    /// Builds a unit with an explicit register capacity in bytes.
    ///
    /// The capacity must be a power of two and hold at least one 64-bit
    /// lane; anything else is rejected with [`KernelError::InvalidVlen`].
    pub fn with_vlen_bytes(vlen_bytes: usize) -> Result<Self> {
        if vlen_bytes < 8 || !vlen_bytes.is_power_of_two() {
            return Err(KernelError::InvalidVlen(vlen_bytes));
        }
        Ok(Self {
            vlen_bytes,
            group: DEFAULT_GROUP,
        })
    }

    /// Replaces the register-grouping factor (must be nonzero).
    pub fn with_group(self, group: usize) -> Result<Self> {
        if group == 0 {
            return Err(KernelError::InvalidVlen(0));
        }
        Ok(Self { group, ..self })
    }

    /// Bytes of one vector register.
    #[must_use]
    pub const fn vlen_bytes(&self) -> usize {
        self.vlen_bytes
    }

    /// Maximum elements of `width` one strip-mine step can process.
    ///
    /// Monotonically non-increasing in `width`, and always at least 1.
    #[must_use]
    pub const fn max_batch(&self, width: ElementWidth) -> usize {
        self.vlen_bytes * self.group / width.bytes()
    }

    /// Negotiates the next grant for `remaining` elements of `width`.
    ///
    /// Returns 0 exactly when `remaining == 0` (the loop-termination
    /// sentinel); otherwise `min(remaining, max_batch(width))`, which is
    /// always positive.
    #[inline]
    #[must_use]
    pub fn next_batch(&self, remaining: usize, width: ElementWidth) -> usize {
        if remaining == 0 {
            0
        } else {
            remaining.min(self.max_batch(width))
        }
    }
}

impl Default for VectorUnit {
    fn default() -> Self {
        Self::detect()
    }
}
