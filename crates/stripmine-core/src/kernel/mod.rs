//! Elementwise, reduction, and transcendental kernels.
//!
//! Every kernel here is a pure function over the batches a strip-mining
//! driver hands it. Kernel-specific numeric policy (overflow, sentinel
//! values, reduction order) is documented per function; nothing in this
//! tree traps on out-of-domain input unless the `_checked` strict variant
//! is called.

use std::ops::{Add, Mul};

use crate::width::Element;

pub mod elementwise;
pub mod reduce;
pub mod transcendental;


/// Elements the arithmetic kernels operate on.
///
/// Numeric behavior is the element type's own: integer overflow follows the
/// build profile, float rounding follows IEEE semantics.
pub trait Arith: Element + Add<Output = Self> + Mul<Output = Self> + Default {}

impl<T> Arith for T where T: Element + Add<Output = T> + Mul<Output = T> + Default {}
