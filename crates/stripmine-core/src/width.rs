//! Element widths and the `Element` trait.
//!
//! The active element width is always carried explicitly, either as an
//! [`ElementWidth`] value or as the `WIDTH` constant of an [`Element`]
//! type, never as ambient vector-unit mode state. This keeps the batching
//! logic referentially transparent and testable in isolation.

use half::f16;

/// Bit-width of one buffer element.
///
/// The maximum batch a vector unit can grant is inversely related to the
/// element width: doubling the width at most halves the grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementWidth {
    /// 8-bit integer lanes.
    I8,
    /// 16-bit integer lanes.
    I16,
    /// 32-bit integer lanes.
    I32,
    /// 64-bit integer lanes.
    I64,
    /// IEEE binary16 lanes.
    F16,
    /// IEEE binary32 lanes.
    F32,
    /// IEEE binary64 lanes.
    F64,
}

impl ElementWidth {
    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::I8 => 8,
            Self::I16 | Self::F16 => 16,
            Self::I32 | Self::F32 => 32,
            Self::I64 | Self::F64 => 64,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// The wider of two widths, used to negotiate lockstep grants for
    /// mixed-width buffers.
    #[must_use]
    pub const fn widest(self, other: Self) -> Self {
        if other.bytes() > self.bytes() {
            other
        } else {
            self
        }
    }
}

/// A numeric buffer element with a statically known width.
pub trait Element: Copy + PartialEq + Send + Sync + 'static {
    /// The width of this element type.
    const WIDTH: ElementWidth;

    /// Widening conversion used by the comparator and reporting paths.
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($ty:ty, $width:expr) => {
        impl Element for $ty {
            const WIDTH: ElementWidth = $width;

            #[inline]
            #[allow(clippy::cast_precision_loss)] // Reporting path, not arithmetic.
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_element!(i8, ElementWidth::I8);
impl_element!(i16, ElementWidth::I16);
impl_element!(i32, ElementWidth::I32);
impl_element!(i64, ElementWidth::I64);
impl_element!(f32, ElementWidth::F32);
impl_element!(f64, ElementWidth::F64);

impl Element for f16 {
    const WIDTH: ElementWidth = ElementWidth::F16;

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }
}
