//! Primitive keys stored without a per-slot occupancy flag.

use core::fmt::Debug;

/// A primitive key type that a [`ScalarTable`](crate::ScalarTable) can store
/// directly in its slot array.
///
/// The all-zero bit pattern marks an empty slot, so the key whose bits are
/// zero is kept out of band by the table. Keys are hashed and compared by
/// their bits, which makes `-0.0` and `0.0` different keys and lets a `NaN`
/// equal another `NaN` with the same payload.
pub trait Scalar: Copy + Debug + 'static {
    /// The key represented by all-zero bits.
    const ZERO: Self;

    /// The key's bits, widened to 64. Keys wider than 64 bits fold their
    /// halves together.
    fn to_bits(self) -> u64;

    /// Bitwise key equality.
    fn same(self, other: Self) -> bool;

    /// Whether this is the key stored out of band.
    #[inline]
    fn is_zero(self) -> bool {
        self.same(Self::ZERO)
    }
}

macro_rules! scalar_int {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self as u64
                }

                #[inline(always)]
                fn same(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

scalar_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

macro_rules! scalar_wide {
    ($($ty:ty),*) => {
        $(
            impl Scalar for $ty {
                const ZERO: Self = 0;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    (self as u128 as u64) ^ ((self as u128 >> 64) as u64)
                }

                #[inline(always)]
                fn same(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

scalar_wide!(u128, i128);

impl Scalar for char {
    const ZERO: Self = '\0';

    #[inline(always)]
    fn to_bits(self) -> u64 {
        u64::from(u32::from(self))
    }

    #[inline(always)]
    fn same(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for bool {
    const ZERO: Self = false;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        u64::from(self)
    }

    #[inline(always)]
    fn same(self, other: Self) -> bool {
        self == other
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        u64::from(f32::to_bits(self))
    }

    #[inline(always)]
    fn same(self, other: Self) -> bool {
        f32::to_bits(self) == f32::to_bits(other)
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    #[inline(always)]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline(always)]
    fn same(self, other: Self) -> bool {
        f64::to_bits(self) == f64::to_bits(other)
    }
}
