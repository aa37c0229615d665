use std::cmp::min;

use num_traits::PrimInt;

/// Remainder whose sign follows the divisor, i.e. the remainder that goes with a
/// quotient rounded towards negative infinity. The `%` operator follows the sign of
/// the dividend instead, which gives the wrong answer for instants before the epoch.
pub(crate) trait RemFloor: Sized {
    fn rem_floor(&self, other: Self) -> Self;
}

impl<T: PrimInt> RemFloor for T {
    fn rem_floor(&self, other: Self) -> Self {
        let zero = Self::zero();
        let one = Self::one();
        if *self > zero && other < zero {
            (*self - one) % other + other + one
        } else if *self < zero && other > zero {
            (*self + one) % other + other - one
        } else {
            *self % other
        }
    }
}

/// Division where the quotient is capped at `max_quotient`, with the excess left in the
/// remainder. Only meaningful for non-negative operands. A short trailing period, such as
/// the epagomenal days at the end of a fixed-month year, ends up in the last quotient.
pub(crate) trait ClampedDivRem: Sized {
    fn clamped_div_rem(self, divisor: Self, max_quotient: Self) -> (Self, Self);
}

impl<T: PrimInt> ClampedDivRem for T {
    fn clamped_div_rem(self, divisor: T, max_quotient: T) -> (T, T) {
        let quotient = min(self / divisor, max_quotient);
        let remainder = self - quotient * divisor;
        (quotient, remainder)
    }
}
