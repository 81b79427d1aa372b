//! Epsilon-aware scalar comparisons.
//!
//! Two values `a` and `b` compare equal when `a <= b + eps && a + eps >= b`.
//! Every comparison has a default-epsilon form, taking the epsilon from the
//! [`Epsilon`] implementation of the operand type, and an `_eps` form taking
//! it explicitly. Integer types compare exactly.

use std::cmp::Ordering;
use std::ops::{Add, Mul};

/// Comparison epsilon associated with a numeric type.
pub trait Epsilon: Copy + PartialOrd + Add<Output = Self> {
    /// Default tolerance used by the comparisons in this module.
    const EPSILON: Self;
}

impl Epsilon for f64 {
    const EPSILON: Self = 1e-10;
}

impl Epsilon for f32 {
    const EPSILON: Self = 1e-5;
}

macro_rules! exact_epsilon {
    ($($t:ty),* $(,)?) => {
        $(impl Epsilon for $t {
            const EPSILON: Self = 0;
        })*
    };
}

exact_epsilon!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// `a == b` within `eps`.
pub fn equal_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    a <= b + eps && a + eps >= b
}

/// `a != b` within `eps`.
pub fn not_equal_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    !equal_eps(a, b, eps)
}

/// `a < b` by more than `eps`.
pub fn less_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    a + eps < b
}

/// `a <= b` within `eps`.
pub fn less_or_equal_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    a <= b + eps
}

/// `a > b` by more than `eps`.
pub fn greater_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    a > b + eps
}

/// `a >= b` within `eps`.
pub fn greater_or_equal_eps<T: Epsilon>(a: T, b: T, eps: T) -> bool {
    a + eps >= b
}

/// Three-way comparison within `eps`.
pub fn compare_eps<T: Epsilon>(a: T, b: T, eps: T) -> Ordering {
    if less_eps(a, b, eps) {
        Ordering::Less
    } else if greater_eps(a, b, eps) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// `a == b` within the type's default epsilon.
pub fn equal<T: Epsilon>(a: T, b: T) -> bool {
    equal_eps(a, b, T::EPSILON)
}

/// `a != b` within the type's default epsilon.
pub fn not_equal<T: Epsilon>(a: T, b: T) -> bool {
    not_equal_eps(a, b, T::EPSILON)
}

/// `a < b` within the type's default epsilon.
pub fn less<T: Epsilon>(a: T, b: T) -> bool {
    less_eps(a, b, T::EPSILON)
}

/// `a <= b` within the type's default epsilon.
pub fn less_or_equal<T: Epsilon>(a: T, b: T) -> bool {
    less_or_equal_eps(a, b, T::EPSILON)
}

/// `a > b` within the type's default epsilon.
pub fn greater<T: Epsilon>(a: T, b: T) -> bool {
    greater_eps(a, b, T::EPSILON)
}

/// `a >= b` within the type's default epsilon.
pub fn greater_or_equal<T: Epsilon>(a: T, b: T) -> bool {
    greater_or_equal_eps(a, b, T::EPSILON)
}

/// Three-way comparison within the type's default epsilon.
pub fn compare<T: Epsilon>(a: T, b: T) -> Ordering {
    compare_eps(a, b, T::EPSILON)
}

/// `x * x`.
pub fn sqr<T: Mul<Output = T> + Copy>(x: T) -> T {
    x * x
}

/// Clamp `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics; with `lo > hi` the result is `lo`.
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
