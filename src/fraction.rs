//! An exact rational value over a pair of signed 32-bit integers.
//!
//! A [`Fraction`] is always held in reduced form with a positive denominator:
//! both fields are divided by their greatest common divisor at the end of
//! every constructing and mutating operation, and the sign always lives in
//! the numerator. Arithmetic between two fractions, or between a fraction and
//! an `f32`, detects 32-bit overflow instead of wrapping (see [`crate::checked`]).

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{FromPrimitive, Num, One, Signed, Zero};
use thiserror::Error;

use crate::checked;

/// The base integer type for numerators and denominators.
pub type BaseInt = i32;

/// The scale used when converting floats: a float becomes
/// `round(x * FLOAT_SCALE) / FLOAT_SCALE`, i.e. three decimal digits.
pub const FLOAT_SCALE: BaseInt = 1000;

/// Everything that can go wrong constructing, combining, or reading a
/// [`Fraction`]. Errors are returned at the point of detection; no partially
/// constructed value is ever handed back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FractionError {
    #[error("cannot create a fraction with a denominator of 0")]
    ZeroDenominator,
    #[error("cannot divide by 0")]
    DivisionByZero,
    #[error("arithmetic overflow outside the 32-bit signed range")]
    Overflow,
    #[error("invalid fraction input: {0}")]
    StreamFormat(String),
    #[error("read 0 as a denominator from the input stream")]
    ZeroDenominatorToken,
}

/// A rational number `numerator / denominator` in reduced form.
///
/// Equality is *approximate*: two fractions compare equal when their `f32`
/// values agree after truncation to three decimal digits, matching the
/// precision of [`Fraction::from_float`]. Ordering, by contrast, is exact.
/// Both behaviors are deliberate; see the respective impls.
#[derive(Debug, Clone, Copy)]
pub struct Fraction {
    numerator: BaseInt,
    denominator: BaseInt,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Fraction = Fraction {
        numerator: 1,
        denominator: 1,
    };

    /// Creates the fraction `numerator / denominator`.
    ///
    /// Fails with [`FractionError::ZeroDenominator`] if `denominator == 0`.
    /// A negative denominator is canonicalized by negating both fields, and
    /// the result is reduced to lowest terms. Exact: integer inputs lose no
    /// precision.
    pub fn new(numerator: BaseInt, denominator: BaseInt) -> Result<Self, FractionError> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        let (numerator, denominator) = if denominator < 0 {
            (checked::sub(0, numerator)?, checked::sub(0, denominator)?)
        } else {
            (numerator, denominator)
        };
        let mut value = Self {
            numerator,
            denominator,
        };
        value.reduce();
        Ok(value)
    }

    /// Approximates a float as a fraction with three decimal digits of
    /// precision: the numerator is `round(x * 1000)` and the denominator is
    /// 1000, reduced. This is a deliberate fixed-precision, lossy conversion,
    /// not an exact binary-fraction one: `from_float(0.5)` is exactly `1/2`,
    /// but anything beyond the third decimal digit is dropped.
    ///
    /// Fails with [`FractionError::Overflow`] if `x` is not finite or
    /// `round(x * 1000)` does not fit in 32 bits.
    pub fn from_float(x: f32) -> Result<Self, FractionError> {
        if !x.is_finite() {
            return Err(FractionError::Overflow);
        }
        let scaled = (x * FLOAT_SCALE as f32).round() as i64;
        if scaled < BaseInt::MIN as i64 || scaled > BaseInt::MAX as i64 {
            return Err(FractionError::Overflow);
        }
        Self::new(scaled as BaseInt, FLOAT_SCALE)
    }

    /// The numerator. Carries the sign of the fraction.
    pub fn numerator(&self) -> BaseInt {
        self.numerator
    }

    /// The denominator. Always positive.
    pub fn denominator(&self) -> BaseInt {
        self.denominator
    }

    /// The `f32` value of the fraction.
    pub fn to_f32(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }

    /// The greatest common divisor of two integers, always non-negative.
    /// `gcd(0, n)` is `|n|`. The loop runs on unsigned magnitudes, so
    /// `i32::MIN` inputs don't overflow; the one unrepresentable result, a
    /// true gcd of 2^31, wraps to `i32::MIN`.
    pub const fn gcd(a: BaseInt, b: BaseInt) -> BaseInt {
        let mut a = a.unsigned_abs();
        let mut b = b.unsigned_abs();
        while b != 0 {
            let r = a % b;
            a = b;
            b = r;
        }
        a as BaseInt
    }

    /// Divides both fields by their gcd. Every path that changes the
    /// numerator or denominator ends with this, after sign canonicalization,
    /// so a fraction is never observable in unreduced form.
    fn reduce(&mut self) -> &mut Self {
        let g = Self::gcd(self.numerator, self.denominator);
        self.numerator /= g;
        self.denominator /= g;
        self
    }

    /// The least common multiple of two (positive) denominators,
    /// `|d1 * d2| / gcd(d1, d2)`, failing if it does not fit in 32 bits.
    fn lcm(d1: BaseInt, d2: BaseInt) -> Result<BaseInt, FractionError> {
        let wide = (d1 as i64 * d2 as i64).abs() / Self::gcd(d1, d2) as i64;
        if wide > BaseInt::MAX as i64 {
            return Err(FractionError::Overflow);
        }
        Ok(wide as BaseInt)
    }

    /// Adds two fractions by aligning them to the least common multiple of
    /// their denominators. Every intermediate multiply and the final add are
    /// overflow-checked; the result is reduced.
    pub fn try_add(self, rhs: Self) -> Result<Self, FractionError> {
        let lcm = Self::lcm(self.denominator, rhs.denominator)?;
        let mult1 = lcm / self.denominator;
        let mult2 = lcm / rhs.denominator;
        let numerator = checked::add(
            checked::mul(mult1, self.numerator)?,
            checked::mul(mult2, rhs.numerator)?,
        )?;
        Self::new(numerator, checked::mul(self.denominator, mult1)?)
    }

    /// Subtracts `rhs` from `self`; same alignment and checking as [`Fraction::try_add`].
    pub fn try_sub(self, rhs: Self) -> Result<Self, FractionError> {
        let lcm = Self::lcm(self.denominator, rhs.denominator)?;
        let mult1 = lcm / self.denominator;
        let mult2 = lcm / rhs.denominator;
        let numerator = checked::sub(
            checked::mul(mult1, self.numerator)?,
            checked::mul(mult2, rhs.numerator)?,
        )?;
        Self::new(numerator, checked::mul(mult1, self.denominator)?)
    }

    /// Multiplies two fractions, checking both field products for overflow.
    pub fn try_mul(self, rhs: Self) -> Result<Self, FractionError> {
        Self::new(
            checked::mul(self.numerator, rhs.numerator)?,
            checked::mul(self.denominator, rhs.denominator)?,
        )
    }

    /// Divides `self` by `rhs`, i.e. multiplies by its reciprocal.
    ///
    /// Fails with [`FractionError::DivisionByZero`] if `rhs` is zero. A
    /// negative divisor is handled by the sign canonicalization in
    /// [`Fraction::new`].
    pub fn try_div(self, rhs: Self) -> Result<Self, FractionError> {
        if rhs.numerator == 0 {
            return Err(FractionError::DivisionByZero);
        }
        Self::new(
            checked::mul(self.numerator, rhs.denominator)?,
            checked::mul(self.denominator, rhs.numerator)?,
        )
    }

    /// The remainder of truncating division: `self - trunc(self / rhs) * rhs`.
    /// Shares the zero-divisor and overflow checks of [`Fraction::try_div`].
    pub fn try_rem(self, rhs: Self) -> Result<Self, FractionError> {
        let quotient = self.try_div(rhs)?;
        // i32 division truncates toward zero, which is what we want here
        let whole = Self::from(quotient.numerator / quotient.denominator);
        self.try_sub(whole.try_mul(rhs)?)
    }

    /// Exact ordering: both numerators are scaled to the common denominator
    /// and compared. The scaling runs entirely in 64 bits, so it is total
    /// over all valid fractions and cannot overflow.
    pub fn compare(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = self.aligned_numerators(other);
        lhs.cmp(&rhs)
    }

    // Both products are bounded by 2^31 * 2^31, well inside i64.
    fn aligned_numerators(&self, other: &Self) -> (i64, i64) {
        let g = Self::gcd(self.denominator, other.denominator) as i64;
        let lcm = self.denominator as i64 * other.denominator as i64 / g;
        (
            self.numerator as i64 * (lcm / self.denominator as i64),
            other.numerator as i64 * (lcm / other.denominator as i64),
        )
    }

    /// Pre-increment: adds the denominator to the numerator (`+= 1`),
    /// reduces, and returns the mutated receiver. The numerator adjustment is
    /// overflow-checked.
    pub fn increment(&mut self) -> Result<&mut Self, FractionError> {
        self.numerator = checked::add(self.numerator, self.denominator)?;
        Ok(self.reduce())
    }

    /// Pre-decrement: subtracts the denominator from the numerator (`-= 1`).
    pub fn decrement(&mut self) -> Result<&mut Self, FractionError> {
        self.numerator = checked::sub(self.numerator, self.denominator)?;
        Ok(self.reduce())
    }

    /// Post-increment: increments the receiver but returns the value it held
    /// before.
    pub fn post_increment(&mut self) -> Result<Self, FractionError> {
        let snapshot = *self;
        self.increment()?;
        Ok(snapshot)
    }

    /// Post-decrement: decrements the receiver but returns the value it held
    /// before.
    pub fn post_decrement(&mut self) -> Result<Self, FractionError> {
        let snapshot = *self;
        self.decrement()?;
        Ok(snapshot)
    }

    // The float value truncated to three decimal digits, the precision
    // equality is defined at. The intermediate cast saturates at the 32-bit
    // range for very large values.
    fn truncated_value(&self) -> f32 {
        let value = self.to_f32();
        (value * FLOAT_SCALE as f32) as BaseInt as f32 / FLOAT_SCALE as f32
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<BaseInt> for Fraction {
    fn from(n: BaseInt) -> Self {
        // n/1 is already reduced
        Self {
            numerator: n,
            denominator: 1,
        }
    }
}

impl From<Fraction> for f32 {
    fn from(value: Fraction) -> Self {
        value.to_f32()
    }
}

impl From<Fraction> for f64 {
    fn from(value: Fraction) -> Self {
        value.numerator as f64 / value.denominator as f64
    }
}

/// Equality up to three decimal places: each operand's `f32` value is
/// truncated to three decimal digits before comparison, mirroring the
/// precision of [`Fraction::from_float`]. This can equate fractions that are
/// mathematically distinct beyond the third decimal digit, and is kept that
/// way on purpose; use [`Fraction::compare`] for exact ordering.
impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.truncated_value() == other.truncated_value()
    }
}

/// Exact ordering via [`Fraction::compare`]. Note the asymmetry with the
/// approximate [`PartialEq`]: `partial_cmp` can return `Some(Less)` for
/// fractions that compare equal under `==`.
impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl PartialEq<f32> for Fraction {
    fn eq(&self, other: &f32) -> bool {
        Fraction::from_float(*other).map_or(false, |rhs| *self == rhs)
    }
}

impl PartialEq<Fraction> for f32 {
    fn eq(&self, other: &Fraction) -> bool {
        other == self
    }
}

impl PartialOrd<f32> for Fraction {
    /// `None` if the float cannot be converted to a fraction.
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        Fraction::from_float(*other)
            .ok()
            .map(|rhs| self.compare(&rhs))
    }
}

impl PartialOrd<Fraction> for f32 {
    fn partial_cmp(&self, other: &Fraction) -> Option<Ordering> {
        Fraction::from_float(*self)
            .ok()
            .map(|lhs| lhs.compare(other))
    }
}

// The operator traits are bound on top of the fallible named methods and
// panic on overflow or division by zero. Embedding code that needs to handle
// those cases calls `try_add` and friends directly.

impl Add for Fraction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.try_add(rhs) {
            Ok(sum) => sum,
            Err(err) => panic!("{} + {}: {}", self, rhs, err),
        }
    }
}

impl Sub for Fraction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(difference) => difference,
            Err(err) => panic!("{} - {}: {}", self, rhs, err),
        }
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_mul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{} * {}: {}", self, rhs, err),
        }
    }
}

impl Div for Fraction {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match self.try_div(rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("{} / {}: {}", self, rhs, err),
        }
    }
}

impl Rem for Fraction {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        match self.try_rem(rhs) {
            Ok(remainder) => remainder,
            Err(err) => panic!("{} % {}: {}", self, rhs, err),
        }
    }
}

impl Neg for Fraction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match checked::sub(0, self.numerator) {
            // negation never changes reducedness
            Ok(numerator) => Self {
                numerator,
                denominator: self.denominator,
            },
            Err(err) => panic!("-{}: {}", self, err),
        }
    }
}

// Mixed fraction/float operators. Each one promotes the float through the
// explicit `from_float` constructor and delegates to the all-fraction
// operator; there are no silent conversions anywhere else. Subtraction and
// division are order-sensitive, so the float-first forms convert the float
// into the left operand rather than swapping.

fn promote(value: f32) -> Fraction {
    match Fraction::from_float(value) {
        Ok(frac) => frac,
        Err(err) => panic!("converting {} to a fraction: {}", value, err),
    }
}

impl Add<f32> for Fraction {
    type Output = Fraction;

    fn add(self, rhs: f32) -> Fraction {
        self + promote(rhs)
    }
}

impl Add<Fraction> for f32 {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        rhs + self
    }
}

impl Sub<f32> for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: f32) -> Fraction {
        self - promote(rhs)
    }
}

impl Sub<Fraction> for f32 {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        promote(self) - rhs
    }
}

impl Mul<f32> for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: f32) -> Fraction {
        self * promote(rhs)
    }
}

impl Mul<Fraction> for f32 {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        rhs * self
    }
}

impl Div<f32> for Fraction {
    type Output = Fraction;

    fn div(self, rhs: f32) -> Fraction {
        // reject a zero literal before building the temporary
        if rhs == 0.0 {
            panic!("{} / {}: {}", self, rhs, FractionError::DivisionByZero);
        }
        self / promote(rhs)
    }
}

impl Div<Fraction> for f32 {
    type Output = Fraction;

    fn div(self, rhs: Fraction) -> Fraction {
        promote(self) / rhs
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }
}

impl Num for Fraction {
    type FromStrRadixErr = <BaseInt as Num>::FromStrRadixErr;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        BaseInt::from_str_radix(str, radix).map(Self::from)
    }
}

impl Signed for Fraction {
    fn abs(&self) -> Self {
        if self.is_negative() {
            -*self
        } else {
            *self
        }
    }

    /// The positive difference: `self - other` if `self > other`, else zero.
    fn abs_sub(&self, other: &Self) -> Self {
        if self.compare(other) == Ordering::Greater {
            *self - *other
        } else {
            Self::ZERO
        }
    }

    fn signum(&self) -> Self {
        Self::from(self.numerator.signum())
    }

    fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    fn is_negative(&self) -> bool {
        self.numerator < 0
    }
}

impl FromPrimitive for Fraction {
    fn from_i64(n: i64) -> Option<Self> {
        BaseInt::try_from(n).ok().map(Self::from)
    }

    fn from_u64(n: u64) -> Option<Self> {
        BaseInt::try_from(n).ok().map(Self::from)
    }

    fn from_f32(x: f32) -> Option<Self> {
        Self::from_float(x).ok()
    }

    fn from_f64(x: f64) -> Option<Self> {
        Self::from_float(x as f32).ok()
    }
}

impl AbsDiffEq for Fraction {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.to_f32().abs_diff_eq(&other.to_f32(), epsilon)
    }
}

impl RelativeEq for Fraction {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.to_f32().relative_eq(&other.to_f32(), epsilon, max_relative)
    }
}

/// Builds a [`Fraction`] from literals, panicking on a zero denominator.
/// `frac!(3 / 4)` is `Fraction::new(3, 4)`, `frac!(2)` is `2/1`.
#[macro_export]
macro_rules! frac {
    ($num:literal / $den:literal) => {
        match $crate::fraction::Fraction::new($num, $den) {
            Ok(frac) => frac,
            Err(err) => panic!("invalid fraction literal {}/{}: {}", $num, $den, err),
        }
    };
    ($num:expr) => {
        $crate::fraction::Fraction::from($num as $crate::fraction::BaseInt)
    };
}
