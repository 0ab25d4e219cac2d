//! Overflow-checked 32-bit arithmetic primitives.
//!
//! Every multiplication, addition, and subtraction that combines fraction
//! numerators or denominators goes through these functions instead of raw
//! machine arithmetic. The true result is computed in 64 bits and rejected
//! with [`FractionError::Overflow`] if it falls outside the 32-bit signed
//! range, so an out-of-range value is reported before a corrupted fraction
//! can ever be constructed.

use crate::fraction::{BaseInt, FractionError};

fn narrow(wide: i64) -> Result<BaseInt, FractionError> {
    if wide < BaseInt::MIN as i64 || wide > BaseInt::MAX as i64 {
        Err(FractionError::Overflow)
    } else {
        Ok(wide as BaseInt)
    }
}

/// Multiplies two 32-bit integers, failing if the product is unrepresentable.
pub fn mul(a: BaseInt, b: BaseInt) -> Result<BaseInt, FractionError> {
    narrow(a as i64 * b as i64)
}

/// Adds two 32-bit integers, failing if the sum is unrepresentable.
pub fn add(a: BaseInt, b: BaseInt) -> Result<BaseInt, FractionError> {
    narrow(a as i64 + b as i64)
}

/// Subtracts `b` from `a`, failing if the difference is unrepresentable.
pub fn sub(a: BaseInt, b: BaseInt) -> Result<BaseInt, FractionError> {
    narrow(a as i64 - b as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_in_range() {
        assert_eq!(mul(-4, 6), Ok(-24));
        assert_eq!(add(i32::MAX - 1, 1), Ok(i32::MAX));
        assert_eq!(sub(i32::MIN + 1, 1), Ok(i32::MIN));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(mul(2_000_000_000, 2), Err(FractionError::Overflow));
        assert_eq!(mul(i32::MIN, -1), Err(FractionError::Overflow));
        assert_eq!(add(i32::MAX, 1), Err(FractionError::Overflow));
        assert_eq!(sub(i32::MIN, 1), Err(FractionError::Overflow));
    }
}
