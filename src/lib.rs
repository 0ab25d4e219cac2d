//! Exact rational arithmetic over signed 32-bit integers.
//!
//! The crate centers on one value type, [`Fraction`]: a numerator/denominator
//! pair kept in reduced form with a positive denominator across every
//! construction and mutation. All arithmetic that combines numerators or
//! denominators is overflow-checked, mixed fraction/`f32` operators promote
//! the float through the explicit three-decimal-digit [`Fraction::from_float`]
//! conversion, and the text codec reads either an integer pair or a lone
//! float literal from a whitespace-delimited token stream.
//!
//! ```
//! use ratio32::{frac, Fraction};
//!
//! let sum = frac!(1 / 2).try_add(frac!(1 / 3))?;
//! assert_eq!(sum.to_string(), "5/6");
//!
//! let half = Fraction::from_float(0.5)?;
//! assert_eq!(half.numerator(), 1);
//! assert_eq!(half.denominator(), 2);
//! # Ok::<(), ratio32::FractionError>(())
//! ```

pub mod checked;
pub mod fraction;
pub mod text;

pub use fraction::{BaseInt, Fraction, FractionError};
pub use text::TokenReader;
