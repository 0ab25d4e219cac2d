//! Reading and writing fractions as text.
//!
//! The serialized form is exactly `"<numerator>/<denominator>"`; since a
//! [`Fraction`] is always canonical, no reduction happens on output. Input
//! comes in two shapes, read from a whitespace-delimited token stream:
//!
//!   - two integer tokens, numerator then denominator, taken exactly;
//!   - a single float token, which must be the only value on the stream and
//!     is approximated to three decimal digits via [`Fraction::from_float`].
//!
//! A token that fully parses as an integer selects the integer-pair form; a
//! token that only *partially* parses as an integer (like `2.5`) falls
//! through to the float form. Anything else is a format error.

use std::fmt::{self, Display};
use std::io::BufRead;
use std::str::FromStr;

use nom::character::complete::{char, i32};
use nom::combinator::all_consuming;
use nom::number::complete::float;
use nom::sequence::separated_pair;
use nom::IResult;

use crate::fraction::{BaseInt, Fraction, FractionError};

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}

/// Parses the serialized `"n/d"` form, the round-trip partner of [`Display`].
impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: IResult<&str, (BaseInt, BaseInt)> =
            all_consuming(separated_pair(i32, char('/'), i32))(s);
        let (_, (numerator, denominator)) = parsed
            .map_err(|_| FractionError::StreamFormat(format!("{s:?} is not of the form n/d")))?;
        Fraction::new(numerator, denominator)
    }
}

/// A token that is an integer in its entirety, like `-17` but not `2.5`.
fn integer_token(token: &str) -> Option<BaseInt> {
    let parsed: IResult<&str, BaseInt> = all_consuming(i32)(token);
    parsed.ok().map(|(_, n)| n)
}

/// A token that is a float in its entirety, like `2.5` or `-3e2`.
fn float_token(token: &str) -> Option<f32> {
    let parsed: IResult<&str, f32> = all_consuming(float)(token);
    parsed.ok().map(|(_, x)| x)
}

/// A whitespace-delimited token reader over a buffered input, with one-token
/// lookahead and a sticky failure flag, so embedders can poll the stream
/// state as well as inspect the returned error.
pub struct TokenReader<R> {
    input: R,
    peeked: Option<String>,
    failed: bool,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            peeked: None,
            failed: false,
        }
    }

    /// Whether a previous read on this stream failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn fail(&mut self) {
        self.failed = true;
    }

    /// The next token, or `None` if the stream is exhausted. I/O errors mark
    /// the stream failed and read as exhaustion.
    pub fn next_token(&mut self) -> Option<String> {
        if let Some(token) = self.peeked.take() {
            return Some(token);
        }
        match self.read_token() {
            Ok(token) => token,
            Err(_) => {
                self.failed = true;
                None
            }
        }
    }

    /// The next token without consuming it.
    pub fn peek_token(&mut self) -> Option<&str> {
        if self.peeked.is_none() {
            self.peeked = self.next_token();
        }
        self.peeked.as_deref()
    }

    fn read_token(&mut self) -> std::io::Result<Option<String>> {
        let mut token = Vec::new();
        loop {
            let (used, done) = {
                let buf = self.input.fill_buf()?;
                if buf.is_empty() {
                    (0, true)
                } else {
                    let mut used = 0;
                    let mut done = false;
                    for &byte in buf {
                        if byte.is_ascii_whitespace() {
                            used += 1;
                            if !token.is_empty() {
                                done = true;
                                break;
                            }
                        } else {
                            token.push(byte);
                            used += 1;
                        }
                    }
                    (used, done)
                }
            };
            self.input.consume(used);
            if done {
                break;
            }
        }
        if token.is_empty() {
            Ok(None)
        } else {
            // non-UTF-8 input can't be a number either way
            Ok(String::from_utf8(token).ok())
        }
    }
}

impl Fraction {
    /// Reads one fraction from a token stream: either an integer pair
    /// `numerator denominator`, or a single float token with nothing after
    /// it. On any error the stream is marked failed and nothing is consumed
    /// beyond the offending token.
    pub fn read_from<R: BufRead>(stream: &mut TokenReader<R>) -> Result<Self, FractionError> {
        let result = Self::read_from_inner(stream);
        if result.is_err() {
            stream.fail();
        }
        result
    }

    fn read_from_inner<R: BufRead>(stream: &mut TokenReader<R>) -> Result<Self, FractionError> {
        let token = stream
            .next_token()
            .ok_or_else(|| FractionError::StreamFormat("empty input".to_owned()))?;

        if let Some(numerator) = integer_token(&token) {
            // integer-pair mode: a second integer token is mandatory
            let den_token = stream.next_token().ok_or_else(|| {
                FractionError::StreamFormat("missing denominator after integer numerator".to_owned())
            })?;
            let denominator = integer_token(&den_token).ok_or_else(|| {
                FractionError::StreamFormat(format!("expected an integer denominator, got {den_token:?}"))
            })?;
            if denominator == 0 {
                return Err(FractionError::ZeroDenominatorToken);
            }
            Fraction::new(numerator, denominator)
        } else if let Some(value) = float_token(&token) {
            let frac = Fraction::from_float(value)?;
            // a float must be the sole value on the stream
            if let Some(extra) = stream.peek_token() {
                return Err(FractionError::StreamFormat(format!(
                    "unexpected extra token {extra:?} after float value"
                )));
            }
            Ok(frac)
        } else {
            Err(FractionError::StreamFormat(format!(
                "{token:?} is not an integer or a float"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frac;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn read_str(input: &str) -> Result<Fraction, FractionError> {
        Fraction::read_from(&mut TokenReader::new(Cursor::new(input)))
    }

    fn assert_fields(frac: Fraction, numerator: BaseInt, denominator: BaseInt) {
        assert_eq!((frac.numerator(), frac.denominator()), (numerator, denominator));
    }

    #[test]
    fn test_display() {
        assert_eq!(frac!(3 / 4).to_string(), "3/4");
        assert_eq!(frac!(-1 / 2).to_string(), "-1/2");
        assert_eq!(Fraction::new(2, -4).unwrap().to_string(), "-1/2");
        assert_eq!(Fraction::ZERO.to_string(), "0/1");
    }

    #[test]
    fn test_from_str() {
        assert_fields("3/4".parse().unwrap(), 3, 4);
        assert_fields("-6/8".parse().unwrap(), -3, 4);
        assert!(matches!(
            "abc".parse::<Fraction>(),
            Err(FractionError::StreamFormat(_))
        ));
        assert!(matches!(
            "3/4/5".parse::<Fraction>(),
            Err(FractionError::StreamFormat(_))
        ));
        assert_eq!("3/0".parse::<Fraction>(), Err(FractionError::ZeroDenominator));
    }

    #[test]
    fn test_display_parse_round_trip() {
        for frac in [frac!(3 / 4), frac!(-1 / 2), Fraction::ZERO, frac!(7)] {
            let reparsed: Fraction = frac.to_string().parse().unwrap();
            assert_fields(reparsed, frac.numerator(), frac.denominator());
        }
    }

    #[test]
    fn test_read_integer_pair() {
        assert_fields(read_str("3 4").unwrap(), 3, 4);
        assert_fields(read_str("  -6\n\t 8 ").unwrap(), -3, 4);
    }

    #[test]
    fn test_read_float() {
        assert_fields(read_str("2.5").unwrap(), 5, 2);
        assert_fields(read_str("-0.5").unwrap(), -1, 2);
        assert_fields(read_str("  0.125\n").unwrap(), 1, 8);
    }

    #[test]
    fn test_read_float_with_trailing_token() {
        assert!(matches!(
            read_str("2.5 7"),
            Err(FractionError::StreamFormat(_))
        ));
    }

    #[test]
    fn test_read_zero_denominator_token() {
        assert_eq!(read_str("5 0"), Err(FractionError::ZeroDenominatorToken));
    }

    #[test]
    fn test_read_garbage() {
        assert!(matches!(read_str("abc"), Err(FractionError::StreamFormat(_))));
        assert!(matches!(read_str(""), Err(FractionError::StreamFormat(_))));
        assert!(matches!(read_str("3 x"), Err(FractionError::StreamFormat(_))));
        assert!(matches!(read_str("3"), Err(FractionError::StreamFormat(_))));
    }

    #[test]
    fn test_read_rejects_partial_float_token() {
        // the float arm is all-or-nothing: a prefix-parsable token like
        // "2.5x" is a format error, not 2.5
        assert!(matches!(
            read_str("2.5x"),
            Err(FractionError::StreamFormat(_))
        ));
        assert!(matches!(
            read_str("1.0e"),
            Err(FractionError::StreamFormat(_))
        ));
    }

    #[test]
    fn test_read_marks_stream_failed() {
        let mut stream = TokenReader::new(Cursor::new("abc"));
        assert!(!stream.failed());
        assert!(Fraction::read_from(&mut stream).is_err());
        assert!(stream.failed());

        let mut ok_stream = TokenReader::new(Cursor::new("3 4"));
        assert!(Fraction::read_from(&mut ok_stream).is_ok());
        assert!(!ok_stream.failed());
    }

    #[test]
    fn test_read_successive_values() {
        let mut stream = TokenReader::new(Cursor::new("1 2 -3 9"));
        assert_fields(Fraction::read_from(&mut stream).unwrap(), 1, 2);
        assert_fields(Fraction::read_from(&mut stream).unwrap(), -1, 3);
        assert!(stream.peek_token().is_none());
    }

    proptest! {
        #[test]
        fn prop_display_parse_round_trip(
            n in -1_000_000i32..=1_000_000,
            d in 1i32..=1_000_000,
        ) {
            let frac = Fraction::new(n, d).unwrap();
            let reparsed: Fraction = frac.to_string().parse().unwrap();
            prop_assert_eq!(reparsed.numerator(), frac.numerator());
            prop_assert_eq!(reparsed.denominator(), frac.denominator());
        }
    }
}
