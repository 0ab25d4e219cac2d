//! A small embedding of the fraction reader: parses fractions from stdin and
//! echoes their canonical form, one per line.

use std::io;
use std::process::ExitCode;

use ratio32::{Fraction, TokenReader};

fn main() -> ExitCode {
    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());

    while tokens.peek_token().is_some() {
        match Fraction::read_from(&mut tokens) {
            Ok(frac) => println!("{frac}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
