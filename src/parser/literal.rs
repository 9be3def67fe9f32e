//! Sign+magnitude number literals
//!
//! A number parameter is a symbol run terminated by `LINE_FEED`. The first
//! symbol is the sign (`SPACE` non-negative, `TAB` negative); every symbol
//! after it is one binary digit of the magnitude, most significant first
//! (`SPACE` = 0, `TAB` = 1). Magnitudes are unbounded.
//!
//! ```text
//! S T S T L   →  +0b101 =  5
//! T T T L     →  -0b11  = -3
//! S L         →   0
//! ```

use super::instruction::Symbol;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Decode a sign+magnitude run (terminator excluded).
///
/// Returns `None` for an empty run or one containing a `LINE_FEED`.
pub fn decode_number(symbols: &[Symbol]) -> Option<BigInt> {
    let (sign, bits) = symbols.split_first()?;

    let mut magnitude = BigUint::zero();
    for bit in bits {
        let digit: u32 = match bit {
            Symbol::Space => 0,
            Symbol::Tab => 1,
            Symbol::LineFeed => return None,
        };
        magnitude = magnitude * 2u32 + digit;
    }

    let sign = match sign {
        Symbol::Space => Sign::Plus,
        Symbol::Tab => Sign::Minus,
        Symbol::LineFeed => return None,
    };
    Some(BigInt::from_biguint(sign, magnitude))
}

/// Encode a number as sign, magnitude bits and the terminating `LINE_FEED`.
///
/// Zero is encoded as the bare sign.
pub fn encode_number(value: &BigInt) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    symbols.push(if value.sign() == Sign::Minus {
        Symbol::Tab
    } else {
        Symbol::Space
    });

    if !value.is_zero() {
        symbols.extend(value.magnitude().to_radix_be(2).into_iter().map(|digit| {
            if digit == 0 {
                Symbol::Space
            } else {
                Symbol::Tab
            }
        }));
    }

    symbols.push(Symbol::LineFeed);
    symbols
}
