//! Runtime value representation
//!
//! Every stack slot, heap address and heap cell holds a [`Value`]: a signed
//! integer of unbounded size. There are no other runtime types; characters
//! are just their Unicode scalar values.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Runtime values in the interpreter
pub type Value = BigInt;

/// Interpret a value as a character, if it is a Unicode scalar value
pub fn as_char(value: &Value) -> Option<char> {
    value.to_u32().and_then(char::from_u32)
}

/// Interpret a value as a non-negative stack index or count
pub fn as_index(value: &Value) -> Option<usize> {
    value.to_usize()
}

/// Rough memory footprint, used for snapshot budgeting
pub fn estimated_size(value: &Value) -> usize {
    // BigInt header plus digit storage
    24 + (value.bits() as usize).div_ceil(8)
}
