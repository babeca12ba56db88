//! Arbitrary-precision unsigned integers.
//!
//! [`BigUint`] holds its magnitude as base-2^32 digits, least significant
//! first, and never overflows under addition or multiplication. Products of two
//! big values go through Karatsuba multiplication, which falls back to the
//! quadratic school algorithm once an operand is at most
//! [`karatsuba_threshold`] digits long.

mod add;
mod div;
mod error;
mod mul;
mod ops;
mod sub;
mod text;
mod uint;

pub use error::BigError;
pub use mul::{karatsuba_threshold, set_karatsuba_threshold, DEFAULT_KARATSUBA_THRESHOLD};
pub use uint::{BigUint, Digit, LongDigit, DIGIT_BITS};
