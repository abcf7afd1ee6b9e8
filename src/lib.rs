#![cfg_attr(not(test), no_std)]

//! Signed 128-bit fixed-point arithmetic in Q64.64 representation: 64 integer bits, 64
//! fractional bits, two's-complement sign, every bit pattern a valid value (no NaN, no
//! infinity). Built on wide-multiply/divide primitives ([`wide`]) and a Knuth two-digit long
//! division for the 256-by-128 step that the multiply and divide operations both need.
//!
//! ```
//! use qfix::Qfix;
//! let price = Qfix::from_double(19.99);
//! let quantity = Qfix::from_int(3);
//! assert_eq!((price * quantity).to_double(), 59.97);
//! ```

mod error;
mod qfix;
mod util;
mod wide;

pub use error::ParseQfixError;
pub use qfix::fmt_impl::{FormatOptions, Sign};
pub use qfix::Qfix;
pub use util::{decimal_point, set_decimal_point};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_surface_is_reachable() {
        let a = Qfix::from_int(3);
        let b = Qfix::from_int(7);
        assert_eq!((a * b).to_int(), 21);
        assert_eq!(decimal_point(), b'.');
    }
}
