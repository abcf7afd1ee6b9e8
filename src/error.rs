use core::fmt;

/// Error returned by the idiomatic `FromStr`/`TryFrom<&str>` wrapper around [`crate::Qfix::parse`].
///
/// `parse` itself is total and never fails (it returns whatever it could make sense of, plus a
/// consumed-byte count); this type exists only for callers that want a `Result`-based API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseQfixError {
    /// Input string is empty.
    Empty,
    /// No numeric digits found in input.
    NoDigits,
    /// Unexpected characters after the numeric value.
    TrailingChars,
}

impl fmt::Display for ParseQfixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty string"),
            Self::NoDigits => f.write_str("no digits found"),
            Self::TrailingChars => f.write_str("trailing characters"),
        }
    }
}
