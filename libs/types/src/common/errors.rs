//! Error types for data-model construction and fixed-width encoding
//!
//! Every variant describes malformed caller input: a value that does not fit
//! its declared field width, a name or byte that maps to no known enum
//! member, an amount outside the signed 128-bit range, or text that could not
//! be parsed at all.

use thiserror::Error;

/// Errors raised while building or packing vault references and amounts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Value does not fit the fixed-width field it is packed into
    #[error("{field} value {value} out of range: maximum is {max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        max: u128,
    },

    /// Name or discriminant byte maps to no known enum member
    #[error("Unknown {field}: {value:?}")]
    UnknownKind { field: &'static str, value: String },

    /// Amount is outside [-2^127, 2^127 - 1]
    #[error("Amount {value} overflows a signed 128-bit integer")]
    Overflow { value: String },

    /// Input text could not be parsed
    #[error("Malformed {field}: {input:?} ({reason})")]
    Malformed {
        field: &'static str,
        input: String,
        reason: String,
    },
}

impl EncodingError {
    pub fn out_of_range(field: &'static str, value: impl ToString, max: u128) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            max,
        }
    }

    pub fn unknown_kind(field: &'static str, value: impl ToString) -> Self {
        Self::UnknownKind {
            field,
            value: value.to_string(),
        }
    }

    pub fn overflow(value: impl ToString) -> Self {
        Self::Overflow {
            value: value.to_string(),
        }
    }

    pub fn malformed(field: &'static str, input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Malformed {
            field,
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EncodingError::out_of_range("token id", 7u8, 5);
        assert_eq!(err.to_string(), "token id value 7 out of range: maximum is 5");

        let err = EncodingError::unknown_kind("amount kind", "maybe");
        assert_eq!(err.to_string(), "Unknown amount kind: \"maybe\"");

        let err = EncodingError::overflow("170141183460469231731687303715884105728");
        assert!(err.to_string().starts_with("Amount 170141183460469231731687303715884105728"));
    }
}
