//! Decoding errors for packed vault descriptors
//!
//! Encoding failures are reported with `types::EncodingError`; this module
//! covers the reverse direction, where a byte blob read back from a compiled
//! batch does not match the fixed layout.

use thiserror::Error;
use types::EncodingError;

/// Packed descriptor could not be read back
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Blob length differs from the fixed layout width
    #[error("Invalid {layout} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        layout: &'static str,
        expected: usize,
        got: usize,
    },

    /// Reserved field must be all zero
    #[error("Non-zero reserved field in amount instruction: 0x{reserved}")]
    NonZeroReserved { reserved: String },

    /// Pools and gauges have no sub-id
    #[error("Non-zero id field in pool/gauge reference: {id}")]
    NonZeroTargetId { id: u128 },

    /// Discriminant byte names no pool or gauge
    #[error("Unknown operation target discriminant {discriminant:#04x}: expected 0x00 (pool) or 0x01 (gauge)")]
    UnknownDiscriminant { discriminant: u8 },

    /// Field decoded but maps to no known kind
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl DecodeError {
    pub fn invalid_length(layout: &'static str, expected: usize, got: usize) -> Self {
        Self::InvalidLength {
            layout,
            expected,
            got,
        }
    }
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
