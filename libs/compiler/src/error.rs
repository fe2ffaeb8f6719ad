//! Compilation, ABI and configuration errors

use codec::DecodeError;
use thiserror::Error;
use types::EncodingError;

/// Errors raised while compiling a batch
///
/// Encoding failures come from malformed caller input and abort the whole
/// compilation; no partial batch is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A packer rejected an input value
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// An instruction's token is missing from the table built for the same batch.
    /// Indicates a compiler defect, not bad input.
    #[error("Unresolved token reference {token} in operation {operation}, instruction {instruction}")]
    UnresolvedReference {
        token: String,
        operation: usize,
        instruction: usize,
    },

    /// More distinct tokens than the configured table limit
    #[error("Token table too large: {count} distinct tokens, limit is {limit}")]
    TooManyTokens { count: usize, limit: usize },

    /// More operations than the configured batch limit
    #[error("Too many operations: {count}, limit is {limit}")]
    TooManyOperations { count: usize, limit: usize },

    /// One operation carries more instructions than the configured limit
    #[error("Operation {operation} has {count} instructions, limit is {limit}")]
    TooManyInstructions {
        operation: usize,
        count: usize,
        limit: usize,
    },
}

/// A compiled batch assembled from outside parts breaks its own shape
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Deposits length {deposits} does not match token table length {tokens}")]
    DepositCountMismatch { tokens: usize, deposits: usize },

    #[error("Operation {operation}, instruction {instruction}: token index {index} outside table of {tokens}")]
    TokenIndexOutOfRange {
        operation: usize,
        instruction: usize,
        index: u8,
        tokens: usize,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors raised while building or reading `execute` calldata
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("ABI encoding failed: {0}")]
    Ethabi(#[from] ethabi::Error),

    #[error("Calldata too short: {len} bytes")]
    TooShort { len: usize },

    #[error("Selector mismatch: expected 0x{expected}, got 0x{got}")]
    SelectorMismatch { expected: String, got: String },

    #[error("Unexpected ABI value for {field}")]
    UnexpectedToken { field: &'static str },

    #[error("Deposit value does not fit int128: {value}")]
    DepositOutOfRange { value: String },

    #[error("Deposits length {deposits} does not match token table length {tokens}")]
    DepositCountMismatch { tokens: usize, deposits: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Errors raised while loading compiler configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
