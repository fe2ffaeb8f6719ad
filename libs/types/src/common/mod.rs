//! Shared identifiers and error types

pub mod errors;
pub mod identifiers;
