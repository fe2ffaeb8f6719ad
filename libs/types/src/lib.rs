//! # Vault Batch Types
//!
//! Data model shared by the codec and the batch compiler.
//!
//! ## Design Philosophy
//!
//! - **Full-triple identity**: a token is `(kind, id, address)`, never an address alone
//! - **Checked widths**: token ids are limited to 120 bits at construction
//! - **Sign in the type**: `SignedAmount` carries the user-pays / user-receives convention
//! - **No state**: every value is plain `Copy` data
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Address, AmountKind, SignedAmount, TokenReference};
//!
//! let usdc = TokenReference::erc20(
//!     Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap(),
//! );
//! let kind: AmountKind = "at most".parse().unwrap();
//! let owed = SignedAmount::receive(1235).unwrap();
//! assert!(owed.get() < 0);
//! # let _ = (usdc, kind);
//! ```

pub mod common;
pub mod vault;

pub use common::errors::EncodingError;
pub use common::identifiers::{Address, ADDRESS_LEN};
pub use vault::{
    AmountKind, Direction, OperationTarget, Reference, SignedAmount, TokenId, TokenKind,
    TokenReference,
};
