//! # Layout Constants - Vault Descriptor Wire Format
//!
//! Field widths and offsets of the two fixed layouts the vault consumes.
//! The layout is versionless: these values are the format.
//!
//! ```text
//! reference descriptor (36 bytes)
//! ┌──────┬──────────────────────┬──────────────────────────────┐
//! │ kind │ id (uint120, BE)     │ address                      │
//! │  1   │ 15                   │ 20                           │
//! └──────┴──────────────────────┴──────────────────────────────┘
//!
//! amount instruction (32 bytes)
//! ┌───────┬──────┬────────────────┬──────────────────────────┐
//! │ index │ kind │ reserved (0)   │ amount (int128, BE)      │
//! │   1   │  1   │ 14             │ 16                       │
//! └───────┴──────┴────────────────┴──────────────────────────┘
//! ```

use types::TokenId;

pub const KIND_LEN: usize = 1;
pub const ID_LEN: usize = TokenId::BYTES;
pub const ADDRESS_LEN: usize = types::ADDRESS_LEN;

/// Packed token / pool / gauge descriptor width
pub const REFERENCE_LEN: usize = KIND_LEN + ID_LEN + ADDRESS_LEN;

pub const ID_OFFSET: usize = KIND_LEN;
pub const ADDRESS_OFFSET: usize = ID_OFFSET + ID_LEN;

pub const INDEX_LEN: usize = 1;
pub const AMOUNT_KIND_LEN: usize = 1;
pub const RESERVED_LEN: usize = 14;
pub const AMOUNT_LEN: usize = 16;

/// Packed amount instruction width
pub const INSTRUCTION_LEN: usize = INDEX_LEN + AMOUNT_KIND_LEN + RESERVED_LEN + AMOUNT_LEN;

pub const RESERVED_OFFSET: usize = INDEX_LEN + AMOUNT_KIND_LEN;
pub const AMOUNT_OFFSET: usize = RESERVED_OFFSET + RESERVED_LEN;

/// Largest token-table index an instruction can carry
pub const MAX_TOKEN_INDEX: usize = u8::MAX as usize;

/// Largest token table a batch can address
pub const MAX_TOKEN_TABLE_LEN: usize = MAX_TOKEN_INDEX + 1;

pub const POOL_DISCRIMINANT: u8 = types::OperationTarget::POOL_DISCRIMINANT;
pub const GAUGE_DISCRIMINANT: u8 = types::OperationTarget::GAUGE_DISCRIMINANT;
