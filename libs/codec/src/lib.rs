//! # Vault Descriptor Codec
//!
//! ## Purpose
//!
//! The "rules" layer between the typed data model and the bytes the vault
//! reads. Every packer here is a pure function of its inputs with a fixed,
//! versionless output width:
//!
//! - **Reference descriptors** (36 bytes): tokens, pools and gauges
//! - **Amount instructions** (32 bytes): token index, amount kind, signed amount
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → libs/compiler
//!     ↑           ↓            ↓
//! Typed refs  Fixed layouts  Token table + compiled operations
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Token table construction or index resolution (belongs in the compiler)
//! - ABI encoding of the vault call
//!
//! The pool/gauge discriminant bytes (`0x00`/`0x01`) reuse values of the token
//! kind byte (`0..=2`). Decoders therefore take the slot's namespace from the
//! caller: `decode_token` for token-table entries, `decode_target` for pool and
//! gauge operation references.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod reference;

pub use constants::*;
pub use error::{DecodeError, DecodeResult};
pub use instruction::{
    decode_instruction, encode_instruction, encode_instruction_raw, DecodedInstruction,
    InstructionBytes,
};
pub use reference::{
    decode_target, decode_token, encode_gauge, encode_pool, encode_reference, encode_target,
    encode_token, encode_token_raw, encode_token_reference, ReferenceBytes,
};

// Encoding failures are data-model errors; re-exported so callers need one import
pub use types::EncodingError;
