//! Vault-facing references and amounts
//!
//! ```text
//! TokenReference   { kind, id, address }   → token table entries
//! OperationTarget  Pool | Gauge            → operation addressees
//! Reference        Token | Target          → "a reference" wherever either fits
//! AmountKind       exactly | at most | all → amount policy
//! SignedAmount     + user pays, − user receives
//! ```

pub mod amount;
pub mod target;
pub mod token;

pub use amount::{AmountKind, Direction, SignedAmount};
pub use target::{OperationTarget, Reference};
pub use token::{TokenId, TokenKind, TokenReference};
