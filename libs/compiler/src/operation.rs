//! Uncompiled operation descriptions, as handed in by the caller

use serde::{Deserialize, Serialize};
use types::{
    Address, AmountKind, EncodingError, OperationTarget, Reference, SignedAmount, TokenReference,
};

/// One amount instruction before its token is resolved to a table index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub token: TokenReference,
    pub kind: AmountKind,
    pub amount: SignedAmount,
}

impl Instruction {
    pub const fn new(token: TokenReference, kind: AmountKind, amount: SignedAmount) -> Self {
        Self {
            token,
            kind,
            amount,
        }
    }

    pub const fn exactly(token: TokenReference, amount: SignedAmount) -> Self {
        Self::new(token, AmountKind::Exactly, amount)
    }

    pub const fn at_most(token: TokenReference, amount: SignedAmount) -> Self {
        Self::new(token, AmountKind::AtMost, amount)
    }

    pub const fn all(token: TokenReference, amount: SignedAmount) -> Self {
        Self::new(token, AmountKind::All, amount)
    }

    /// Validate raw caller input: token address, optional token kind name
    /// (ERC-20 when absent), token id, amount kind name and decimal amount
    pub fn parse(
        token_address: &str,
        token_kind: Option<&str>,
        token_id: u128,
        amount_kind: &str,
        amount: &str,
    ) -> Result<Self, EncodingError> {
        Ok(Self::new(
            TokenReference::parse(token_kind, token_id, token_address)?,
            amount_kind.parse()?,
            amount.parse()?,
        ))
    }
}

/// A reference plus the amount instructions applied against it
///
/// Operation order is significant to the vault and is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub reference: Reference,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl Operation {
    pub fn new(reference: impl Into<Reference>, instructions: Vec<Instruction>) -> Self {
        Self {
            reference: reference.into(),
            instructions,
        }
    }

    pub fn pool(address: Address, instructions: Vec<Instruction>) -> Self {
        Self::new(OperationTarget::Pool(address), instructions)
    }

    pub fn gauge(address: Address, instructions: Vec<Instruction>) -> Self {
        Self::new(OperationTarget::Gauge(address), instructions)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenReference> + '_ {
        self.instructions.iter().map(|instruction| &instruction.token)
    }
}
