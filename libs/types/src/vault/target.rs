//! What a vault operation is addressed to

use crate::common::errors::EncodingError;
use crate::common::identifiers::Address;
use crate::vault::token::{TokenId, TokenKind, TokenReference};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A pool or gauge, the accounting entities operations act against
///
/// Packed with a literal discriminant byte (`0x00` pool, `0x01` gauge) in the
/// position a token descriptor keeps its kind byte. The two byte spaces
/// overlap, so a packed reference is only meaningful together with the slot
/// it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "address", rename_all = "lowercase")]
pub enum OperationTarget {
    Pool(Address),
    Gauge(Address),
}

impl OperationTarget {
    pub const POOL_DISCRIMINANT: u8 = 0x00;
    pub const GAUGE_DISCRIMINANT: u8 = 0x01;

    pub const fn discriminant(&self) -> u8 {
        match self {
            OperationTarget::Pool(_) => Self::POOL_DISCRIMINANT,
            OperationTarget::Gauge(_) => Self::GAUGE_DISCRIMINANT,
        }
    }

    pub const fn address(&self) -> Address {
        match self {
            OperationTarget::Pool(address) | OperationTarget::Gauge(address) => *address,
        }
    }
}

impl fmt::Display for OperationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationTarget::Pool(address) => write!(f, "pool:{}", address),
            OperationTarget::Gauge(address) => write!(f, "gauge:{}", address),
        }
    }
}

/// Any reference an operation can be addressed to
///
/// JSON form is either a target (`{"type": "pool", "address": ..}`) or a
/// token (`{"kind": "erc1155", "id": .., "address": ..}`). Deserialization
/// reads the fields directly, so 120-bit token ids survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Reference {
    Token(TokenReference),
    Target(OperationTarget),
}

impl Reference {
    pub const fn pool(address: Address) -> Self {
        Reference::Target(OperationTarget::Pool(address))
    }

    pub const fn gauge(address: Address) -> Self {
        Reference::Target(OperationTarget::Gauge(address))
    }

    pub const fn address(&self) -> Address {
        match self {
            Reference::Token(token) => token.address,
            Reference::Target(target) => target.address(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum TargetType {
    Pool,
    Gauge,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceFields {
    #[serde(rename = "type")]
    target: Option<TargetType>,
    kind: Option<TokenKind>,
    id: Option<TokenId>,
    address: Address,
}

impl TryFrom<ReferenceFields> for Reference {
    type Error = EncodingError;

    fn try_from(fields: ReferenceFields) -> Result<Self, Self::Error> {
        let address = fields.address;
        match (fields.target, fields.kind) {
            (Some(_), Some(kind)) => Err(EncodingError::malformed(
                "reference",
                address.to_hex(),
                format!("both a target type and token kind {} given", kind),
            )),
            (Some(_), None) if fields.id.is_some() => Err(EncodingError::malformed(
                "reference",
                address.to_hex(),
                "pools and gauges take no id",
            )),
            (Some(TargetType::Pool), None) => Ok(Reference::pool(address)),
            (Some(TargetType::Gauge), None) => Ok(Reference::gauge(address)),
            (None, Some(kind)) => Ok(Reference::Token(TokenReference::new(
                kind,
                fields.id.unwrap_or_default(),
                address,
            ))),
            (None, None) => Err(EncodingError::malformed(
                "reference",
                address.to_hex(),
                "expected a \"type\" or \"kind\" field",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = ReferenceFields::deserialize(deserializer)?;
        Reference::try_from(fields).map_err(serde::de::Error::custom)
    }
}

impl From<TokenReference> for Reference {
    fn from(token: TokenReference) -> Self {
        Reference::Token(token)
    }
}

impl From<OperationTarget> for Reference {
    fn from(target: OperationTarget) -> Self {
        Reference::Target(target)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Token(token) => token.fmt(f),
            Reference::Target(target) => target.fmt(f),
        }
    }
}
