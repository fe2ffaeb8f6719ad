//! Token references: the `(kind, id, address)` triple a vault instruction moves
//!
//! Uniqueness is defined by the full triple. One ERC-1155 contract can back
//! many distinct references, and the same address may appear under more than
//! one kind.

use crate::common::errors::EncodingError;
use crate::common::identifiers::Address;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token standard, packed as its enum index in the descriptor's kind byte
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Erc20 = 0,
    Erc721 = 1,
    Erc1155 = 2,
}

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Erc20, TokenKind::Erc721, TokenKind::Erc1155];

    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Erc20 => "erc20",
            TokenKind::Erc721 => "erc721",
            TokenKind::Erc1155 => "erc1155",
        }
    }

    /// Map a raw kind byte back to its enum member
    pub fn from_byte(byte: u8) -> Result<Self, EncodingError> {
        Self::try_from(byte).map_err(|e| EncodingError::unknown_kind("token kind", e.number))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenKind {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "erc20" => Ok(TokenKind::Erc20),
            "erc721" => Ok(TokenKind::Erc721),
            "erc1155" => Ok(TokenKind::Erc1155),
            _ => Err(EncodingError::unknown_kind("token kind", s)),
        }
    }
}

/// Sub-token identifier, restricted to 120 bits
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u128", into = "u128")]
pub struct TokenId(u128);

impl TokenId {
    pub const BITS: u32 = 120;
    pub const BYTES: usize = 15;
    pub const MAX_VALUE: u128 = (1u128 << Self::BITS) - 1;
    pub const ZERO: Self = Self(0);

    pub fn new(value: u128) -> Result<Self, EncodingError> {
        if value > Self::MAX_VALUE {
            return Err(EncodingError::out_of_range("token id", value, Self::MAX_VALUE));
        }
        Ok(Self(value))
    }

    #[inline(always)]
    pub const fn get(self) -> u128 {
        self.0
    }

    /// Big-endian 15-byte form
    pub fn to_be_bytes(self) -> [u8; Self::BYTES] {
        let full = self.0.to_be_bytes();
        let mut out = [0u8; Self::BYTES];
        out.copy_from_slice(&full[16 - Self::BYTES..]);
        out
    }

    pub fn from_be_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut full = [0u8; 16];
        full[16 - Self::BYTES..].copy_from_slice(&bytes);
        Self(u128::from_be_bytes(full))
    }
}

impl TryFrom<u128> for TokenId {
    type Error = EncodingError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TokenId> for u128 {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token as the vault sees it
///
/// Field order is load-bearing: the derived ordering compares kind, then id,
/// then address, which is exactly the ascending order of the packed
/// descriptor bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenReference {
    pub kind: TokenKind,
    #[serde(default)]
    pub id: TokenId,
    pub address: Address,
}

impl TokenReference {
    pub const fn new(kind: TokenKind, id: TokenId, address: Address) -> Self {
        Self { kind, id, address }
    }

    pub const fn erc20(address: Address) -> Self {
        Self::new(TokenKind::Erc20, TokenId::ZERO, address)
    }

    pub const fn erc721(address: Address, id: TokenId) -> Self {
        Self::new(TokenKind::Erc721, id, address)
    }

    pub const fn erc1155(address: Address, id: TokenId) -> Self {
        Self::new(TokenKind::Erc1155, id, address)
    }

    /// Build from raw caller input; a missing kind means ERC-20
    pub fn parse(kind: Option<&str>, id: u128, address: &str) -> Result<Self, EncodingError> {
        let kind = match kind {
            Some(name) => name.parse()?,
            None => TokenKind::Erc20,
        };
        Ok(Self::new(kind, TokenId::new(id)?, Address::from_hex(address)?))
    }
}

impl fmt::Display for TokenReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Erc20 => write!(f, "{}:{}", self.kind, self.address),
            _ => write!(f, "{}:{}#{}", self.kind, self.address, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices() {
        assert_eq!(u8::from(TokenKind::Erc20), 0);
        assert_eq!(u8::from(TokenKind::Erc721), 1);
        assert_eq!(u8::from(TokenKind::Erc1155), 2);
        assert_eq!(TokenKind::from_byte(2).unwrap(), TokenKind::Erc1155);
        assert!(matches!(
            TokenKind::from_byte(3),
            Err(EncodingError::UnknownKind { field: "token kind", .. })
        ));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("ERC1155".parse::<TokenKind>().unwrap(), TokenKind::Erc1155);
        assert_eq!(" erc721 ".parse::<TokenKind>().unwrap(), TokenKind::Erc721);
        assert!("erc777".parse::<TokenKind>().is_err());
    }

    #[test]
    fn test_token_id_range() {
        assert!(TokenId::new(TokenId::MAX_VALUE).is_ok());
        let err = TokenId::new(1u128 << 120).unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { field: "token id", .. }));
        assert!(TokenId::new(u128::MAX).is_err());
    }

    #[test]
    fn test_token_id_bytes() {
        let id = TokenId::new(0x0102).unwrap();
        let bytes = id.to_be_bytes();
        assert_eq!(bytes[13], 0x01);
        assert_eq!(bytes[14], 0x02);
        assert_eq!(TokenId::from_be_bytes(bytes), id);

        let max = TokenId::new(TokenId::MAX_VALUE).unwrap();
        assert_eq!(max.to_be_bytes(), [0xff; 15]);
    }

    #[test]
    fn test_identity_is_full_triple() {
        let addr = Address::new([0x42; 20]);
        let a = TokenReference::erc1155(addr, TokenId::new(1).unwrap());
        let b = TokenReference::erc1155(addr, TokenId::new(2).unwrap());
        let c = TokenReference::erc20(addr);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(c < a && a < b);
    }

    #[test]
    fn test_parse_raw_input() {
        let token = TokenReference::parse(None, 0, "0xdAC17F958D2ee523a2206206994597C13D831ec7").unwrap();
        assert_eq!(token.kind, TokenKind::Erc20);

        let err = TokenReference::parse(Some("erc721"), 1u128 << 121, "0xdAC17F958D2ee523a2206206994597C13D831ec7")
            .unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { .. }));
    }

    #[test]
    fn test_serde_rejects_wide_ids() {
        let json = r#"{"kind":"erc1155","id":5,"address":"0x4242424242424242424242424242424242424242"}"#;
        let token: TokenReference = serde_json::from_str(json).unwrap();
        assert_eq!(token.id.get(), 5);

        let json = r#"{"kind":"erc20","address":"0x4242424242424242424242424242424242424242"}"#;
        let token: TokenReference = serde_json::from_str(json).unwrap();
        assert_eq!(token.id, TokenId::ZERO);

        let wide = format!(
            r#"{{"kind":"erc1155","id":{},"address":"0x4242424242424242424242424242424242424242"}}"#,
            1u128 << 120
        );
        assert!(serde_json::from_str::<TokenReference>(&wide).is_err());
    }
}
