//! Token, pool and gauge reference packing
//!
//! All three share one 36-byte descriptor shape: a discriminant byte, a
//! 120-bit big-endian id and the 20-byte address. Tokens put their kind
//! index in the discriminant byte; pools and gauges put a literal
//! `0x00`/`0x01` there and leave the id zero.

use crate::constants::{ADDRESS_LEN, GAUGE_DISCRIMINANT, ID_LEN, POOL_DISCRIMINANT, REFERENCE_LEN};
use crate::error::{DecodeError, DecodeResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use types::{Address, EncodingError, OperationTarget, Reference, TokenId, TokenKind, TokenReference};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Wire layout of a reference descriptor
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
struct ReferenceLayout {
    discriminant: u8,
    id: [u8; ID_LEN],
    address: [u8; ADDRESS_LEN],
}

impl ReferenceLayout {
    fn new(discriminant: u8, id: TokenId, address: Address) -> Self {
        Self {
            discriminant,
            id: id.to_be_bytes(),
            address: address.into_inner(),
        }
    }

    fn read(bytes: &[u8]) -> DecodeResult<Self> {
        Self::read_from(bytes)
            .ok_or_else(|| DecodeError::invalid_length("reference", REFERENCE_LEN, bytes.len()))
    }

    fn pack(self) -> ReferenceBytes {
        let mut out = [0u8; REFERENCE_LEN];
        out.copy_from_slice(self.as_bytes());
        ReferenceBytes(out)
    }
}

/// A packed 36-byte reference descriptor
///
/// Ordering is plain byte order; the token table is sorted by it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceBytes(pub [u8; REFERENCE_LEN]);

impl ReferenceBytes {
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline(always)]
    pub const fn discriminant(&self) -> u8 {
        self.0[0]
    }

    pub fn from_slice(bytes: &[u8]) -> DecodeResult<Self> {
        let raw: [u8; REFERENCE_LEN] = bytes
            .try_into()
            .map_err(|_| DecodeError::invalid_length("reference", REFERENCE_LEN, bytes.len()))?;
        Ok(Self(raw))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(input: &str) -> DecodeResult<Self> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        let bytes = hex::decode(digits)
            .map_err(|e| EncodingError::malformed("reference descriptor", input, e))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Debug for ReferenceBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceBytes({})", self.to_hex())
    }
}

impl fmt::Display for ReferenceBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for ReferenceBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<ReferenceBytes> for Vec<u8> {
    fn from(bytes: ReferenceBytes) -> Self {
        bytes.0.to_vec()
    }
}

impl Serialize for ReferenceBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ReferenceBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Pack a typed token triple
pub fn encode_token(kind: TokenKind, id: TokenId, address: Address) -> ReferenceBytes {
    ReferenceLayout::new(kind.into(), id, address).pack()
}

/// Pack an unchecked token triple: kind byte must be 0..=2, id below 2^120
pub fn encode_token_raw(kind: u8, id: u128, address: Address) -> Result<ReferenceBytes, EncodingError> {
    let kind = TokenKind::try_from(kind)
        .map_err(|e| EncodingError::out_of_range("token kind", e.number, TokenKind::Erc1155 as u128))?;
    Ok(encode_token(kind, TokenId::new(id)?, address))
}

pub fn encode_token_reference(token: &TokenReference) -> ReferenceBytes {
    encode_token(token.kind, token.id, token.address)
}

pub fn encode_pool(address: Address) -> ReferenceBytes {
    ReferenceLayout::new(POOL_DISCRIMINANT, TokenId::ZERO, address).pack()
}

pub fn encode_gauge(address: Address) -> ReferenceBytes {
    ReferenceLayout::new(GAUGE_DISCRIMINANT, TokenId::ZERO, address).pack()
}

pub fn encode_target(target: &OperationTarget) -> ReferenceBytes {
    match target {
        OperationTarget::Pool(address) => encode_pool(*address),
        OperationTarget::Gauge(address) => encode_gauge(*address),
    }
}

pub fn encode_reference(reference: &Reference) -> ReferenceBytes {
    match reference {
        Reference::Token(token) => encode_token_reference(token),
        Reference::Target(target) => encode_target(target),
    }
}

/// Read a descriptor from a token slot
pub fn decode_token(bytes: &[u8]) -> DecodeResult<TokenReference> {
    let layout = ReferenceLayout::read(bytes)?;
    let kind = TokenKind::from_byte(layout.discriminant)?;
    Ok(TokenReference::new(
        kind,
        TokenId::from_be_bytes(layout.id),
        Address::new(layout.address),
    ))
}

/// Read a descriptor from an operation slot that addresses a pool or gauge
///
/// The caller must know the slot holds a target: a zero-id ERC-20 or ERC-721
/// descriptor reads back as a pool or gauge at the same address.
pub fn decode_target(bytes: &[u8]) -> DecodeResult<OperationTarget> {
    let layout = ReferenceLayout::read(bytes)?;
    let id = TokenId::from_be_bytes(layout.id);
    if id != TokenId::ZERO {
        return Err(DecodeError::NonZeroTargetId { id: id.get() });
    }
    let address = Address::new(layout.address);
    match layout.discriminant {
        POOL_DISCRIMINANT => Ok(OperationTarget::Pool(address)),
        GAUGE_DISCRIMINANT => Ok(OperationTarget::Gauge(address)),
        discriminant => Err(DecodeError::UnknownDiscriminant { discriminant }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ADDRESS_OFFSET;

    const ADDR: Address = Address::new([0x11; 20]);

    #[test]
    fn test_layout_is_unpadded() {
        assert_eq!(std::mem::size_of::<ReferenceLayout>(), REFERENCE_LEN);
    }

    #[test]
    fn test_erc20_descriptor() {
        let packed = encode_token(TokenKind::Erc20, TokenId::ZERO, ADDR);
        assert_eq!(packed.0[0], 0x00);
        assert!(packed.0[1..ADDRESS_OFFSET].iter().all(|b| *b == 0));
        assert_eq!(&packed.0[ADDRESS_OFFSET..], &[0x11; 20]);
    }

    #[test]
    fn test_erc1155_descriptor_carries_id() {
        let id = TokenId::new(0xabcdef).unwrap();
        let packed = encode_token(TokenKind::Erc1155, id, ADDR);
        assert_eq!(packed.discriminant(), 0x02);
        assert_eq!(&packed.0[13..16], &[0xab, 0xcd, 0xef]);
        assert_eq!(decode_token(packed.as_bytes()).unwrap(), TokenReference::erc1155(ADDR, id));
    }

    #[test]
    fn test_raw_token_inputs_are_range_checked() {
        assert!(encode_token_raw(2, 1, ADDR).is_ok());
        assert!(matches!(
            encode_token_raw(3, 0, ADDR),
            Err(EncodingError::OutOfRange { field: "token kind", .. })
        ));
        assert!(matches!(
            encode_token_raw(0, 1u128 << 120, ADDR),
            Err(EncodingError::OutOfRange { field: "token id", .. })
        ));
    }

    #[test]
    fn test_pool_and_gauge_descriptors() {
        let pool = encode_pool(ADDR);
        let gauge = encode_gauge(ADDR);
        assert_eq!(pool.discriminant(), 0x00);
        assert_eq!(gauge.discriminant(), 0x01);
        assert_ne!(pool, gauge);
        assert_eq!(decode_target(pool.as_bytes()).unwrap(), OperationTarget::Pool(ADDR));
        assert_eq!(decode_target(gauge.as_bytes()).unwrap(), OperationTarget::Gauge(ADDR));
    }

    #[test]
    fn test_byte_spaces_overlap() {
        // A pool and a zero-id ERC-20 at the same address pack identically;
        // only the slot they are read from tells them apart.
        assert_eq!(encode_pool(ADDR), encode_token_reference(&TokenReference::erc20(ADDR)));
        assert_eq!(
            encode_gauge(ADDR),
            encode_token(TokenKind::Erc721, TokenId::ZERO, ADDR)
        );

        let erc20 = encode_token_reference(&TokenReference::erc20(ADDR));
        assert_eq!(decode_target(erc20.as_bytes()).unwrap(), OperationTarget::Pool(ADDR));
        assert_eq!(decode_token(erc20.as_bytes()).unwrap(), TokenReference::erc20(ADDR));
    }

    #[test]
    fn test_decode_target_rejects_ids_and_unknown_bytes() {
        let with_id = encode_token(TokenKind::Erc20, TokenId::new(9).unwrap(), ADDR);
        assert_eq!(
            decode_target(with_id.as_bytes()),
            Err(DecodeError::NonZeroTargetId { id: 9 })
        );

        let erc1155 = encode_token(TokenKind::Erc1155, TokenId::ZERO, ADDR);
        assert_eq!(
            decode_target(erc1155.as_bytes()),
            Err(DecodeError::UnknownDiscriminant { discriminant: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode_token(&[0u8; 32]),
            Err(DecodeError::invalid_length("reference", 36, 32))
        );
        let mut bad_kind = [0u8; REFERENCE_LEN];
        bad_kind[0] = 0x09;
        assert!(matches!(decode_token(&bad_kind), Err(DecodeError::Encoding(_))));
    }

    #[test]
    fn test_hex_forms() {
        let packed = encode_gauge(ADDR);
        let text = packed.to_hex();
        assert!(text.starts_with("0x01"));
        assert_eq!(ReferenceBytes::from_hex(&text).unwrap(), packed);
        assert!(ReferenceBytes::from_hex("0x01").is_err());
    }
}
