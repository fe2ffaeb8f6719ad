//! Typed 20-byte account and contract address

use crate::common::errors::EncodingError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of an EVM address in bytes
pub const ADDRESS_LEN: usize = 20;

/// Opaque 20-byte identifier for an account or contract
///
/// Ordering is plain lexicographic byte order, which keeps it consistent with
/// the ordering of any descriptor that embeds the address as a suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    #[inline(always)]
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[inline(always)]
    pub const fn into_inner(self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Parse a `0x`-prefixed (or bare) 40 character hex string
    pub fn from_hex(input: &str) -> Result<Self, EncodingError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let bytes = hex::decode(digits).map_err(|e| EncodingError::malformed("address", input, e))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|raw: Vec<u8>| {
            EncodingError::malformed(
                "address",
                input,
                format!("expected {} bytes, got {}", ADDRESS_LEN, raw.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    #[inline(always)]
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; ADDRESS_LEN] {
    #[inline(always)]
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<[u8; ADDRESS_LEN]> for Address {
    #[inline(always)]
    fn as_ref(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

// Serialized as hex so JSON operation descriptions stay readable
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let addr = Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap();
        assert_eq!(addr.0[0], 0xa0);
        assert_eq!(addr.0[19], 0x48);
        assert_eq!(addr.to_string(), "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

        let bare: Address = "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse().unwrap();
        assert_eq!(bare, addr);
    }

    #[test]
    fn test_rejects_wrong_width() {
        let err = Address::from_hex("0x1234").unwrap_err();
        assert!(matches!(err, EncodingError::Malformed { field: "address", .. }));

        let err = Address::from_hex("0xzz").unwrap_err();
        assert!(matches!(err, EncodingError::Malformed { .. }));
    }

    #[test]
    fn test_serde_as_hex() {
        let addr = Address::new([0x11; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x1111111111111111111111111111111111111111\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let low = Address::new([0x01; 20]);
        let mut high_bytes = [0x00; 20];
        high_bytes[0] = 0x02;
        assert!(low < Address::new(high_bytes));
    }
}
