//! Amount instruction packing
//!
//! One instruction tells the vault how much of which token-table entry moves
//! and under which policy. The amount keeps its sign: positive is owed by the
//! user, negative is owed to the user.

use crate::constants::{AMOUNT_LEN, INSTRUCTION_LEN, MAX_TOKEN_INDEX, RESERVED_LEN};
use crate::error::{DecodeError, DecodeResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use types::{AmountKind, EncodingError, SignedAmount};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsBytes, FromBytes, FromZeroes)]
struct InstructionLayout {
    token_index: u8,
    amount_kind: u8,
    reserved: [u8; RESERVED_LEN],
    amount: [u8; AMOUNT_LEN],
}

/// A packed 32-byte amount instruction
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct InstructionBytes(pub [u8; INSTRUCTION_LEN]);

impl InstructionBytes {
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> DecodeResult<Self> {
        let raw: [u8; INSTRUCTION_LEN] = bytes.try_into().map_err(|_| {
            DecodeError::invalid_length("amount instruction", INSTRUCTION_LEN, bytes.len())
        })?;
        Ok(Self(raw))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn decode(&self) -> DecodeResult<DecodedInstruction> {
        decode_instruction(&self.0)
    }
}

impl fmt::Debug for InstructionBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstructionBytes({})", self.to_hex())
    }
}

impl fmt::Display for InstructionBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for InstructionBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for InstructionBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for InstructionBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        let bytes = hex::decode(digits).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Fields recovered from a packed instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub token_index: u8,
    pub kind: AmountKind,
    pub amount: SignedAmount,
}

/// Pack `(token index, amount kind, amount)`
///
/// The index is not checked against any table here; it only has to fit the
/// one-byte field.
pub fn encode_instruction(
    token_index: usize,
    kind: AmountKind,
    amount: SignedAmount,
) -> Result<InstructionBytes, EncodingError> {
    let token_index = u8::try_from(token_index)
        .map_err(|_| EncodingError::out_of_range("token index", token_index, MAX_TOKEN_INDEX as u128))?;

    let layout = InstructionLayout {
        token_index,
        amount_kind: kind.into(),
        reserved: [0u8; RESERVED_LEN],
        amount: amount.to_be_bytes(),
    };

    let mut out = [0u8; INSTRUCTION_LEN];
    out.copy_from_slice(layout.as_bytes());
    Ok(InstructionBytes(out))
}

/// Pack an instruction whose amount kind arrives as a raw byte
pub fn encode_instruction_raw(
    token_index: usize,
    kind: u8,
    amount: SignedAmount,
) -> Result<InstructionBytes, EncodingError> {
    encode_instruction(token_index, AmountKind::from_byte(kind)?, amount)
}

pub fn decode_instruction(bytes: &[u8]) -> DecodeResult<DecodedInstruction> {
    let layout = InstructionLayout::read_from(bytes).ok_or_else(|| {
        DecodeError::invalid_length("amount instruction", INSTRUCTION_LEN, bytes.len())
    })?;

    if layout.reserved.iter().any(|b| *b != 0) {
        return Err(DecodeError::NonZeroReserved {
            reserved: hex::encode(layout.reserved),
        });
    }

    Ok(DecodedInstruction {
        token_index: layout.token_index,
        kind: AmountKind::from_byte(layout.amount_kind)?,
        amount: SignedAmount::from_be_bytes(layout.amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AMOUNT_OFFSET;

    #[test]
    fn test_layout_is_unpadded() {
        assert_eq!(std::mem::size_of::<InstructionLayout>(), INSTRUCTION_LEN);
    }

    #[test]
    fn test_field_positions() {
        let packed = encode_instruction(3, AmountKind::All, SignedAmount::new(1)).unwrap();
        assert_eq!(packed.0[0], 3);
        assert_eq!(packed.0[1], 2);
        assert!(packed.0[2..AMOUNT_OFFSET].iter().all(|b| *b == 0));
        assert_eq!(packed.0[INSTRUCTION_LEN - 1], 1);
    }

    #[test]
    fn test_negative_amount_is_twos_complement() {
        let packed = encode_instruction(0, AmountKind::AtMost, SignedAmount::new(-1)).unwrap();
        assert_eq!(&packed.0[AMOUNT_OFFSET..], &[0xff; 16]);
        let decoded = packed.decode().unwrap();
        assert_eq!(decoded.amount.get(), -1);
        assert_eq!(decoded.kind, AmountKind::AtMost);
    }

    #[test]
    fn test_index_must_fit_one_byte() {
        assert!(encode_instruction(255, AmountKind::Exactly, SignedAmount::ZERO).is_ok());
        assert!(matches!(
            encode_instruction(256, AmountKind::Exactly, SignedAmount::ZERO),
            Err(EncodingError::OutOfRange { field: "token index", .. })
        ));
    }

    #[test]
    fn test_unknown_raw_kind() {
        assert!(matches!(
            encode_instruction_raw(0, 3, SignedAmount::ZERO),
            Err(EncodingError::UnknownKind { field: "amount kind", .. })
        ));
        assert!(encode_instruction_raw(0, 1, SignedAmount::ZERO).is_ok());
    }

    #[test]
    fn test_decode_rejects_dirty_reserved_field() {
        let mut packed = encode_instruction(1, AmountKind::Exactly, SignedAmount::new(5)).unwrap();
        packed.0[4] = 0x80;
        assert!(matches!(
            packed.decode(),
            Err(DecodeError::NonZeroReserved { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_kind_byte() {
        let mut packed = encode_instruction(1, AmountKind::Exactly, SignedAmount::new(5)).unwrap();
        packed.0[1] = 7;
        assert!(matches!(packed.decode(), Err(DecodeError::Encoding(_))));
    }
}
