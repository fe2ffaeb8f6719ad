//! Amount policies and the signed amount convention
//!
//! Sign convention: a positive amount is paid by the user into the vault, a
//! negative amount is paid out by the vault to the user. `SignedAmount` keeps
//! that convention in the type so call sites say which way value moves
//! instead of negating bare integers.

use crate::common::errors::EncodingError;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// How the vault interprets the paired amount
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
pub enum AmountKind {
    /// Transfer exactly this amount
    #[serde(rename = "exactly")]
    Exactly = 0,
    /// Transfer at most this amount
    #[serde(rename = "at most", alias = "at_most")]
    AtMost = 1,
    /// Transfer everything available; the amount is a bound
    #[serde(rename = "all")]
    All = 2,
}

impl AmountKind {
    pub const fn name(self) -> &'static str {
        match self {
            AmountKind::Exactly => "exactly",
            AmountKind::AtMost => "at most",
            AmountKind::All => "all",
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, EncodingError> {
        Self::try_from(byte).map_err(|e| EncodingError::unknown_kind("amount kind", e.number))
    }
}

impl fmt::Display for AmountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AmountKind {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exactly" => Ok(AmountKind::Exactly),
            "at most" | "at_most" | "atmost" => Ok(AmountKind::AtMost),
            "all" => Ok(AmountKind::All),
            _ => Err(EncodingError::unknown_kind("amount kind", s)),
        }
    }
}

/// Which way value moves between the user and the vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The user owes the vault
    UserPays,
    /// The vault owes the user
    UserReceives,
    /// Zero amount; nothing moves
    None,
}

/// Signed 128-bit amount: positive = user pays, negative = user receives
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct SignedAmount(i128);

impl SignedAmount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i128::MAX);
    pub const MIN: Self = Self(i128::MIN);

    #[inline(always)]
    pub const fn new(raw: i128) -> Self {
        Self(raw)
    }

    /// The user pays `amount` into the vault
    pub fn pay(amount: u128) -> Result<Self, EncodingError> {
        i128::try_from(amount)
            .map(Self)
            .map_err(|_| EncodingError::overflow(amount))
    }

    /// The vault pays `amount` out to the user
    pub fn receive(amount: u128) -> Result<Self, EncodingError> {
        if amount > i128::MIN.unsigned_abs() {
            return Err(EncodingError::overflow(format!("-{}", amount)));
        }
        // 2^127 wraps onto i128::MIN, which is the intended value
        Ok(Self((amount as i128).wrapping_neg()))
    }

    #[inline(always)]
    pub const fn get(self) -> i128 {
        self.0
    }

    pub const fn direction(self) -> Direction {
        if self.0 > 0 {
            Direction::UserPays
        } else if self.0 < 0 {
            Direction::UserReceives
        } else {
            Direction::None
        }
    }

    pub const fn magnitude(self) -> u128 {
        self.0.unsigned_abs()
    }

    /// Big-endian two's complement
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self(i128::from_be_bytes(bytes))
    }
}

impl From<i128> for SignedAmount {
    fn from(raw: i128) -> Self {
        Self(raw)
    }
}

impl From<SignedAmount> for i128 {
    fn from(amount: SignedAmount) -> Self {
        amount.0
    }
}

impl TryFrom<u128> for SignedAmount {
    type Error = EncodingError;

    fn try_from(value: u128) -> Result<Self, Self::Error> {
        Self::pay(value)
    }
}

impl From<SignedAmount> for String {
    fn from(amount: SignedAmount) -> Self {
        amount.0.to_string()
    }
}

impl TryFrom<String> for SignedAmount {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for SignedAmount {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().replace('_', "");
        text.parse::<i128>().map(Self).map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => EncodingError::overflow(s),
            _ => EncodingError::malformed("amount", s, e),
        })
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
