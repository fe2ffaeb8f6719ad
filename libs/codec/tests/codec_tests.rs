//! # Vault Codec Integration Tests
//!
//! Known-answer vectors for the packed descriptor and instruction layouts,
//! plus property checks on the sign convention across encode/decode.

use codec::{
    decode_instruction, decode_target, decode_token, encode_gauge, encode_instruction,
    encode_pool, encode_token, encode_token_reference, DecodeError, INSTRUCTION_LEN,
    REFERENCE_LEN,
};
use hex_literal::hex;
use proptest::prelude::*;
use types::{
    Address, AmountKind, Direction, EncodingError, OperationTarget, SignedAmount, TokenId,
    TokenKind, TokenReference,
};

fn usdc() -> Address {
    Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap()
}

#[test]
fn test_erc20_vector() {
    let packed = encode_token(TokenKind::Erc20, TokenId::ZERO, usdc());
    assert_eq!(
        packed.0,
        hex!("00" "000000000000000000000000000000" "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
    );
    assert_eq!(packed.as_bytes().len(), REFERENCE_LEN);
}

#[test]
fn test_erc1155_vector() {
    let id = TokenId::new(0x2a).unwrap();
    let packed = encode_token(TokenKind::Erc1155, id, usdc());
    assert_eq!(
        packed.0,
        hex!("02" "00000000000000000000000000002a" "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
    );
}

#[test]
fn test_gauge_vector() {
    let packed = encode_gauge(usdc());
    assert_eq!(
        packed.0,
        hex!("01" "000000000000000000000000000000" "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
    );
    assert_eq!(decode_target(&packed.0).unwrap(), OperationTarget::Gauge(usdc()));
}

#[test]
fn test_instruction_vectors() {
    let exact = encode_instruction(0, AmountKind::Exactly, SignedAmount::new(1234)).unwrap();
    assert_eq!(
        exact.0,
        hex!("00" "00" "0000000000000000000000000000" "000000000000000000000000000004d2")
    );

    let bound = SignedAmount::receive(i128::MAX as u128).unwrap();
    let at_most = encode_instruction(1, AmountKind::AtMost, bound).unwrap();
    assert_eq!(
        at_most.0,
        hex!("01" "01" "0000000000000000000000000000" "80000000000000000000000000000001")
    );

    let owed = encode_instruction(2, AmountKind::AtMost, SignedAmount::new(-1235)).unwrap();
    assert_eq!(
        owed.0,
        hex!("02" "01" "0000000000000000000000000000" "fffffffffffffffffffffffffffffb2d")
    );
    assert_eq!(owed.as_bytes().len(), INSTRUCTION_LEN);
}

#[test]
fn test_pool_reference_shape_matches_token_shape() {
    let pool = encode_pool(usdc());
    let token = encode_token_reference(&TokenReference::erc20(usdc()));
    assert_eq!(pool.as_bytes().len(), token.as_bytes().len());
}

#[test]
fn test_truncated_blobs() {
    assert!(matches!(
        decode_instruction(&[0u8; 31]),
        Err(DecodeError::InvalidLength { expected: 32, got: 31, .. })
    ));
    assert!(matches!(
        decode_token(&[0u8; 37]),
        Err(DecodeError::InvalidLength { expected: 36, got: 37, .. })
    ));
}

#[test]
fn test_token_id_overflow_is_rejected_before_packing() {
    let err = TokenId::new(1u128 << 120).unwrap_err();
    assert!(matches!(err, EncodingError::OutOfRange { .. }));
}

fn token_kind() -> impl Strategy<Value = TokenKind> {
    prop_oneof![
        Just(TokenKind::Erc20),
        Just(TokenKind::Erc721),
        Just(TokenKind::Erc1155)
    ]
}

fn amount_kind() -> impl Strategy<Value = AmountKind> {
    prop_oneof![
        Just(AmountKind::Exactly),
        Just(AmountKind::AtMost),
        Just(AmountKind::All)
    ]
}

proptest! {
    #[test]
    fn instruction_decode_preserves_sign_and_magnitude(
        index in 0usize..=255,
        kind in amount_kind(),
        raw in any::<i128>(),
    ) {
        let packed = encode_instruction(index, kind, SignedAmount::new(raw)).unwrap();
        let decoded = decode_instruction(&packed.0).unwrap();
        prop_assert_eq!(decoded.token_index as usize, index);
        prop_assert_eq!(decoded.kind, kind);
        prop_assert_eq!(decoded.amount.get(), raw);
        prop_assert_eq!(decoded.amount.magnitude(), raw.unsigned_abs());
        if raw > 0 {
            prop_assert_eq!(decoded.amount.direction(), Direction::UserPays);
        } else if raw < 0 {
            prop_assert_eq!(decoded.amount.direction(), Direction::UserReceives);
        }
    }

    #[test]
    fn byte_order_matches_reference_order(
        a_kind in token_kind(), a_id in 0u128..1_000, a_addr in any::<[u8; 20]>(),
        b_kind in token_kind(), b_id in 0u128..1_000, b_addr in any::<[u8; 20]>(),
    ) {
        let a = TokenReference::new(a_kind, TokenId::new(a_id).unwrap(), Address::new(a_addr));
        let b = TokenReference::new(b_kind, TokenId::new(b_id).unwrap(), Address::new(b_addr));
        prop_assert_eq!(
            a.cmp(&b),
            encode_token_reference(&a).cmp(&encode_token_reference(&b))
        );
    }

    #[test]
    fn token_descriptor_decodes_to_same_triple(
        kind in token_kind(),
        id in 0u128..=TokenId::MAX_VALUE,
        addr in any::<[u8; 20]>(),
    ) {
        let token = TokenReference::new(kind, TokenId::new(id).unwrap(), Address::new(addr));
        let packed = encode_token_reference(&token);
        prop_assert_eq!(decode_token(packed.as_bytes()).unwrap(), token);
    }
}
