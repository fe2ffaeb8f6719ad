//! ABI encoding of the vault `execute` call
//!
//! ```text
//! execute(bytes[] tokenRef, int128[] deposit, (bytes poolId, bytes32[] tokenInformations, bytes data)[] ops)
//! ```
//!
//! Reference descriptors are 36 bytes wide, one word too many for `bytes32`,
//! so token-table entries and operation references travel as dynamic `bytes`.
//! Amount instructions are exactly one word and travel as `bytes32`.

use crate::batch::{CompiledBatch, CompiledOperation, TokenTable};
use crate::error::AbiError;
use codec::{InstructionBytes, ReferenceBytes};
use ethabi::{Function, Param, ParamType, StateMutability, Token};
use ethereum_types::U256;

pub const EXECUTE_FUNCTION_NAME: &str = "execute";

fn operation_param_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::Bytes,
        ParamType::Array(Box::new(ParamType::FixedBytes(32))),
        ParamType::Bytes,
    ])
}

/// The vault `execute` function definition
#[allow(deprecated)]
pub fn execute_function() -> Function {
    Function {
        name: EXECUTE_FUNCTION_NAME.to_string(),
        inputs: vec![
            Param {
                name: "tokenRef".to_string(),
                kind: ParamType::Array(Box::new(ParamType::Bytes)),
                internal_type: None,
            },
            Param {
                name: "deposit".to_string(),
                kind: ParamType::Array(Box::new(ParamType::Int(128))),
                internal_type: None,
            },
            Param {
                name: "ops".to_string(),
                kind: ParamType::Array(Box::new(operation_param_type())),
                internal_type: None,
            },
        ],
        outputs: vec![],
        constant: None,
        state_mutability: StateMutability::Payable,
    }
}

/// Four-byte selector of `execute`
pub fn execute_selector() -> [u8; 4] {
    execute_function().short_signature()
}

/// Calldata (selector + arguments) for a compiled batch
pub fn encode_execute_call(batch: &CompiledBatch) -> Result<Vec<u8>, AbiError> {
    encode_execute_parts(
        batch.token_table().encoded(),
        batch.deposits(),
        batch.operations(),
    )
}

pub fn encode_execute_parts(
    token_table: &[ReferenceBytes],
    deposits: &[i128],
    operations: &[CompiledOperation],
) -> Result<Vec<u8>, AbiError> {
    if deposits.len() != token_table.len() {
        return Err(AbiError::DepositCountMismatch {
            tokens: token_table.len(),
            deposits: deposits.len(),
        });
    }

    let token_ref = Token::Array(
        token_table
            .iter()
            .map(|entry| Token::Bytes(entry.as_bytes().to_vec()))
            .collect(),
    );
    let deposit = Token::Array(
        deposits
            .iter()
            .map(|amount| Token::Int(int128_to_word(*amount)))
            .collect(),
    );
    let ops = Token::Array(operations.iter().map(operation_token).collect());

    Ok(execute_function().encode_input(&[token_ref, deposit, ops])?)
}

fn operation_token(operation: &CompiledOperation) -> Token {
    Token::Tuple(vec![
        Token::Bytes(operation.reference.as_bytes().to_vec()),
        Token::Array(
            operation
                .instructions
                .iter()
                .map(|instruction| Token::FixedBytes(instruction.as_bytes().to_vec()))
                .collect(),
        ),
        Token::Bytes(operation.data.clone()),
    ])
}

/// Recover the batch from `execute` calldata for replay checks
pub fn decode_execute_call(calldata: &[u8]) -> Result<CompiledBatch, AbiError> {
    if calldata.len() < 4 {
        return Err(AbiError::TooShort {
            len: calldata.len(),
        });
    }

    let function = execute_function();
    let (selector, arguments) = calldata.split_at(4);
    let expected = function.short_signature();
    if selector != expected.as_slice() {
        return Err(AbiError::SelectorMismatch {
            expected: hex::encode(expected),
            got: hex::encode(selector),
        });
    }

    let mut values = function.decode_input(arguments)?.into_iter();

    let token_table = next_array(&mut values, "tokenRef")?
        .into_iter()
        .map(|token| {
            let bytes = token
                .into_bytes()
                .ok_or(AbiError::UnexpectedToken { field: "tokenRef" })?;
            Ok(ReferenceBytes::from_slice(&bytes)?)
        })
        .collect::<Result<Vec<_>, AbiError>>()?;
    let token_table = TokenTable::from_encoded(token_table)?;

    let deposits = next_array(&mut values, "deposit")?
        .into_iter()
        .map(|token| {
            let word = token
                .into_int()
                .ok_or(AbiError::UnexpectedToken { field: "deposit" })?;
            word_to_int128(word)
        })
        .collect::<Result<Vec<_>, AbiError>>()?;

    let operations = next_array(&mut values, "ops")?
        .into_iter()
        .map(decode_operation_token)
        .collect::<Result<Vec<_>, AbiError>>()?;

    Ok(CompiledBatch::from_parts(token_table, deposits, operations)?)
}

fn decode_operation_token(token: Token) -> Result<CompiledOperation, AbiError> {
    let mut fields = token
        .into_tuple()
        .ok_or(AbiError::UnexpectedToken { field: "ops" })?
        .into_iter();

    let reference = fields
        .next()
        .and_then(Token::into_bytes)
        .ok_or(AbiError::UnexpectedToken { field: "ops.poolId" })?;

    let instructions = fields
        .next()
        .and_then(Token::into_array)
        .ok_or(AbiError::UnexpectedToken {
            field: "ops.tokenInformations",
        })?
        .into_iter()
        .map(|word| {
            let bytes = word.into_fixed_bytes().ok_or(AbiError::UnexpectedToken {
                field: "ops.tokenInformations",
            })?;
            Ok(InstructionBytes::from_slice(&bytes)?)
        })
        .collect::<Result<Vec<_>, AbiError>>()?;

    let data = fields
        .next()
        .and_then(Token::into_bytes)
        .ok_or(AbiError::UnexpectedToken { field: "ops.data" })?;

    Ok(CompiledOperation {
        reference: ReferenceBytes::from_slice(&reference)?,
        instructions,
        data,
    })
}

fn next_array(
    values: &mut impl Iterator<Item = Token>,
    field: &'static str,
) -> Result<Vec<Token>, AbiError> {
    values
        .next()
        .and_then(Token::into_array)
        .ok_or(AbiError::UnexpectedToken { field })
}

/// Sign-extend an int128 into a 256-bit two's complement word
pub fn int128_to_word(value: i128) -> U256 {
    if value >= 0 {
        U256::from(value as u128)
    } else {
        !U256::from(!value as u128)
    }
}

/// Narrow a 256-bit two's complement word back to int128
pub fn word_to_int128(word: U256) -> Result<i128, AbiError> {
    let out_of_range = || AbiError::DepositOutOfRange {
        value: format!("{:#x}", word),
    };

    if !word.bit(255) {
        if word.bits() > 127 {
            return Err(out_of_range());
        }
        Ok(word.low_u128() as i128)
    } else {
        let inverted = !word;
        if inverted.bits() > 127 {
            return Err(out_of_range());
        }
        Ok(!(inverted.low_u128() as i128))
    }
}
