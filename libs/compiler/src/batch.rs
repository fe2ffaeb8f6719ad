//! Compiled batch: token table, deposit vector and packed operations

use crate::error::BatchError;
use codec::{
    decode_instruction, decode_target, decode_token, encode_token_reference, DecodeError,
    DecodeResult, DecodedInstruction, InstructionBytes, ReferenceBytes,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::{OperationTarget, TokenReference};

/// Deduplicated token references, ascending by packed descriptor bytes
///
/// Two tables built from the same set of tokens are byte-identical no matter
/// how often or in which order the tokens were referenced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReferenceBytes>", into = "Vec<ReferenceBytes>")]
pub struct TokenTable {
    tokens: Vec<TokenReference>,
    encoded: Vec<ReferenceBytes>,
}

impl TokenTable {
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a TokenReference>) -> Self {
        let sorted: BTreeMap<ReferenceBytes, TokenReference> = tokens
            .into_iter()
            .map(|token| (encode_token_reference(token), *token))
            .collect();
        let (encoded, tokens): (Vec<_>, Vec<_>) = sorted.into_iter().unzip();
        Self { tokens, encoded }
    }

    /// Rebuild from packed entries, which must be unique and ascending
    pub fn from_encoded(encoded: Vec<ReferenceBytes>) -> DecodeResult<Self> {
        if let Some(position) = encoded.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(DecodeError::Encoding(types::EncodingError::malformed(
                "token table",
                encoded[position + 1].to_hex(),
                format!("entry {} is not strictly ascending", position + 1),
            )));
        }
        let tokens = encoded
            .iter()
            .map(|entry| decode_token(entry.as_bytes()))
            .collect::<DecodeResult<Vec<_>>>()?;
        Ok(Self { tokens, encoded })
    }

    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    pub fn tokens(&self) -> &[TokenReference] {
        &self.tokens
    }

    pub fn encoded(&self) -> &[ReferenceBytes] {
        &self.encoded
    }

    pub fn get(&self, index: usize) -> Option<&TokenReference> {
        self.tokens.get(index)
    }

    pub fn index_of(&self, token: &TokenReference) -> Option<usize> {
        self.encoded.binary_search(&encode_token_reference(token)).ok()
    }

    /// Packed entry to table index
    pub(crate) fn index_map(&self) -> BTreeMap<ReferenceBytes, usize> {
        self.encoded
            .iter()
            .enumerate()
            .map(|(index, entry)| (*entry, index))
            .collect()
    }
}

impl TryFrom<Vec<ReferenceBytes>> for TokenTable {
    type Error = DecodeError;

    fn try_from(encoded: Vec<ReferenceBytes>) -> Result<Self, Self::Error> {
        Self::from_encoded(encoded)
    }
}

impl From<TokenTable> for Vec<ReferenceBytes> {
    fn from(table: TokenTable) -> Self {
        table.encoded
    }
}

/// One operation as the vault receives it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompiledOperation {
    /// Packed pool, gauge or token reference
    pub reference: ReferenceBytes,
    pub instructions: Vec<InstructionBytes>,
    /// Opaque per-operation payload; always empty in this format
    #[serde(default)]
    pub data: Vec<u8>,
}

impl CompiledOperation {
    pub fn new(reference: ReferenceBytes, instructions: Vec<InstructionBytes>) -> Self {
        Self {
            reference,
            instructions,
            data: Vec::new(),
        }
    }

    /// Read the reference as a pool or gauge
    ///
    /// Only meaningful for operations built from `Reference::Target`. The
    /// bytes of a zero-id ERC-20 or ERC-721 reference are indistinguishable
    /// from a pool or gauge and decode as one.
    pub fn target(&self) -> DecodeResult<OperationTarget> {
        decode_target(self.reference.as_bytes())
    }

    pub fn decode_instructions(&self) -> DecodeResult<Vec<DecodedInstruction>> {
        self.instructions
            .iter()
            .map(|instruction| decode_instruction(instruction.as_bytes()))
            .collect()
    }
}

/// The three `execute` arguments, built fresh per compilation
///
/// Deserialized batches pass the same shape checks as `from_parts`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "BatchParts")]
pub struct CompiledBatch {
    token_table: TokenTable,
    deposits: Vec<i128>,
    operations: Vec<CompiledOperation>,
}

impl CompiledBatch {
    /// Deposits start zeroed, one slot per table entry; the vault fills them
    pub(crate) fn new(token_table: TokenTable, operations: Vec<CompiledOperation>) -> Self {
        let deposits = vec![0; token_table.len()];
        Self {
            token_table,
            deposits,
            operations,
        }
    }

    /// Assemble a batch read back from elsewhere
    ///
    /// Requires one deposit per table entry and every instruction to decode
    /// with a token index inside the table.
    pub fn from_parts(
        token_table: TokenTable,
        deposits: Vec<i128>,
        operations: Vec<CompiledOperation>,
    ) -> Result<Self, BatchError> {
        if deposits.len() != token_table.len() {
            return Err(BatchError::DepositCountMismatch {
                tokens: token_table.len(),
                deposits: deposits.len(),
            });
        }

        for (operation, compiled) in operations.iter().enumerate() {
            for (instruction, decoded) in compiled.decode_instructions()?.into_iter().enumerate() {
                if decoded.token_index as usize >= token_table.len() {
                    return Err(BatchError::TokenIndexOutOfRange {
                        operation,
                        instruction,
                        index: decoded.token_index,
                        tokens: token_table.len(),
                    });
                }
            }
        }

        Ok(Self {
            token_table,
            deposits,
            operations,
        })
    }

    pub fn token_table(&self) -> &TokenTable {
        &self.token_table
    }

    pub fn deposits(&self) -> &[i128] {
        &self.deposits
    }

    pub fn operations(&self) -> &[CompiledOperation] {
        &self.operations
    }

    pub fn token_index(&self, token: &TokenReference) -> Option<usize> {
        self.token_table.index_of(token)
    }

    /// A batch with no operations is a valid no-op
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn into_parts(self) -> (TokenTable, Vec<i128>, Vec<CompiledOperation>) {
        (self.token_table, self.deposits, self.operations)
    }
}

#[derive(Deserialize)]
struct BatchParts {
    token_table: TokenTable,
    deposits: Vec<i128>,
    operations: Vec<CompiledOperation>,
}

impl TryFrom<BatchParts> for CompiledBatch {
    type Error = BatchError;

    fn try_from(parts: BatchParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.token_table, parts.deposits, parts.operations)
    }
}
