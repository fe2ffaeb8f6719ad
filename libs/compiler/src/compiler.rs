//! # Operation Compiler
//!
//! Turns an ordered list of operations into the three `execute` arguments:
//!
//! 1. collect every distinct token the instructions mention (full-triple identity)
//! 2. sort them by packed descriptor bytes into the token table
//! 3. rewrite each instruction to carry its token's table index
//! 4. emit one compiled operation per input operation, in input order
//! 5. attach a zeroed deposit slot per table entry
//!
//! Compilation is a pure function of its input. A `Compiler` holds only its
//! configuration, so one instance can be shared across threads freely.

use crate::batch::{CompiledBatch, CompiledOperation, TokenTable};
use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::operation::Operation;
use codec::{encode_instruction, encode_reference, encode_token_reference};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, operations: &[Operation]) -> Result<CompiledBatch, CompileError> {
        debug!(operations = operations.len(), "Compiling vault batch");
        self.check_batch_shape(operations)?;

        let table = TokenTable::from_tokens(operations.iter().flat_map(Operation::tokens));
        if table.len() > self.config.max_tokens {
            warn!(
                tokens = table.len(),
                limit = self.config.max_tokens,
                "Rejecting batch: token table over limit"
            );
            return Err(CompileError::TooManyTokens {
                count: table.len(),
                limit: self.config.max_tokens,
            });
        }

        let indices = table.index_map();
        let mut compiled = Vec::with_capacity(operations.len());

        for (op_index, operation) in operations.iter().enumerate() {
            let mut instructions = Vec::with_capacity(operation.instructions.len());

            for (ins_index, instruction) in operation.instructions.iter().enumerate() {
                let token_index = indices
                    .get(&encode_token_reference(&instruction.token))
                    .copied()
                    .ok_or_else(|| CompileError::UnresolvedReference {
                        token: instruction.token.to_string(),
                        operation: op_index,
                        instruction: ins_index,
                    })?;

                trace!(
                    operation = op_index,
                    token = %instruction.token,
                    token_index,
                    kind = %instruction.kind,
                    amount = %instruction.amount,
                    "Resolved instruction"
                );

                instructions.push(encode_instruction(
                    token_index,
                    instruction.kind,
                    instruction.amount,
                )?);
            }

            compiled.push(CompiledOperation::new(
                encode_reference(&operation.reference),
                instructions,
            ));
        }

        debug!(
            tokens = table.len(),
            operations = compiled.len(),
            "Compiled vault batch"
        );
        Ok(CompiledBatch::new(table, compiled))
    }

    fn check_batch_shape(&self, operations: &[Operation]) -> Result<(), CompileError> {
        if let Some(limit) = self.config.max_operations {
            if operations.len() > limit {
                warn!(operations = operations.len(), limit, "Rejecting batch: too many operations");
                return Err(CompileError::TooManyOperations {
                    count: operations.len(),
                    limit,
                });
            }
        }

        if let Some(limit) = self.config.max_instructions_per_operation {
            if let Some((operation, op)) = operations
                .iter()
                .enumerate()
                .find(|(_, op)| op.instructions.len() > limit)
            {
                warn!(operation, limit, "Rejecting batch: too many instructions in one operation");
                return Err(CompileError::TooManyInstructions {
                    operation,
                    count: op.instructions.len(),
                    limit,
                });
            }
        }

        Ok(())
    }
}

/// Compile with the default configuration
pub fn compile(operations: &[Operation]) -> Result<CompiledBatch, CompileError> {
    Compiler::default().compile(operations)
}
