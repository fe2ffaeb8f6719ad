//! The single call surface a compiled batch is handed to
//!
//! The vault's execution semantics (balances, slippage, reentrancy) live
//! behind this trait and are not modelled here. Implementations receive the
//! batch by shared reference and must not expect to mutate it.

use crate::abi::encode_execute_parts;
use crate::batch::CompiledOperation;
use crate::compiler::Compiler;
use crate::error::{AbiError, CompileError};
use crate::operation::Operation;
use codec::ReferenceBytes;
use thiserror::Error;
use tracing::debug;

pub trait ExecutionGateway {
    type Receipt;
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(
        &self,
        token_table: &[ReferenceBytes],
        deposits: &[i128],
        operations: &[CompiledOperation],
    ) -> Result<Self::Receipt, Self::Error>;
}

/// Produces `execute` calldata for a signing/submission layer to send
#[derive(Debug, Clone, Copy, Default)]
pub struct CalldataGateway;

impl ExecutionGateway for CalldataGateway {
    type Receipt = Vec<u8>;
    type Error = AbiError;

    fn execute(
        &self,
        token_table: &[ReferenceBytes],
        deposits: &[i128],
        operations: &[CompiledOperation],
    ) -> Result<Self::Receipt, Self::Error> {
        encode_execute_parts(token_table, deposits, operations)
    }
}

#[derive(Debug, Error)]
pub enum ExecuteError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Execution gateway failed: {0}")]
    Gateway(#[source] E),
}

impl Compiler {
    /// Compile and hand the batch to `gateway`; nothing reaches the gateway
    /// if compilation fails
    pub fn compile_and_execute<G: ExecutionGateway>(
        &self,
        gateway: &G,
        operations: &[Operation],
    ) -> Result<G::Receipt, ExecuteError<G::Error>> {
        let batch = self.compile(operations)?;
        debug!(
            tokens = batch.token_table().len(),
            operations = batch.operations().len(),
            "Submitting batch to execution gateway"
        );
        gateway
            .execute(
                batch.token_table().encoded(),
                batch.deposits(),
                batch.operations(),
            )
            .map_err(ExecuteError::Gateway)
    }
}

/// Compile with the default configuration and execute
pub fn compile_and_execute<G: ExecutionGateway>(
    gateway: &G,
    operations: &[Operation],
) -> Result<G::Receipt, ExecuteError<G::Error>> {
    Compiler::default().compile_and_execute(gateway, operations)
}
