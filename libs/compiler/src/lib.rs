//! # Vault Batch Compiler
//!
//! Compiles a list of high-level vault operations (swaps, deposits,
//! liquidity actions against pools and gauges) into the arguments of one
//! atomic `execute` call:
//!
//! ```text
//! [Operation { reference, [Instruction] }]
//!         ↓ compile
//! CompiledBatch { token_table, deposits (zeroed), operations }
//!         ↓ ExecutionGateway::execute
//! calldata / submission layer
//! ```
//!
//! ## Example
//!
//! ```rust
//! use types::{Address, SignedAmount, TokenReference};
//! use vault_compiler::{compile, Instruction, Operation};
//!
//! let usdc = TokenReference::erc20(Address::new([0xa0; 20]));
//! let pool = Address::new([0x01; 20]);
//!
//! let batch = compile(&[Operation::pool(
//!     pool,
//!     vec![Instruction::exactly(usdc, SignedAmount::pay(1234).unwrap())],
//! )])
//! .unwrap();
//!
//! assert_eq!(batch.token_table().len(), 1);
//! assert_eq!(batch.deposits(), &[0]);
//! ```

pub mod abi;
pub mod batch;
pub mod compiler;
pub mod config;
pub mod error;
pub mod gateway;
pub mod operation;

pub use abi::{decode_execute_call, encode_execute_call, execute_function, execute_selector};
pub use batch::{CompiledBatch, CompiledOperation, TokenTable};
pub use compiler::{compile, Compiler};
pub use config::CompilerConfig;
pub use error::{AbiError, BatchError, CompileError, ConfigError};
pub use gateway::{compile_and_execute, CalldataGateway, ExecuteError, ExecutionGateway};
pub use operation::{Instruction, Operation};
