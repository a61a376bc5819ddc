use crate::EngineClientError;
use alloy_primitives::Bytes;
use async_trait::async_trait;
use morph_protocol::ExecutableL2Data;
use std::fmt::Debug;

/// The execution engine operations the block executor depends on.
#[async_trait]
pub trait ExecutionEngine: Debug + Send + Sync {
    /// Assembles a candidate block at `number` that starts with `transactions`.
    ///
    /// The engine may append transactions from its own pool after the given ones.
    async fn assemble_l2_block(
        &self,
        number: u64,
        transactions: Vec<Bytes>,
    ) -> Result<ExecutableL2Data, EngineClientError>;

    /// Executes the candidate and reports whether its state transition is valid.
    async fn validate_l2_block(
        &self,
        block: &ExecutableL2Data,
    ) -> Result<bool, EngineClientError>;

    /// Imports the candidate as the new head block.
    async fn new_l2_block(&self, block: &ExecutableL2Data) -> Result<(), EngineClientError>;

    /// Returns the number of the current head block.
    async fn block_number(&self) -> Result<u64, EngineClientError>;
}
