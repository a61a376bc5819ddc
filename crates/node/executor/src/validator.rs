//! The validator role.

use crate::{BlockExecutor, ExecutorConfig, ExecutorError, state::ExecutorState};
use alloy_primitives::Bytes;
use async_trait::async_trait;
use morph_engine::ExecutionEngine;
use morph_protocol::BlockData;

/// An executor that checks and delivers blocks proposed by others.
///
/// It has no L1 message queue, so declared L1 messages are checked for shape only.
#[derive(Debug)]
pub struct ValidatorExecutor<E> {
    state: ExecutorState<E>,
}

impl<E: ExecutionEngine> ValidatorExecutor<E> {
    /// Creates a validator.
    pub fn new(engine: E, config: ExecutorConfig) -> Result<Self, ExecutorError> {
        Ok(Self { state: ExecutorState::new(engine, config)? })
    }

    /// Returns the execution engine.
    pub const fn engine(&self) -> &E {
        self.state.engine()
    }
}

#[async_trait]
impl<E: ExecutionEngine> BlockExecutor for ValidatorExecutor<E> {
    async fn check_block_data(&self, block: &BlockData) -> Result<bool, ExecutorError> {
        self.state.check(block, None).await
    }

    async fn deliver_block(
        &self,
        block: &BlockData,
        validators: &[Bytes],
        attestations: &[Bytes],
    ) -> Result<u64, ExecutorError> {
        self.state.deliver(block, validators, attestations).await
    }

    async fn latest_processed_l1_index(&self) -> u64 {
        self.state.latest_processed_l1_index().await
    }
}
