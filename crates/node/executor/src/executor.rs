//! The role independent executor.

use crate::{
    BlockExecutor, BlockProposer, ExecutorError, L2Node, SequencerExecutor, ValidatorExecutor,
};
use alloy_primitives::Bytes;
use async_trait::async_trait;
use morph_engine::ExecutionEngine;
use morph_protocol::BlockData;
use morph_storage::L1MessageReader;

/// A block executor in one of the two node roles.
#[derive(Debug)]
pub enum Executor<E, R> {
    /// Proposes, checks and delivers blocks.
    Sequencer(SequencerExecutor<E, R>),
    /// Checks and delivers blocks.
    Validator(ValidatorExecutor<E>),
}

impl<E, R> Executor<E, R>
where
    E: ExecutionEngine,
    R: L1MessageReader,
{
    /// Returns `true` in the sequencer role.
    pub const fn is_sequencer(&self) -> bool {
        matches!(self, Self::Sequencer(_))
    }

    /// Returns the role as a [`BlockExecutor`].
    pub fn as_block_executor(&self) -> &dyn BlockExecutor {
        match self {
            Self::Sequencer(sequencer) => sequencer,
            Self::Validator(validator) => validator,
        }
    }

    /// Returns the queue index of the last L1 message included on L2.
    pub async fn latest_processed_l1_index(&self) -> u64 {
        self.as_block_executor().latest_processed_l1_index().await
    }
}

impl<E, R> From<SequencerExecutor<E, R>> for Executor<E, R> {
    fn from(sequencer: SequencerExecutor<E, R>) -> Self {
        Self::Sequencer(sequencer)
    }
}

impl<E, R> From<ValidatorExecutor<E>> for Executor<E, R> {
    fn from(validator: ValidatorExecutor<E>) -> Self {
        Self::Validator(validator)
    }
}

#[async_trait]
impl<E, R> L2Node for Executor<E, R>
where
    E: ExecutionEngine,
    R: L1MessageReader,
{
    async fn request_block_data(&self, height: u64) -> Result<BlockData, ExecutorError> {
        match self {
            Self::Sequencer(sequencer) => sequencer.request_block_data(height).await,
            Self::Validator(_) => Err(ExecutorError::NotPermitted),
        }
    }

    async fn check_block_data(&self, block: &BlockData) -> Result<bool, ExecutorError> {
        self.as_block_executor().check_block_data(block).await
    }

    async fn deliver_block(
        &self,
        block: &BlockData,
        validators: &[Bytes],
        attestations: &[Bytes],
    ) -> Result<u64, ExecutorError> {
        self.as_block_executor().deliver_block(block, validators, attestations).await
    }
}
