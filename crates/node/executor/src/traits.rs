use crate::ExecutorError;
use alloy_primitives::Bytes;
use async_trait::async_trait;
use morph_protocol::BlockData;
use std::fmt::Debug;

/// Checking and delivery of blocks, available in every role.
#[async_trait]
pub trait BlockExecutor: Debug + Send + Sync {
    /// Checks a proposed block.
    ///
    /// Returns `Ok(false)` for an empty or invalid proposal and an error only when the block
    /// cannot be decoded or a dependency fails.
    async fn check_block_data(&self, block: &BlockData) -> Result<bool, ExecutorError>;

    /// Imports an agreed block and returns the resulting height.
    ///
    /// An empty block imports nothing and returns the current height.
    async fn deliver_block(
        &self,
        block: &BlockData,
        validators: &[Bytes],
        attestations: &[Bytes],
    ) -> Result<u64, ExecutorError>;

    /// Returns the queue index of the last L1 message included on L2, zero if none.
    async fn latest_processed_l1_index(&self) -> u64;
}

/// Proposal of new blocks.
#[async_trait]
pub trait BlockProposer: BlockExecutor {
    /// Builds a proposal at `height`. An empty result means there is nothing to propose.
    async fn request_block_data(&self, height: u64) -> Result<BlockData, ExecutorError>;
}

/// The callback surface the consensus driver calls, independent of the node's role.
#[async_trait]
pub trait L2Node: Debug + Send + Sync {
    /// Builds a proposal at `height`.
    async fn request_block_data(&self, height: u64) -> Result<BlockData, ExecutorError>;

    /// Checks a proposed block.
    async fn check_block_data(&self, block: &BlockData) -> Result<bool, ExecutorError>;

    /// Imports an agreed block and returns the resulting height.
    async fn deliver_block(
        &self,
        block: &BlockData,
        validators: &[Bytes],
        attestations: &[Bytes],
    ) -> Result<u64, ExecutorError>;
}
