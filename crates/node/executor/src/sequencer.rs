//! The sequencer role.

use crate::{
    BlockExecutor, BlockProposer, ExecutorConfig, ExecutorError, Metrics, leading_l1_messages,
    state::ExecutorState,
};
use alloy_primitives::Bytes;
use async_trait::async_trait;
use morph_engine::ExecutionEngine;
use morph_protocol::BlockData;
use morph_storage::L1MessageReader;
use std::sync::Arc;

/// An executor that proposes blocks from the local L1 message queue.
#[derive(Debug)]
pub struct SequencerExecutor<E, R> {
    state: ExecutorState<E>,
    l1_messages: Arc<R>,
}

impl<E, R> SequencerExecutor<E, R>
where
    E: ExecutionEngine,
    R: L1MessageReader,
{
    /// Creates a sequencer reading pending L1 messages from `l1_messages`.
    pub fn new(
        engine: E,
        l1_messages: Arc<R>,
        config: ExecutorConfig,
    ) -> Result<Self, ExecutorError> {
        Ok(Self { state: ExecutorState::new(engine, config)?, l1_messages })
    }

    /// Returns the execution engine.
    pub const fn engine(&self) -> &E {
        self.state.engine()
    }
}

#[async_trait]
impl<E, R> BlockExecutor for SequencerExecutor<E, R>
where
    E: ExecutionEngine,
    R: L1MessageReader,
{
    async fn check_block_data(&self, block: &BlockData) -> Result<bool, ExecutorError> {
        self.state.check(block, Some(self.l1_messages.as_ref())).await
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

#[async_trait]
impl<E, R> BlockProposer for SequencerExecutor<E, R>
where
    E: ExecutionEngine,
    R: L1MessageReader,
{
    async fn request_block_data(&self, height: u64) -> Result<BlockData, ExecutorError> {
        let next_index = self.state.latest_processed_l1_index().await.saturating_add(1);
        let last_index = next_index.saturating_add(self.state.max_l1_messages_per_block() - 1);
        let pending = self.l1_messages.read_l1_messages(next_index, last_index)?;
        let envelopes: Vec<Bytes> =
            pending.iter().map(|message| message.tx.encoded_2718()).collect();

        let block = self.state.engine().assemble_l2_block(height, envelopes).await?;
        if block.transactions.is_empty() {
            debug!(target: "morph::executor", height, "Nothing to propose");
            return Ok(BlockData::default());
        }

        let included = leading_l1_messages(pending, &block.transactions);
        let (txs, header, payload) = block.into_parts(included);
        let header = header.encode().map_err(ExecutorError::Encode)?;
        let encoded_payload = payload.encode().map_err(ExecutorError::Encode)?;

        metrics::counter!(Metrics::EXECUTOR_BLOCKS_PROPOSED_TOTAL).increment(1);
        info!(
            target: "morph::executor",
            height,
            transactions = txs.len(),
            l1_messages = payload.l1_messages.len(),
            "Proposed block",
        );
        Ok(BlockData { txs, header, payload: encoded_payload })
    }
}
