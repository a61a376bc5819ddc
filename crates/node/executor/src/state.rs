//! State and block handling shared by both executor roles.

use crate::{ExecutorConfig, ExecutorError, InclusionError, Metrics, verify_l1_inclusion};
use alloy_primitives::Bytes;
use morph_engine::ExecutionEngine;
use morph_protocol::{AttestedHeader, BlockData, ExecutableL2Data, ExtendedPayload};
use morph_storage::L1MessageReader;
use tokio::sync::Mutex;

/// The execution engine handle and the L1 message cursor.
///
/// The cursor lock is held for the whole of a delivery, so deliveries are serialized even when
/// the driver calls concurrently.
#[derive(Debug)]
pub(crate) struct ExecutorState<E> {
    engine: E,
    max_l1_messages_per_block: u64,
    latest_processed_l1_index: Mutex<u64>,
}

impl<E: ExecutionEngine> ExecutorState<E> {
    pub(crate) fn new(engine: E, config: ExecutorConfig) -> Result<Self, ExecutorError> {
        config.validate()?;
        Ok(Self {
            engine,
            max_l1_messages_per_block: config.max_l1_messages_per_block,
            latest_processed_l1_index: Mutex::new(config.latest_processed_l1_index),
        })
    }

    pub(crate) const fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) const fn max_l1_messages_per_block(&self) -> u64 {
        self.max_l1_messages_per_block
    }

    pub(crate) async fn latest_processed_l1_index(&self) -> u64 {
        *self.latest_processed_l1_index.lock().await
    }

    /// Checks a proposal. With a `local` queue, declared L1 messages must also match it.
    pub(crate) async fn check(
        &self,
        block: &BlockData,
        local: Option<&dyn L1MessageReader>,
    ) -> Result<bool, ExecutorError> {
        if block.is_empty() {
            return Ok(false);
        }
        let header = AttestedHeader::decode(&block.header)?;
        let payload = ExtendedPayload::decode(&block.payload)?;

        let next_index = self.latest_processed_l1_index().await.saturating_add(1);
        if let Err(err) = verify_l1_inclusion(
            &payload.l1_messages,
            &block.txs,
            next_index,
            self.max_l1_messages_per_block,
        ) {
            return Ok(Self::reject(header.number, &err));
        }

        if let Some(reader) = local {
            if let Some(err) = Self::compare_with_queue(reader, &payload, next_index)? {
                return Ok(Self::reject(header.number, &err));
            }
        }

        let number = header.number;
        let data = ExecutableL2Data::from_parts(block.txs.clone(), header, payload);
        let valid = self.engine.validate_l2_block(&data).await?;
        if !valid {
            warn!(target: "morph::executor", number, "Execution engine rejected block");
            metrics::counter!(Metrics::EXECUTOR_BLOCKS_REJECTED_TOTAL, "stage" => Metrics::STAGE_CHECK)
                .increment(1);
        }
        Ok(valid)
    }

    /// Imports an agreed block and advances the cursor by the L1 messages it carries.
    pub(crate) async fn deliver(
        &self,
        block: &BlockData,
        validators: &[Bytes],
        attestations: &[Bytes],
    ) -> Result<u64, ExecutorError> {
        let mut latest_processed_l1_index = self.latest_processed_l1_index.lock().await;
        let current = self.engine.block_number().await?;
        if block.is_empty() {
            trace!(target: "morph::executor", height = current, "Empty delivery");
            return Ok(current);
        }

        let header = AttestedHeader::decode(&block.header)?;
        let payload = ExtendedPayload::decode(&block.payload)?;

        let expected = current + 1;
        if header.number != expected {
            warn!(
                target: "morph::executor",
                expected,
                got = header.number,
                "Refusing to deliver block at wrong height",
            );
            metrics::counter!(
                Metrics::EXECUTOR_BLOCKS_REJECTED_TOTAL,
                "stage" => Metrics::STAGE_DELIVER
            )
            .increment(1);
            return Err(ExecutorError::WrongBlockNumber { expected, got: header.number });
        }

        if let Err(err) = verify_l1_inclusion(
            &payload.l1_messages,
            &block.txs,
            latest_processed_l1_index.saturating_add(1),
            self.max_l1_messages_per_block,
        ) {
            warn!(
                target: "morph::executor",
                number = header.number,
                %err,
                "Refusing to deliver block with invalid L1 messages",
            );
            metrics::counter!(
                Metrics::EXECUTOR_BLOCKS_REJECTED_TOTAL,
                "stage" => Metrics::STAGE_DELIVER
            )
            .increment(1);
            return Err(err.into());
        }

        debug!(
            target: "morph::executor",
            number = header.number,
            ?validators,
            ?attestations,
            "Delivering block",
        );

        let number = header.number;
        let included = payload.l1_messages.len() as u64;
        let data = ExecutableL2Data::from_parts(block.txs.clone(), header, payload);
        self.engine.new_l2_block(&data).await?;

        *latest_processed_l1_index = latest_processed_l1_index.saturating_add(included);

        metrics::counter!(Metrics::EXECUTOR_BLOCKS_DELIVERED_TOTAL).increment(1);
        metrics::gauge!(Metrics::EXECUTOR_CURRENT_HEIGHT).set(number as f64);
        metrics::gauge!(Metrics::EXECUTOR_LATEST_PROCESSED_L1_INDEX)
            .set(*latest_processed_l1_index as f64);
        info!(
            target: "morph::executor",
            number,
            transactions = data.transactions.len(),
            l1_messages = included,
            latest_processed_l1_index = *latest_processed_l1_index,
            "Delivered block",
        );
        Ok(number)
    }

    fn compare_with_queue(
        reader: &dyn L1MessageReader,
        payload: &ExtendedPayload,
        next_index: u64,
    ) -> Result<Option<InclusionError>, ExecutorError> {
        let Some(last) = (payload.l1_messages.len() as u64).checked_sub(1) else {
            return Ok(None);
        };
        let stored = reader.read_l1_messages(next_index, next_index.saturating_add(last))?;
        let mismatch = payload
            .l1_messages
            .iter()
            .enumerate()
            .find(|(offset, message)| stored.get(*offset) != Some(*message));
        Ok(mismatch
            .map(|(_, message)| InclusionError::UnknownMessage { queue_index: message.queue_index() }))
    }

    fn reject(number: u64, err: &InclusionError) -> bool {
        warn!(target: "morph::executor", number, %err, "Invalid L1 message inclusion");
        metrics::counter!(Metrics::EXECUTOR_BLOCKS_REJECTED_TOTAL, "stage" => Metrics::STAGE_CHECK)
            .increment(1);
        false
    }
}
