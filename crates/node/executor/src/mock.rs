//! A single node block production driver.

use crate::{ExecutorError, L2Node};
use morph_protocol::BlockData;
use std::{sync::Arc, time::Duration};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Drives a sequencer without a consensus layer.
///
/// Every tick it learns the current height, requests a proposal for the next one, checks it and
/// delivers it.
#[derive(Debug)]
pub struct MockSequencer<N> {
    node: Arc<N>,
    block_time: Duration,
}

impl<N: L2Node> MockSequencer<N> {
    /// Creates a driver producing a block every `block_time`.
    pub const fn new(node: Arc<N>, block_time: Duration) -> Self {
        Self { node, block_time }
    }

    /// Produces blocks until cancelled. Failed rounds are logged and retried on the next tick.
    pub async fn run(self, cancellation: CancellationToken) {
        let mut ticker = interval(self.block_time);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(target: "morph::executor", block_time = ?self.block_time, "Starting mock sequencer");
        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(target: "morph::executor", "Received shutdown signal. Exiting mock sequencer.");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(err) = self.produce_block().await {
                        warn!(target: "morph::executor", %err, "Mock sequencer round failed");
                    }
                }
            }
        }
    }

    /// Runs one round. Returns the new height, or `None` when nothing was delivered.
    pub async fn produce_block(&self) -> Result<Option<u64>, ExecutorError> {
        let height = self.node.deliver_block(&BlockData::default(), &[], &[]).await?;
        let block = self.node.request_block_data(height + 1).await?;
        if block.is_empty() {
            return Ok(None);
        }
        if !self.node.check_block_data(&block).await? {
            warn!(target: "morph::executor", height = height + 1, "Own proposal failed its check");
            return Ok(None);
        }
        self.node.deliver_block(&block, &[], &[]).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Executor, ExecutorConfig, SequencerExecutor};
    use alloy_primitives::{Address, Bytes};
    use morph_engine::test_utils::{MockEngineState, MockExecutionEngine};
    use morph_protocol::{L1Message, L1MessageTx};
    use morph_storage::{L1MessageWriter, test_utils::InMemoryL1MessageStore};

    fn node(
        engine: MockExecutionEngine,
        store: Arc<InMemoryL1MessageStore>,
    ) -> Arc<Executor<MockExecutionEngine, InMemoryL1MessageStore>> {
        Arc::new(SequencerExecutor::new(engine, store, ExecutorConfig::default()).unwrap().into())
    }

    #[tokio::test]
    async fn test_produce_block_delivers_next_height() {
        let store = Arc::new(InMemoryL1MessageStore::new());
        let message = L1Message {
            tx: L1MessageTx { queue_index: 1, to: Some(Address::ZERO), ..Default::default() },
            l1_height: 1,
            ..Default::default()
        };
        store.append_l1_messages(&[message], 1).unwrap();

        let engine = MockExecutionEngine::at_height(4);
        let node = node(engine.clone(), store);
        let driver = MockSequencer::new(node.clone(), Duration::from_secs(1));

        assert_eq!(driver.produce_block().await.unwrap(), Some(5));
        assert_eq!(node.latest_processed_l1_index().await, 1);
        assert_eq!(engine.state().await.height, 5);
    }

    #[tokio::test]
    async fn test_produce_block_without_transactions() {
        let engine = MockExecutionEngine::new();
        let driver = MockSequencer::new(
            node(engine.clone(), Arc::new(InMemoryL1MessageStore::new())),
            Duration::from_secs(1),
        );
        assert_eq!(driver.produce_block().await.unwrap(), None);
        assert!(engine.state().await.imported.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_produces_blocks_until_cancelled() {
        let engine = MockExecutionEngine::from_state(MockEngineState {
            pool_transactions: vec![Bytes::from_static(&[0x02, 0xc0])],
            ..Default::default()
        });
        let driver = MockSequencer::new(
            node(engine.clone(), Arc::new(InMemoryL1MessageStore::new())),
            Duration::from_millis(100),
        );

        let cancellation = CancellationToken::new();
        let handle = tokio::spawn(driver.run(cancellation.clone()));
        tokio::time::sleep(Duration::from_millis(350)).await;
        cancellation.cancel();
        handle.await.unwrap();

        assert!(engine.state().await.height >= 3);
    }
}
