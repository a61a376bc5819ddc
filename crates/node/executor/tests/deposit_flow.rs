//! Deposits observed on L1 flow through the queue into proposed and delivered L2 blocks.

use alloy_primitives::{Address, B256, U256};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_transport::TransportError;
use async_trait::async_trait;
use morph_engine::test_utils::MockExecutionEngine;
use morph_executor::{Executor, ExecutorConfig, ExecutorError, L2Node, SequencerExecutor};
use morph_protocol::{AttestedHeader, ExtendedPayload, test_utils::DepositLogBuilder};
use morph_storage::{L1MessageReader, test_utils::InMemoryL1MessageStore};
use morph_sync::{L1Source, SyncConfig, Syncer};
use std::sync::Arc;

const CONTRACT: Address = Address::repeat_byte(0xdd);

#[derive(Debug)]
struct StaticL1 {
    head: u64,
    logs: Vec<Log>,
}

#[async_trait]
impl L1Source for StaticL1 {
    async fn latest_block_number(&self) -> Result<u64, TransportError> {
        Ok(self.head)
    }

    async fn finalized_block_number(&self) -> Result<Option<u64>, TransportError> {
        Ok(Some(self.head))
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, TransportError> {
        let from = filter.get_from_block().unwrap_or_default();
        let to = filter.get_to_block().unwrap_or(u64::MAX);
        Ok(self
            .logs
            .iter()
            .filter(|log| log.block_number.is_some_and(|n| n >= from && n <= to))
            .cloned()
            .collect())
    }
}

fn deposit(builder: DepositLogBuilder, block: u64, log_index: u64) -> Log {
    Log {
        inner: builder.contract(CONTRACT).build(),
        block_number: Some(block),
        transaction_hash: Some(B256::with_last_byte(log_index as u8)),
        log_index: Some(log_index),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_deposits_are_proposed_and_delivered() {
    let l1 = StaticL1 {
        head: 10,
        logs: vec![
            deposit(DepositLogBuilder::new().value(U256::from(1)), 2, 0),
            deposit(DepositLogBuilder::new().value(U256::from(2)), 2, 1),
            deposit(DepositLogBuilder::new().offset(64), 3, 0),
            deposit(DepositLogBuilder::new().value(U256::from(3)), 5, 0),
        ],
    };
    let store = Arc::new(InMemoryL1MessageStore::new());
    let syncer =
        Syncer::new(l1, store.clone(), SyncConfig::new(CONTRACT).with_start_height(1)).unwrap();

    let report = syncer.sync_once().await.unwrap();
    assert_eq!(report.appended, vec![1, 2, 3]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].l1_height, Some(3));
    assert_eq!(store.read_l1_messages(1, 10).unwrap().len(), 3);

    let engine = MockExecutionEngine::at_height(7);
    let node: Executor<_, _> = SequencerExecutor::new(
        engine.clone(),
        store.clone(),
        ExecutorConfig::default().with_max_l1_messages_per_block(2),
    )
    .unwrap()
    .into();

    let block = node.request_block_data(8).await.unwrap();
    let header = AttestedHeader::decode(&block.header).unwrap();
    let payload = ExtendedPayload::decode(&block.payload).unwrap();
    assert_eq!(header.number, 8);
    assert_eq!(payload.l1_messages, store.read_l1_messages(1, 2).unwrap());
    for (tx, message) in block.txs.iter().zip(&payload.l1_messages) {
        assert_eq!(*tx, message.tx.encoded_2718());
    }
    assert!(node.check_block_data(&block).await.unwrap());
    assert_eq!(node.latest_processed_l1_index().await, 0);

    // Another node moved the chain first: the proposal no longer extends the head.
    let ahead = MockExecutionEngine::at_height(8);
    let late: Executor<_, _> =
        SequencerExecutor::new(ahead, store.clone(), ExecutorConfig::default()).unwrap().into();
    let err = late.deliver_block(&block, &[], &[]).await.unwrap_err();
    assert!(matches!(err, ExecutorError::WrongBlockNumber { expected: 9, got: 8 }));
    assert_eq!(late.latest_processed_l1_index().await, 0);

    assert_eq!(node.deliver_block(&block, &[], &[]).await.unwrap(), 8);
    assert_eq!(node.latest_processed_l1_index().await, 2);
    assert_eq!(engine.state().await.height, 8);

    let next = node.request_block_data(9).await.unwrap();
    let payload = ExtendedPayload::decode(&next.payload).unwrap();
    assert_eq!(payload.l1_messages.len(), 1);
    assert_eq!(payload.l1_messages[0].queue_index(), 3);
    assert_eq!(payload.l1_messages[0].tx.value, U256::from(3));
}
