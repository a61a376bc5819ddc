//! Main database access structure for the L1 message queue.

use crate::{
    Metrics,
    error::StorageError,
    providers::L1MessageProvider,
    traits::{L1MessageReader, L1MessageWriter, SyncCheckpointReader, check_append},
};
use morph_protocol::L1Message;
use reth_db::{
    DatabaseEnv,
    mdbx::{DatabaseArguments, init_db_for},
};
use reth_db_api::{database::Database, transaction::DbTx};
use std::{path::Path, time::Instant};
use tracing::{info, warn};

/// The MDBX-backed L1 message queue.
///
/// Every read opens its own read transaction. Appends validate and write inside a single write
/// transaction that is committed only when every step succeeds.
#[derive(Debug)]
pub struct MessageDb {
    metrics_enabled: Option<bool>,

    env: DatabaseEnv,
}

impl MessageDb {
    /// Creates or opens a database environment at the given path.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let env = init_db_for::<_, crate::models::Tables>(path, DatabaseArguments::default())?;
        info!(target: "morph::storage", path = %path.display(), "Opened L1 message database");
        Ok(Self { metrics_enabled: None, env })
    }

    /// Enables metrics on the database environment.
    pub fn with_metrics(mut self) -> Self {
        self.metrics_enabled = Some(true);
        Metrics::init();
        self
    }

    fn observe_call<T, F: FnOnce() -> Result<T, StorageError>>(
        &self,
        name: &'static str,
        f: F,
    ) -> Result<T, StorageError> {
        if !self.metrics_enabled.unwrap_or(false) {
            return f();
        }
        let start = Instant::now();
        let result = f();
        Metrics::record_result(name, &result, start.elapsed());
        result
    }
}

impl L1MessageReader for MessageDb {
    fn read_l1_messages(&self, from: u64, to: u64) -> Result<Vec<L1Message>, StorageError> {
        self.observe_call(Metrics::STORAGE_METHOD_READ_L1_MESSAGES, || {
            self.env.view(|tx| L1MessageProvider::new(tx).read_l1_messages(from, to))?
        })
    }

    fn get_l1_message(&self, queue_index: u64) -> Result<Option<L1Message>, StorageError> {
        self.observe_call(Metrics::STORAGE_METHOD_GET_L1_MESSAGE, || {
            self.env.view(|tx| L1MessageProvider::new(tx).get_l1_message(queue_index))?
        })
    }

    fn latest_l1_message(&self) -> Result<Option<L1Message>, StorageError> {
        self.observe_call(Metrics::STORAGE_METHOD_LATEST_L1_MESSAGE, || {
            self.env.view(|tx| L1MessageProvider::new(tx).latest_l1_message())?
        })
    }
}

impl SyncCheckpointReader for MessageDb {
    fn synced_l1_height(&self) -> Result<Option<u64>, StorageError> {
        self.observe_call(Metrics::STORAGE_METHOD_SYNCED_L1_HEIGHT, || {
            self.env.view(|tx| L1MessageProvider::new(tx).synced_l1_height())?
        })
    }
}

impl L1MessageWriter for MessageDb {
    fn append_l1_messages(
        &self,
        messages: &[L1Message],
        synced_l1_height: u64,
    ) -> Result<(), StorageError> {
        self.observe_call(Metrics::STORAGE_METHOD_APPEND_L1_MESSAGES, || {
            let tx = self.env.tx_mut()?;
            let provider = L1MessageProvider::new(&tx);

            let written = provider
                .latest_l1_message()
                .and_then(|latest| {
                    let checkpoint = provider.synced_l1_height()?;
                    check_append(
                        latest.map(|message| message.queue_index()),
                        checkpoint,
                        messages,
                        synced_l1_height,
                    )
                })
                .and_then(|()| provider.put_l1_messages(messages, synced_l1_height));

            if let Err(err) = written {
                warn!(
                    target: "morph::storage",
                    %err,
                    synced_l1_height,
                    "Rejected L1 message append",
                );
                tx.abort();
                return Err(err);
            }
            tx.commit()?;

            if self.metrics_enabled.unwrap_or(false) {
                if let Some(last) = messages.last() {
                    metrics::gauge!(Metrics::L1_MESSAGE_LATEST_QUEUE_INDEX)
                        .set(last.queue_index() as f64);
                }
                metrics::gauge!(Metrics::L1_SYNCED_HEIGHT).set(synced_l1_height as f64);
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};
    use morph_protocol::L1MessageTx;
    use tempfile::TempDir;

    fn message(queue_index: u64, l1_height: u64, log_index: u64) -> L1Message {
        L1Message {
            tx: L1MessageTx {
                queue_index,
                gas_limit: 100_000,
                to: Some(Address::random()),
                value: U256::from(queue_index),
                sender: Address::random(),
                ..Default::default()
            },
            l1_height,
            l1_tx_hash: B256::random(),
            log_index,
        }
    }

    #[test]
    fn test_create_and_open_db() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db_path = tmp_dir.path().join("l1_messages");
        let db = MessageDb::new(&db_path);
        assert!(db.is_ok(), "Should create or open database");
    }

    #[test]
    fn test_empty_db() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        assert_eq!(db.latest_l1_message().unwrap(), None);
        assert_eq!(db.synced_l1_height().unwrap(), None);
        assert_eq!(db.get_l1_message(1).unwrap(), None);
        assert!(db.read_l1_messages(1, 10).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        let batch = vec![message(1, 10, 0), message(2, 10, 3), message(3, 12, 1)];
        db.append_l1_messages(&batch, 15).expect("append");

        assert_eq!(db.synced_l1_height().unwrap(), Some(15));
        assert_eq!(db.latest_l1_message().unwrap(), Some(batch[2].clone()));
        assert_eq!(db.get_l1_message(2).unwrap(), Some(batch[1].clone()));
        assert_eq!(db.read_l1_messages(1, 3).unwrap(), batch);
        assert_eq!(db.read_l1_messages(2, 100).unwrap(), batch[1..].to_vec());
        assert!(db.read_l1_messages(3, 2).unwrap().is_empty());
        assert!(db.read_l1_messages(4, 10).unwrap().is_empty());
    }

    #[test]
    fn test_append_checkpoint_only() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        db.append_l1_messages(&[], 20).expect("empty append");
        assert_eq!(db.synced_l1_height().unwrap(), Some(20));
        assert_eq!(db.latest_l1_message().unwrap(), None);
    }

    #[test]
    fn test_rejected_append_leaves_store_untouched() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        db.append_l1_messages(&[message(1, 10, 0)], 10).expect("append");

        // The first message is valid, the second leaves a gap.
        let err = db.append_l1_messages(&[message(2, 11, 0), message(4, 11, 1)], 11).unwrap_err();
        assert_eq!(err, StorageError::NonContiguousIndex { expected: 3, got: 4 });

        assert_eq!(db.get_l1_message(2).unwrap(), None);
        assert_eq!(db.synced_l1_height().unwrap(), Some(10));
        assert_eq!(db.latest_l1_message().unwrap().map(|m| m.queue_index()), Some(1));
    }

    #[test]
    fn test_append_checkpoint_regression() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        db.append_l1_messages(&[], 50).expect("append");
        let err = db.append_l1_messages(&[], 49).unwrap_err();
        assert_eq!(err, StorageError::CheckpointRegression { current: 50, incoming: 49 });
    }

    #[test]
    fn test_persists_across_reopen() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let batch = vec![message(1, 3, 0), message(2, 4, 0)];
        {
            let db = MessageDb::new(tmp_dir.path()).expect("create db");
            db.append_l1_messages(&batch, 4).expect("append");
        }

        let db = MessageDb::new(tmp_dir.path()).expect("reopen db");
        assert_eq!(db.read_l1_messages(1, 2).unwrap(), batch);
        assert_eq!(db.synced_l1_height().unwrap(), Some(4));
    }

    #[test]
    fn test_creation_message_round_trips() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = MessageDb::new(tmp_dir.path()).expect("create db");

        let mut creation = message(1, 1, 0);
        creation.tx.to = None;
        db.append_l1_messages(std::slice::from_ref(&creation), 1).expect("append");

        let stored = db.get_l1_message(1).unwrap().expect("stored");
        assert!(stored.tx.is_creation());
        assert_eq!(stored, creation);
    }
}
