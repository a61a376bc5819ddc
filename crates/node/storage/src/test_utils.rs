//! In-memory storage for tests.

use crate::{
    StorageError,
    traits::{L1MessageReader, L1MessageWriter, SyncCheckpointReader, check_append},
};
use morph_protocol::L1Message;
use std::{
    collections::BTreeMap,
    sync::{
        RwLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

#[derive(Debug, Default)]
struct Inner {
    messages: BTreeMap<u64, L1Message>,
    synced_l1_height: Option<u64>,
}

/// An in-memory L1 message queue with the same validation as [`crate::MessageDb`].
///
/// It can simulate a crash between writing messages and writing the checkpoint, which the MDBX
/// store never exhibits, to exercise recovery paths of its callers.
#[derive(Debug, Default)]
pub struct InMemoryL1MessageStore {
    inner: RwLock<Inner>,
    interrupt_next_append: AtomicBool,
    appends: AtomicUsize,
}

impl InMemoryL1MessageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next append store its messages and then fail before the checkpoint is written.
    pub fn interrupt_next_append(&self) {
        self.interrupt_next_append.store(true, Ordering::SeqCst);
    }

    /// Returns the number of successful appends.
    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }

    /// Returns a snapshot of every stored message in queue order.
    pub fn all_messages(&self) -> Result<Vec<L1Message>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.messages.values().cloned().collect())
    }
}

impl L1MessageReader for InMemoryL1MessageStore {
    fn read_l1_messages(&self, from: u64, to: u64) -> Result<Vec<L1Message>, StorageError> {
        if from > to {
            return Ok(Vec::new());
        }
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        let mut messages = Vec::new();
        for index in from..=to {
            match inner.messages.get(&index) {
                Some(message) => messages.push(message.clone()),
                None => break,
            }
        }
        Ok(messages)
    }

    fn get_l1_message(&self, queue_index: u64) -> Result<Option<L1Message>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.messages.get(&queue_index).cloned())
    }

    fn latest_l1_message(&self) -> Result<Option<L1Message>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.messages.last_key_value().map(|(_, message)| message.clone()))
    }
}

impl SyncCheckpointReader for InMemoryL1MessageStore {
    fn synced_l1_height(&self) -> Result<Option<u64>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(inner.synced_l1_height)
    }
}

impl L1MessageWriter for InMemoryL1MessageStore {
    fn append_l1_messages(
        &self,
        messages: &[L1Message],
        synced_l1_height: u64,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        check_append(
            inner.messages.keys().next_back().copied(),
            inner.synced_l1_height,
            messages,
            synced_l1_height,
        )?;

        for message in messages {
            inner.messages.insert(message.queue_index(), message.clone());
        }
        if self.interrupt_next_append.swap(false, Ordering::SeqCst) {
            return Err(StorageError::DatabaseInit(eyre::eyre!("simulated crash")));
        }
        inner.synced_l1_height = Some(synced_l1_height);
        self.appends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_protocol::L1MessageTx;

    fn message(queue_index: u64, l1_height: u64) -> L1Message {
        L1Message {
            tx: L1MessageTx { queue_index, ..Default::default() },
            l1_height,
            ..Default::default()
        }
    }

    #[test]
    fn test_read_stops_at_gap_free_prefix() {
        let store = InMemoryL1MessageStore::new();
        store.append_l1_messages(&[message(1, 1), message(2, 1), message(3, 2)], 2).unwrap();

        assert_eq!(store.read_l1_messages(2, 10).unwrap().len(), 2);
        assert!(store.read_l1_messages(5, 4).unwrap().is_empty());
        assert_eq!(store.latest_l1_message().unwrap().map(|m| m.queue_index()), Some(3));
        assert_eq!(store.append_count(), 1);
    }

    #[test]
    fn test_interrupted_append_keeps_messages_without_checkpoint() {
        let store = InMemoryL1MessageStore::new();
        store.append_l1_messages(&[], 5).unwrap();

        store.interrupt_next_append();
        assert!(store.append_l1_messages(&[message(1, 6)], 6).is_err());

        assert_eq!(store.synced_l1_height().unwrap(), Some(5));
        assert_eq!(store.get_l1_message(1).unwrap(), Some(message(1, 6)));

        // The flag is one-shot.
        store.append_l1_messages(&[message(2, 7)], 7).unwrap();
        assert_eq!(store.synced_l1_height().unwrap(), Some(7));
    }

    #[test]
    fn test_rejects_gap() {
        let store = InMemoryL1MessageStore::new();
        assert_eq!(
            store.append_l1_messages(&[message(2, 1)], 1).unwrap_err(),
            StorageError::NonContiguousIndex { expected: 1, got: 2 }
        );
        assert!(store.all_messages().unwrap().is_empty());
    }
}
