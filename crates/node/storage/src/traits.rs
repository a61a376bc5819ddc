use crate::StorageError;
use morph_protocol::{FIRST_QUEUE_INDEX, L1Message};
use std::fmt::Debug;

/// Provides read access to the L1 message queue.
///
/// Implementations must be safe to call concurrently with the single writer.
pub trait L1MessageReader: Debug + Send + Sync {
    /// Returns the messages with queue indices in `from..=to`, in queue order.
    ///
    /// The result is the contiguous prefix of the range that is currently stored. It is shorter
    /// than the range when sync has not caught up, and empty when `from > to`.
    fn read_l1_messages(&self, from: u64, to: u64) -> Result<Vec<L1Message>, StorageError>;

    /// Returns the message with the given queue index, if stored.
    fn get_l1_message(&self, queue_index: u64) -> Result<Option<L1Message>, StorageError>;

    /// Returns the message with the highest queue index, if any.
    fn latest_l1_message(&self) -> Result<Option<L1Message>, StorageError>;
}

/// Provides access to the sync progress of the queue.
pub trait SyncCheckpointReader: Debug + Send + Sync {
    /// Returns the last L1 height whose deposits are fully stored, if sync has started.
    fn synced_l1_height(&self) -> Result<Option<u64>, StorageError>;
}

/// Provides write access to the L1 message queue.
pub trait L1MessageWriter: Debug + Send + Sync {
    /// Appends `messages` to the queue and records `synced_l1_height` as the sync checkpoint.
    ///
    /// The messages must continue the queue without gaps, and none may originate above
    /// `synced_l1_height`. Messages and checkpoint are committed together or not at all.
    fn append_l1_messages(
        &self,
        messages: &[L1Message],
        synced_l1_height: u64,
    ) -> Result<(), StorageError>;
}

/// Combines all L1 message storage capabilities.
pub trait L1MessageStorage: L1MessageReader + SyncCheckpointReader + L1MessageWriter {}

impl<T: L1MessageReader + SyncCheckpointReader + L1MessageWriter> L1MessageStorage for T {}

/// Validates an append against the current head of the queue and the stored checkpoint.
pub(crate) fn check_append(
    latest_index: Option<u64>,
    checkpoint: Option<u64>,
    messages: &[L1Message],
    synced_l1_height: u64,
) -> Result<(), StorageError> {
    if let Some(current) = checkpoint {
        if synced_l1_height < current {
            return Err(StorageError::CheckpointRegression {
                current,
                incoming: synced_l1_height,
            });
        }
    }

    let mut expected = latest_index.map_or(FIRST_QUEUE_INDEX, |index| index + 1);
    for message in messages {
        if message.queue_index() != expected {
            return Err(StorageError::NonContiguousIndex { expected, got: message.queue_index() });
        }
        if message.l1_height > synced_l1_height {
            return Err(StorageError::MessageBeyondCheckpoint {
                l1_height: message.l1_height,
                checkpoint: synced_l1_height,
            });
        }
        expected += 1;
    }
    Ok(())
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
    fn test_check_append_first_index() {
        assert!(check_append(None, None, &[message(1, 5), message(2, 5)], 5).is_ok());
        assert_eq!(
            check_append(None, None, &[message(0, 5)], 5).unwrap_err(),
            StorageError::NonContiguousIndex { expected: 1, got: 0 }
        );
    }

    #[test]
    fn test_check_append_gap() {
        assert_eq!(
            check_append(Some(3), Some(10), &[message(4, 11), message(6, 11)], 11).unwrap_err(),
            StorageError::NonContiguousIndex { expected: 5, got: 6 }
        );
    }

    #[test]
    fn test_check_append_checkpoint_regression() {
        assert_eq!(
            check_append(Some(3), Some(10), &[], 9).unwrap_err(),
            StorageError::CheckpointRegression { current: 10, incoming: 9 }
        );
        assert!(check_append(Some(3), Some(10), &[], 10).is_ok());
    }

    #[test]
    fn test_check_append_message_beyond_checkpoint() {
        assert_eq!(
            check_append(None, None, &[message(1, 12)], 11).unwrap_err(),
            StorageError::MessageBeyondCheckpoint { l1_height: 12, checkpoint: 11 }
        );
    }
}
