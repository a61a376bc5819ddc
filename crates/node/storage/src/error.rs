use reth_db::DatabaseError;
use thiserror::Error;

/// Errors that may occur while interacting with the L1 message storage.
///
/// This enum is used across all implementations of the storage traits.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Represents a database error that occurred while interacting with storage.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Represents an error that occurred while initializing the database.
    #[error(transparent)]
    DatabaseInit(#[from] eyre::Report),

    /// A lock guarding in-memory storage was poisoned.
    #[error("lock poisoned")]
    LockPoisoned,

    /// An appended message does not carry the next queue index.
    #[error("non contiguous queue index: expected {expected}, got {got}")]
    NonContiguousIndex {
        /// The queue index the storage expects next.
        expected: u64,
        /// The queue index of the incoming message.
        got: u64,
    },

    /// An append would move the sync checkpoint backwards.
    #[error("sync checkpoint regression: current {current}, incoming {incoming}")]
    CheckpointRegression {
        /// The stored checkpoint.
        current: u64,
        /// The checkpoint of the incoming append.
        incoming: u64,
    },

    /// An appended message was observed above the L1 height it is checkpointed with.
    #[error("message at l1 height {l1_height} is beyond the sync checkpoint {checkpoint}")]
    MessageBeyondCheckpoint {
        /// The L1 height of the message.
        l1_height: u64,
        /// The checkpoint of the append.
        checkpoint: u64,
    },
}

impl PartialEq for StorageError {
    fn eq(&self, other: &Self) -> bool {
        use StorageError::*;
        match (self, other) {
            (Database(a), Database(b)) => a == b,
            (DatabaseInit(a), DatabaseInit(b)) => format!("{a}") == format!("{b}"),
            (LockPoisoned, LockPoisoned) => true,
            (
                NonContiguousIndex { expected: a, got: b },
                NonContiguousIndex { expected: c, got: d },
            ) => a == c && b == d,
            (
                CheckpointRegression { current: a, incoming: b },
                CheckpointRegression { current: c, incoming: d },
            ) => a == c && b == d,
            (
                MessageBeyondCheckpoint { l1_height: a, checkpoint: b },
                MessageBeyondCheckpoint { l1_height: c, checkpoint: d },
            ) => a == c && b == d,
            _ => false,
        }
    }
}

impl Eq for StorageError {}
