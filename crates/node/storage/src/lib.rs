//! Persistent storage for the L1 message queue.
//!
//! This crate provides structured, append-only storage for the deposits the node derives from
//! L1, exposing APIs to append newly synced messages and to read ranges of the queue.
//!
//! The storage system is built on top of [`reth-db`], using MDBX, and defines schemas for:
//! - L1 messages keyed by their queue index
//! - The L1 height the queue has been synced up to
//!
//! ## Guarantees
//!
//! - Queue indices are contiguous and strictly increasing.
//! - Messages and the sync checkpoint that covers them are committed in one write transaction.
//! - Reads run in their own read transactions and may proceed concurrently with the writer.

pub mod models;

mod error;
pub use error::StorageError;

mod providers;

mod messagedb;
pub use messagedb::MessageDb;

mod metrics;
pub use metrics::Metrics;

mod traits;
pub use traits::{L1MessageReader, L1MessageStorage, L1MessageWriter, SyncCheckpointReader};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
