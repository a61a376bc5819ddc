//! Database table schemas used by the L1 message queue.
//!
//! The tables are registered using [`reth_db_api::table::TableInfo`] and grouped into a
//! [`reth_db_api::TableSet`] for database initialization via Reth's storage-api.

use reth_db_api::{
    TableSet, TableType, TableViewer,
    table::{DupSort, TableInfo},
    tables,
};
use std::fmt;

mod message;
pub use message::StoredL1Message;

mod checkpoint;
pub use checkpoint::{SyncCheckpoint, SyncCheckpointKey};

/// Implements [`reth_db_api::table::Compress`] and [`reth_db_api::table::Decompress`] traits for
/// types that implement [`reth_codecs::Compact`].
macro_rules! impl_compression_for_compact {
    ($($name:ident),+) => {
        $(
            impl reth_db_api::table::Compress for $name {
                type Compressed = Vec<u8>;

                fn compress_to_buf<B: bytes::BufMut + AsMut<[u8]>>(&self, buf: &mut B) {
                    let _ = reth_codecs::Compact::to_compact(self, buf);
                }
            }

            impl reth_db_api::table::Decompress for $name {
                fn decompress(value: &[u8]) -> Result<$name, reth_db_api::DatabaseError> {
                    let (obj, _) = reth_codecs::Compact::from_compact(value, value.len());
                    Ok(obj)
                }
            }
        )+
    };
}

impl_compression_for_compact!(StoredL1Message, SyncCheckpoint);

tables! {
    /// The L1 message queue.
    /// - Key: `u64`: queue index
    /// - Value: [`StoredL1Message`]: the message and its L1 origin
    table L1Messages {
        type Key = u64;
        type Value = StoredL1Message;
    }

    /// Sync progress of the queue.
    /// - Key: [`SyncCheckpointKey`]
    /// - Value: [`SyncCheckpoint`]: the last fully synced L1 height
    table SyncCheckpoints {
        type Key = SyncCheckpointKey;
        type Value = SyncCheckpoint;
    }
}
