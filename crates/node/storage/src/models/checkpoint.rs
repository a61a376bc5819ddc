use derive_more::TryFrom;
use reth_codecs::Compact;
use reth_db::DatabaseError;
use reth_db_api::table;
use serde::{Deserialize, Serialize};

/// Key of a sync progress marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TryFrom,
)]
#[try_from(repr)]
#[repr(u8)]
pub enum SyncCheckpointKey {
    /// The last L1 block whose deposits are fully stored.
    L1SyncedHeight = 0,
}

impl table::Encode for SyncCheckpointKey {
    type Encoded = [u8; 1];

    fn encode(self) -> Self::Encoded {
        [self as u8]
    }
}

impl table::Decode for SyncCheckpointKey {
    fn decode(value: &[u8]) -> Result<Self, DatabaseError> {
        if value.is_empty() {
            return Err(DatabaseError::Decode)
        }

        value[0].try_into().map_err(|_| DatabaseError::Decode)
    }
}

/// A sync progress marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Compact)]
pub struct SyncCheckpoint {
    /// The L1 height synced up to, inclusive.
    pub l1_height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reth_db_api::table::{Decode, Encode};

    #[test]
    fn test_sync_checkpoint_key_encode_decode() {
        let encoded = SyncCheckpointKey::L1SyncedHeight.encode();
        assert_eq!(encoded, [0]);
        assert_eq!(SyncCheckpointKey::decode(&encoded).unwrap(), SyncCheckpointKey::L1SyncedHeight);
    }

    #[test]
    fn test_sync_checkpoint_key_decode_invalid() {
        assert_eq!(SyncCheckpointKey::decode(&[]).unwrap_err(), DatabaseError::Decode);
        assert_eq!(SyncCheckpointKey::decode(&[9]).unwrap_err(), DatabaseError::Decode);
    }
}
