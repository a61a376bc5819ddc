use crate::ConfigError;
use alloy_transport::TransportError;
use morph_storage::StorageError;

/// An error produced by the [`crate::Syncer`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// An L1 RPC request failed. The cycle is retried on the next tick.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The L1 message queue could not be read or written. This stops the syncer.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The syncer configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Returns `true` if the next sync cycle may succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
