use crate::{ConfigError, InclusionError};
use morph_engine::EngineClientError;
use morph_protocol::WireError;
use morph_storage::StorageError;

/// An error produced by a block executor.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// The operation is not available in the executor's role.
    #[error("operation not permitted for this role")]
    NotPermitted,
    /// The execution engine call failed.
    #[error(transparent)]
    Engine(#[from] EngineClientError),
    /// The L1 message queue could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The block header or payload bytes are malformed.
    #[error("malformed block data: {0}")]
    Decode(#[from] WireError),
    /// The proposed block could not be encoded.
    #[error("failed to encode block data: {0}")]
    Encode(#[source] WireError),
    /// The delivered block does not extend the current head.
    #[error("wrong block number: expected {expected}, got {got}")]
    WrongBlockNumber {
        /// The next block number.
        expected: u64,
        /// The number of the delivered block.
        got: u64,
    },
    /// The delivered block's L1 messages do not continue the processed queue.
    #[error("invalid L1 messages: {0}")]
    InvalidL1Messages(#[from] InclusionError),
    /// The executor configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
