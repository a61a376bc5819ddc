//! L1 sync CLI Flags

use alloy_primitives::Address;
use morph_sync::{
    Confirmations, DEFAULT_FETCH_BLOCK_RANGE, DEFAULT_LOG_PROGRESS_INTERVAL,
    DEFAULT_POLL_INTERVAL, SyncConfig,
};
use std::time::Duration;

/// Configuration of the L1 message syncer.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct SyncArgs {
    /// The first L1 block scanned for deposits.
    #[arg(long = "sync.start-height", default_value = "0", env = "MORPH_NODE_SYNC_START_HEIGHT")]
    pub start_height: u64,
    /// How far behind the L1 head to sync: `finalized` or a number of blocks.
    #[arg(
        long = "sync.confirmations",
        default_value = "finalized",
        env = "MORPH_NODE_SYNC_CONFIRMATIONS"
    )]
    pub confirmations: Confirmations,
    /// The number of L1 blocks queried per log request.
    #[arg(
        long = "sync.fetch-block-range",
        default_value_t = DEFAULT_FETCH_BLOCK_RANGE,
        env = "MORPH_NODE_SYNC_FETCH_BLOCK_RANGE"
    )]
    pub fetch_block_range: u64,
    /// Seconds between two sync cycles.
    #[arg(
        long = "sync.poll-interval",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        env = "MORPH_NODE_SYNC_POLL_INTERVAL"
    )]
    pub poll_interval: u64,
    /// Seconds between two progress log lines.
    #[arg(
        long = "sync.log-progress-interval",
        default_value_t = DEFAULT_LOG_PROGRESS_INTERVAL.as_secs(),
        env = "MORPH_NODE_SYNC_LOG_PROGRESS_INTERVAL"
    )]
    pub log_progress_interval: u64,
}

impl Default for SyncArgs {
    fn default() -> Self {
        Self {
            start_height: 0,
            confirmations: Confirmations::Finalized,
            fetch_block_range: DEFAULT_FETCH_BLOCK_RANGE,
            poll_interval: DEFAULT_POLL_INTERVAL.as_secs(),
            log_progress_interval: DEFAULT_LOG_PROGRESS_INTERVAL.as_secs(),
        }
    }
}

impl SyncArgs {
    /// Returns the [`SyncConfig`] for the given deposit contract.
    pub fn config(&self, deposit_contract: Address) -> SyncConfig {
        SyncConfig::new(deposit_contract)
            .with_start_height(self.start_height)
            .with_confirmations(self.confirmations)
            .with_fetch_block_range(self.fetch_block_range)
            .with_poll_interval(Duration::from_secs(self.poll_interval))
            .with_log_progress_interval(Duration::from_secs(self.log_progress_interval))
    }
}
