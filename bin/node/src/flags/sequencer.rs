//! Node role and mock sequencer CLI Flags

use std::time::Duration;

/// The role of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, derive_more::Display)]
pub enum NodeMode {
    /// Checks and delivers blocks proposed by others.
    #[default]
    #[display("validator")]
    Validator,
    /// Proposes blocks from the local L1 message queue.
    #[display("sequencer")]
    Sequencer,
}

/// Configuration of the built-in block production driver.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct MockSequencerArgs {
    /// Produces blocks locally instead of waiting for a consensus driver. Sequencer mode only.
    #[arg(long = "mock-sequencer", default_value = "false", env = "MORPH_NODE_MOCK_SEQUENCER")]
    pub enabled: bool,
    /// Seconds between two locally produced blocks.
    #[arg(long = "mock.block-time", default_value = "1", env = "MORPH_NODE_MOCK_BLOCK_TIME")]
    pub block_time: u64,
}

impl Default for MockSequencerArgs {
    fn default() -> Self {
        Self { enabled: false, block_time: 1 }
    }
}

impl MockSequencerArgs {
    /// Returns the block time.
    pub const fn block_time(&self) -> Duration {
        Duration::from_secs(self.block_time)
    }
}
