//! Configuration of the [`crate::Syncer`].

use alloy_primitives::Address;
use std::{str::FromStr, time::Duration};

/// The default number of L1 blocks queried per `eth_getLogs` request.
pub const DEFAULT_FETCH_BLOCK_RANGE: u64 = 100;

/// The default interval between two sync cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// The default interval between two progress log lines.
pub const DEFAULT_LOG_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// How far behind the L1 head the syncer stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Confirmations {
    /// Sync up to the latest finalized L1 block.
    #[default]
    #[display("finalized")]
    Finalized,
    /// Sync up to the given number of blocks behind the latest L1 block.
    #[display("{_0}")]
    Depth(u64),
}

impl FromStr for Confirmations {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("finalized") {
            return Ok(Self::Finalized);
        }
        s.parse::<u64>()
            .map(Self::Depth)
            .map_err(|_| ConfigError::InvalidConfirmations(s.to_string()))
    }
}

/// An error in the syncer configuration.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The deposit contract address is zero.
    #[error("deposit contract address must not be zero")]
    ZeroDepositContract,
    /// The fetch block range is zero.
    #[error("fetch block range must not be zero")]
    ZeroFetchBlockRange,
    /// The poll interval is zero.
    #[error("poll interval must not be zero")]
    ZeroPollInterval,
    /// The progress log interval is zero.
    #[error("log progress interval must not be zero")]
    ZeroLogProgressInterval,
    /// The confirmations value is neither `finalized` nor a block count.
    #[error("invalid confirmations `{0}`, expected `finalized` or a block count")]
    InvalidConfirmations(String),
}

/// Configuration of the [`crate::Syncer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// The address of the L1 contract emitting deposit events.
    pub deposit_contract: Address,
    /// The first L1 block to scan when no checkpoint exists.
    pub start_height: u64,
    /// How far behind the L1 head to stay.
    pub confirmations: Confirmations,
    /// The maximum number of L1 blocks per log query.
    pub fetch_block_range: u64,
    /// The interval between two sync cycles.
    pub poll_interval: Duration,
    /// The interval between two progress log lines.
    pub log_progress_interval: Duration,
}

impl SyncConfig {
    /// Creates a configuration with default tunables for the given deposit contract.
    pub fn new(deposit_contract: Address) -> Self {
        Self {
            deposit_contract,
            start_height: 0,
            confirmations: Confirmations::default(),
            fetch_block_range: DEFAULT_FETCH_BLOCK_RANGE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_progress_interval: DEFAULT_LOG_PROGRESS_INTERVAL,
        }
    }

    /// Sets the first L1 block to scan.
    pub const fn with_start_height(mut self, start_height: u64) -> Self {
        self.start_height = start_height;
        self
    }

    /// Sets the confirmation policy.
    pub const fn with_confirmations(mut self, confirmations: Confirmations) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Sets the log query window.
    pub const fn with_fetch_block_range(mut self, fetch_block_range: u64) -> Self {
        self.fetch_block_range = fetch_block_range;
        self
    }

    /// Sets the poll interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the progress log interval.
    pub const fn with_log_progress_interval(mut self, log_progress_interval: Duration) -> Self {
        self.log_progress_interval = log_progress_interval;
        self
    }

    /// Checks that every tunable is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deposit_contract.is_zero() {
            return Err(ConfigError::ZeroDepositContract);
        }
        if self.fetch_block_range == 0 {
            return Err(ConfigError::ZeroFetchBlockRange);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.log_progress_interval.is_zero() {
            return Err(ConfigError::ZeroLogProgressInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::finalized("finalized", Confirmations::Finalized)]
    #[case::finalized_uppercase("FINALIZED", Confirmations::Finalized)]
    #[case::depth("12", Confirmations::Depth(12))]
    #[case::zero_depth("0", Confirmations::Depth(0))]
    fn test_parse_confirmations(#[case] input: &str, #[case] expected: Confirmations) {
        assert_eq!(input.parse::<Confirmations>().unwrap(), expected);
    }

    #[test]
    fn test_parse_confirmations_invalid() {
        assert_eq!(
            "safe".parse::<Confirmations>().unwrap_err(),
            ConfigError::InvalidConfirmations("safe".to_string())
        );
    }

    #[test]
    fn test_confirmations_display_round_trips() {
        for confirmations in [Confirmations::Finalized, Confirmations::Depth(6)] {
            assert_eq!(confirmations.to_string().parse::<Confirmations>().unwrap(), confirmations);
        }
    }

    #[test]
    fn test_defaults() {
        let config = SyncConfig::new(Address::repeat_byte(1));
        assert_eq!(config.confirmations, Confirmations::Finalized);
        assert_eq!(config.fetch_block_range, 100);
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.log_progress_interval, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case::zero_contract(SyncConfig::new(Address::ZERO), ConfigError::ZeroDepositContract)]
    #[case::zero_range(
        SyncConfig::new(Address::repeat_byte(1)).with_fetch_block_range(0),
        ConfigError::ZeroFetchBlockRange
    )]
    #[case::zero_poll(
        SyncConfig::new(Address::repeat_byte(1)).with_poll_interval(Duration::ZERO),
        ConfigError::ZeroPollInterval
    )]
    #[case::zero_progress(
        SyncConfig::new(Address::repeat_byte(1)).with_log_progress_interval(Duration::ZERO),
        ConfigError::ZeroLogProgressInterval
    )]
    fn test_validate_rejects(#[case] config: SyncConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate().unwrap_err(), expected);
    }
}
