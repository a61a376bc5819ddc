//! Configuration of the block executors.

/// The default maximum number of L1 messages included in one block.
pub const DEFAULT_MAX_L1_MESSAGES_PER_BLOCK: u64 = 100;

/// An error in the executor configuration.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The per-block L1 message limit is zero.
    #[error("max L1 messages per block must not be zero")]
    ZeroMaxL1MessagesPerBlock,
}

/// Configuration shared by both executor roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// The maximum number of L1 messages included in one block.
    pub max_l1_messages_per_block: u64,
    /// The queue index of the last L1 message already included on L2, zero if none.
    pub latest_processed_l1_index: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_l1_messages_per_block: DEFAULT_MAX_L1_MESSAGES_PER_BLOCK,
            latest_processed_l1_index: 0,
        }
    }
}

impl ExecutorConfig {
    /// Sets the per-block L1 message limit.
    pub const fn with_max_l1_messages_per_block(mut self, max: u64) -> Self {
        self.max_l1_messages_per_block = max;
        self
    }

    /// Sets the starting L1 message cursor.
    pub const fn with_latest_processed_l1_index(mut self, index: u64) -> Self {
        self.latest_processed_l1_index = index;
        self
    }

    /// Checks that every tunable is usable.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_l1_messages_per_block == 0 {
            return Err(ConfigError::ZeroMaxL1MessagesPerBlock);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_l1_messages_per_block, 100);
        assert_eq!(config.latest_processed_l1_index, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = ExecutorConfig::default().with_max_l1_messages_per_block(0);
        assert_eq!(config.validate().unwrap_err(), ConfigError::ZeroMaxL1MessagesPerBlock);
    }
}
