//! Access to the L1 chain.

use alloy_eips::BlockId;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_transport::TransportError;
use async_trait::async_trait;
use std::fmt::Debug;

/// The L1 queries the [`crate::Syncer`] depends on.
#[async_trait]
pub trait L1Source: Debug + Send + Sync {
    /// Returns the number of the latest L1 block.
    async fn latest_block_number(&self) -> Result<u64, TransportError>;

    /// Returns the number of the latest finalized L1 block, if the chain has one.
    async fn finalized_block_number(&self) -> Result<Option<u64>, TransportError>;

    /// Returns the logs matching the filter.
    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, TransportError>;
}

#[async_trait]
impl L1Source for RootProvider {
    async fn latest_block_number(&self) -> Result<u64, TransportError> {
        self.get_block_number().await
    }

    async fn finalized_block_number(&self) -> Result<Option<u64>, TransportError> {
        let block = self.get_block(BlockId::finalized()).await?;
        Ok(block.map(|block| block.header.number))
    }

    async fn logs(&self, filter: &Filter) -> Result<Vec<Log>, TransportError> {
        self.get_logs(filter).await
    }
}
