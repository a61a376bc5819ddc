//! Mock implementations for testing against the execution engine.

use crate::{EngineClientError, ExecutionEngine};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use morph_protocol::ExecutableL2Data;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mutable state behind a [`MockExecutionEngine`].
#[derive(Debug, Clone)]
pub struct MockEngineState {
    /// The current head height.
    pub height: u64,
    /// Transactions the engine appends to every assembled block.
    pub pool_transactions: Vec<Bytes>,
    /// The result of every validation.
    pub valid: bool,
    /// Fails every call with a transport error.
    pub unavailable: bool,
    /// The blocks imported so far.
    pub imported: Vec<ExecutableL2Data>,
    /// The transaction lists offered to `assemble_l2_block`.
    pub assemble_requests: Vec<Vec<Bytes>>,
    /// The number of validations performed.
    pub validations: usize,
}

impl Default for MockEngineState {
    fn default() -> Self {
        Self {
            height: 0,
            pool_transactions: Vec::new(),
            valid: true,
            unavailable: false,
            imported: Vec::new(),
            assemble_requests: Vec::new(),
            validations: 0,
        }
    }
}

/// An in-memory [`ExecutionEngine`].
///
/// Assembled blocks contain the offered transactions followed by the pool transactions. Imports
/// must extend the current height by one.
#[derive(Debug, Clone)]
pub struct MockExecutionEngine {
    state: Arc<RwLock<MockEngineState>>,
}

impl Default for MockExecutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutionEngine {
    /// Creates a mock at height zero that accepts every block.
    pub fn new() -> Self {
        Self::from_state(MockEngineState::default())
    }

    /// Creates a mock starting from the given state.
    pub fn from_state(state: MockEngineState) -> Self {
        Self { state: Arc::new(RwLock::new(state)) }
    }

    /// Creates a mock at the given height.
    pub fn at_height(height: u64) -> Self {
        Self::from_state(MockEngineState { height, ..Default::default() })
    }

    /// Sets the result of every validation.
    pub async fn set_valid(&self, valid: bool) {
        self.state.write().await.valid = valid;
    }

    /// Makes every call fail, or succeed again.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Returns a snapshot of the mock state.
    pub async fn state(&self) -> MockEngineState {
        self.state.read().await.clone()
    }

    fn unavailable() -> EngineClientError {
        TransportErrorKind::custom_str("mock engine unavailable").into()
    }
}

#[async_trait]
impl ExecutionEngine for MockExecutionEngine {
    async fn assemble_l2_block(
        &self,
        number: u64,
        transactions: Vec<Bytes>,
    ) -> Result<ExecutableL2Data, EngineClientError> {
        let mut state = self.state.write().await;
        if state.unavailable {
            return Err(Self::unavailable());
        }
        state.assemble_requests.push(transactions.clone());

        let mut block_transactions = transactions;
        block_transactions.extend(state.pool_transactions.iter().cloned());

        Ok(ExecutableL2Data {
            parent_hash: B256::with_last_byte(state.height as u8),
            miner: Address::repeat_byte(0x4d),
            number,
            gas_limit: 30_000_000,
            base_fee_per_gas: Some(U256::from(1_000_000)),
            timestamp: 1_700_000_000 + number,
            transactions: block_transactions,
            state_root: B256::repeat_byte(0x01),
            gas_used: 21_000,
            receipts_root: B256::repeat_byte(0x02),
            logs_bloom: Bytes::from(vec![0u8; 256]),
            extra_data: Bytes::new(),
        })
    }

    async fn validate_l2_block(
        &self,
        _block: &ExecutableL2Data,
    ) -> Result<bool, EngineClientError> {
        let mut state = self.state.write().await;
        if state.unavailable {
            return Err(Self::unavailable());
        }
        state.validations += 1;
        Ok(state.valid)
    }

    async fn new_l2_block(&self, block: &ExecutableL2Data) -> Result<(), EngineClientError> {
        let mut state = self.state.write().await;
        if state.unavailable {
            return Err(Self::unavailable());
        }
        if block.number != state.height + 1 {
            return Err(TransportErrorKind::custom_str("block does not extend the head").into());
        }
        state.height = block.number;
        state.imported.push(block.clone());
        Ok(())
    }

    async fn block_number(&self) -> Result<u64, EngineClientError> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(Self::unavailable());
        }
        Ok(state.height)
    }
}
