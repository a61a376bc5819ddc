//! The `l2node` RPC module.

use crate::{L2NodeApiServer, Metrics};
use alloy_primitives::Bytes;
use async_trait::async_trait;
use jsonrpsee::{
    core::RpcResult,
    types::{ErrorCode, ErrorObject, ErrorObjectOwned},
};
use morph_executor::{ExecutorError, L2Node};
use morph_protocol::BlockData;
use std::sync::Arc;

/// Maps an [`ExecutorError`] to a JSON-RPC error.
///
/// Role violations map to "method not found", malformed or misnumbered blocks to "invalid params"
/// and failing dependencies to "internal error".
pub fn executor_error_to_rpc(err: ExecutorError) -> ErrorObjectOwned {
    let code = match &err {
        ExecutorError::NotPermitted => ErrorCode::MethodNotFound,
        ExecutorError::Decode(_) |
        ExecutorError::WrongBlockNumber { .. } |
        ExecutorError::InvalidL1Messages(_) => ErrorCode::InvalidParams,
        ExecutorError::Engine(_) |
        ExecutorError::Storage(_) |
        ExecutorError::Encode(_) |
        ExecutorError::Config(_) => ErrorCode::InternalError,
    };
    ErrorObject::owned(code.code(), err.to_string(), None::<()>)
}

/// Serves the [`L2Node`] callbacks over JSON-RPC.
#[derive(Debug)]
pub struct L2NodeRpc<N> {
    node: Arc<N>,
}

impl<N> L2NodeRpc<N> {
    /// Creates the module for the given node.
    pub const fn new(node: Arc<N>) -> Self {
        Self { node }
    }
}

fn observe<T>(method: &'static str, result: Result<T, ExecutorError>) -> RpcResult<T> {
    metrics::counter!(Metrics::RPC_CALLS, "method" => method).increment(1);
    result.map_err(|err| {
        metrics::counter!(Metrics::RPC_ERRORS, "method" => method).increment(1);
        debug!(target: "morph::rpc", method, %err, "RPC call failed");
        executor_error_to_rpc(err)
    })
}

#[async_trait]
impl<N: L2Node + 'static> L2NodeApiServer for L2NodeRpc<N> {
    async fn request_block_data(&self, height: u64) -> RpcResult<BlockData> {
        observe("requestBlockData", self.node.request_block_data(height).await)
    }

    async fn check_block_data(&self, block: BlockData) -> RpcResult<bool> {
        observe("checkBlockData", self.node.check_block_data(&block).await)
    }

    async fn deliver_block(
        &self,
        block: BlockData,
        validators: Vec<Bytes>,
        attestations: Vec<Bytes>,
    ) -> RpcResult<u64> {
        observe("deliverBlock", self.node.deliver_block(&block, &validators, &attestations).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_engine::test_utils::MockExecutionEngine;
    use morph_executor::{
        Executor, ExecutorConfig, InclusionError, SequencerExecutor, ValidatorExecutor,
    };
    use morph_protocol::{L1Message, L1MessageTx, WireError};
    use morph_storage::{L1MessageWriter, test_utils::InMemoryL1MessageStore};
    use serde_json::json;

    type TestNode = Executor<MockExecutionEngine, InMemoryL1MessageStore>;

    fn sequencer() -> (MockExecutionEngine, L2NodeRpc<TestNode>) {
        let store = InMemoryL1MessageStore::new();
        let message = L1Message {
            tx: L1MessageTx { queue_index: 1, gas_limit: 21_000, ..Default::default() },
            l1_height: 1,
            ..Default::default()
        };
        store.append_l1_messages(&[message], 1).unwrap();

        let engine = MockExecutionEngine::new();
        let node = SequencerExecutor::new(engine.clone(), Arc::new(store), ExecutorConfig::default())
            .unwrap();
        (engine, L2NodeRpc::new(Arc::new(node.into())))
    }

    fn validator() -> L2NodeRpc<TestNode> {
        let node = ValidatorExecutor::new(MockExecutionEngine::new(), ExecutorConfig::default())
            .unwrap();
        L2NodeRpc::new(Arc::new(node.into()))
    }

    #[tokio::test]
    async fn test_block_lifecycle_over_rpc_module() {
        let (engine, rpc) = sequencer();
        let module = rpc.into_rpc();

        let block: BlockData = module.call("l2node_requestBlockData", [1u64]).await.unwrap();
        assert_eq!(block.txs.len(), 1);

        let valid: bool = module.call("l2node_checkBlockData", [&block]).await.unwrap();
        assert!(valid);

        let height: u64 = module
            .call("l2node_deliverBlock", [json!(block), json!([]), json!([])])
            .await
            .unwrap();
        assert_eq!(height, 1);
        assert_eq!(engine.state().await.height, 1);
    }

    #[tokio::test]
    async fn test_validator_request_is_method_not_found() {
        let err = validator().request_block_data(1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::MethodNotFound.code());
    }

    #[tokio::test]
    async fn test_wrong_height_is_invalid_params() {
        let (_, rpc) = sequencer();
        let block = rpc.request_block_data(5).await.unwrap();

        let err = rpc.deliver_block(block, Vec::new(), Vec::new()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidParams.code());
        assert!(err.message().contains("expected 1, got 5"));
    }

    #[tokio::test]
    async fn test_empty_check_is_false() {
        assert!(!validator().check_block_data(BlockData::default()).await.unwrap());
    }

    #[test]
    fn test_error_mapping() {
        let err = executor_error_to_rpc(ExecutorError::WrongBlockNumber { expected: 2, got: 3 });
        assert_eq!(err.code(), ErrorCode::InvalidParams.code());

        let err = executor_error_to_rpc(ExecutorError::InvalidL1Messages(
            InclusionError::NonContiguous { expected: 1, got: 2 },
        ));
        assert_eq!(err.code(), ErrorCode::InvalidParams.code());

        let err = executor_error_to_rpc(ExecutorError::Encode(WireError::LengthOverflow(0)));
        assert_eq!(err.code(), ErrorCode::InternalError.code());

        let err = executor_error_to_rpc(ExecutorError::NotPermitted);
        assert_eq!(err.message(), "operation not permitted for this role");
    }
}
