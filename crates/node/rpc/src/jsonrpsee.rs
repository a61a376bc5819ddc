//! The Morph RPC API traits, generated with [`jsonrpsee`].

use alloy_primitives::Bytes;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use morph_protocol::BlockData;

/// The block lifecycle callbacks of the consensus driver.
#[cfg_attr(not(feature = "client"), rpc(server, namespace = "l2node"))]
#[cfg_attr(feature = "client", rpc(server, client, namespace = "l2node"))]
pub trait L2NodeApi {
    /// Builds a block proposal at `height`. Only available on a sequencer.
    #[method(name = "requestBlockData")]
    async fn request_block_data(&self, height: u64) -> RpcResult<BlockData>;

    /// Checks a proposed block.
    #[method(name = "checkBlockData")]
    async fn check_block_data(&self, block: BlockData) -> RpcResult<bool>;

    /// Imports an agreed block and returns the resulting height.
    #[method(name = "deliverBlock")]
    async fn deliver_block(
        &self,
        block: BlockData,
        validators: Vec<Bytes>,
        attestations: Vec<Bytes>,
    ) -> RpcResult<u64>;
}
