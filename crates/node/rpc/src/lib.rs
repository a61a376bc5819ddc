#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod config;
pub use config::RpcBuilder;

mod jsonrpsee;
#[cfg(feature = "client")]
pub use jsonrpsee::L2NodeApiClient;
pub use jsonrpsee::L2NodeApiServer;

mod l2node;
pub use l2node::{L2NodeRpc, executor_error_to_rpc};

mod server;
pub use server::{RpcServerError, launch};

mod metrics;
pub use metrics::Metrics;

/// A healthcheck response for the RPC server.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct HealthzResponse {
    /// The application version.
    pub version: String,
}
