//! A Morph L2 Engine API Client.

use crate::{ExecutionEngine, Metrics};
use alloy_primitives::Bytes;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_engine::JwtSecret;
use alloy_transport::{RpcError, TransportErrorKind, TransportResult};
use alloy_transport_http::{
    AuthLayer, AuthService, Http, HyperClient,
    hyper_util::{
        client::legacy::{Client, connect::HttpConnector},
        rt::TokioExecutor,
    },
};
use async_trait::async_trait;
use http_body_util::Full;
use morph_protocol::{AssembleL2BlockParams, ExecutableL2Data, GenericResponse};
use std::time::Instant;
use thiserror::Error;
use tower::ServiceBuilder;
use url::Url;

/// An error that occurred in the [`EngineClient`].
#[derive(Error, Debug)]
pub enum EngineClientError {
    /// An RPC error occurred
    #[error("An RPC error occurred: {0}")]
    RpcError(#[from] RpcError<TransportErrorKind>),
}

/// A Hyper HTTP client with a JWT authentication layer.
pub type HyperAuthClient<B = Full<Bytes>> = HyperClient<B, AuthService<Client<HttpConnector, B>>>;

/// A client for the Morph L2 execution engine.
///
/// Block assembly, validation and import go through the JWT authenticated engine endpoint. The
/// current block height is read from the public L2 RPC.
///
/// # Examples
///
/// ```rust,no_run
/// use alloy_rpc_types_engine::JwtSecret;
/// use morph_engine::EngineClient;
/// use url::Url;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine_url = Url::parse("http://localhost:8551")?;
/// let l2_url = Url::parse("http://localhost:8545")?;
/// let jwt = JwtSecret::random();
///
/// let client = EngineClient::new_http(engine_url, l2_url, jwt);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EngineClient {
    /// The authenticated engine RPC client.
    engine: RpcClient,
    /// The public L2 provider.
    l2_provider: RootProvider,
}

impl EngineClient {
    /// Creates a new RPC client for the given address and JWT secret.
    fn rpc_client(addr: Url, jwt: JwtSecret) -> RpcClient {
        let hyper_client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
        let auth_layer = AuthLayer::new(jwt);
        let service = ServiceBuilder::new().layer(auth_layer).service(hyper_client);
        let layer_transport = HyperClient::with_service(service);

        let http_hyper = Http::with_client(layer_transport, addr);
        RpcClient::new(http_hyper, false)
    }

    /// Creates a new [`EngineClient`] with an authenticated HTTP connection to `engine` and an
    /// unauthenticated one to `l2_rpc`.
    pub fn new_http(engine: Url, l2_rpc: Url, jwt: JwtSecret) -> Self {
        let engine = Self::rpc_client(engine, jwt);
        let l2_provider = RootProvider::new_http(l2_rpc);

        Self { engine, l2_provider }
    }

    /// Returns a reference to the authenticated engine [`RpcClient`].
    pub const fn engine(&self) -> &RpcClient {
        &self.engine
    }

    /// Returns a reference to the public L2 [`RootProvider`].
    pub const fn l2_provider(&self) -> &RootProvider {
        &self.l2_provider
    }
}

#[async_trait]
impl ExecutionEngine for EngineClient {
    async fn assemble_l2_block(
        &self,
        number: u64,
        transactions: Vec<Bytes>,
    ) -> Result<ExecutableL2Data, EngineClientError> {
        let params = AssembleL2BlockParams { number, transactions };
        let call = self.engine.request::<_, ExecutableL2Data>("engine_assembleL2Block", (params,));

        Ok(record_call_time(call, Metrics::ASSEMBLE_L2_BLOCK_METHOD).await?)
    }

    async fn validate_l2_block(
        &self,
        block: &ExecutableL2Data,
    ) -> Result<bool, EngineClientError> {
        let call = self
            .engine
            .request::<_, GenericResponse>("engine_validateL2Block", (block.clone(),));

        let response = record_call_time(call, Metrics::VALIDATE_L2_BLOCK_METHOD).await?;
        Ok(response.success)
    }

    async fn new_l2_block(&self, block: &ExecutableL2Data) -> Result<(), EngineClientError> {
        let call = self.engine.request::<_, ()>("engine_newL2Block", (block.clone(),));

        Ok(record_call_time(call, Metrics::NEW_L2_BLOCK_METHOD).await?)
    }

    async fn block_number(&self) -> Result<u64, EngineClientError> {
        let call = self.l2_provider.get_block_number();

        Ok(record_call_time(call, Metrics::BLOCK_NUMBER_METHOD).await?)
    }
}

/// Wrapper to record the time taken for a call to the engine API and log the result as a metric.
async fn record_call_time<T>(
    f: impl IntoFuture<Output = TransportResult<T>>,
    metric_label: &'static str,
) -> TransportResult<T> {
    // Await on the future and track its duration.
    let start = Instant::now();
    let result = f.await;
    let duration = start.elapsed();

    if let Err(err) = &result {
        debug!(target: "morph::engine", method = metric_label, %err, "Engine request failed");
        #[cfg(feature = "metrics")]
        metrics::counter!(Metrics::ENGINE_METHOD_REQUEST_ERRORS, "method" => metric_label)
            .increment(1);
    }

    // Record the call duration.
    #[cfg(feature = "metrics")]
    metrics::histogram!(Metrics::ENGINE_METHOD_REQUEST_DURATION, "method" => metric_label)
        .record(duration.as_secs_f64());
    #[cfg(not(feature = "metrics"))]
    let _ = duration;

    result
}
