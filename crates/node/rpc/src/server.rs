//! Launching the RPC server.

use crate::{HealthzResponse, RpcBuilder};
use jsonrpsee::{
    RpcModule,
    core::RegisterMethodError,
    server::{Server, ServerHandle, middleware::http::ProxyGetRequestLayer},
};

/// An error launching the RPC server.
#[derive(Debug, thiserror::Error)]
pub enum RpcServerError {
    /// Failed to register a method, or two modules define the same method.
    #[error("Failed to register RPC method: {0}")]
    RegisterMethod(#[from] RegisterMethodError),
    /// Failed to build the GET proxy for the healthz endpoint.
    #[error("Failed to build the healthz proxy: {0}")]
    Proxy(String),
    /// Failed to bind the server.
    #[error(transparent)]
    LaunchFailed(#[from] std::io::Error),
}

/// Launches the jsonrpsee [`Server`] with the given module and a `healthz` method, also served
/// on `GET /healthz`.
///
/// Returns `Ok(None)` if the server is disabled.
pub async fn launch<Context: Send + Sync + 'static>(
    config: &RpcBuilder,
    module: RpcModule<Context>,
) -> Result<Option<ServerHandle>, RpcServerError> {
    if !config.enabled() {
        info!(target: "morph::rpc", "RPC server disabled");
        return Ok(None);
    }

    let mut modules = RpcModule::new(());
    modules.register_method("healthz", |_, _, _| {
        let response = HealthzResponse { version: std::env!("CARGO_PKG_VERSION").to_string() };
        jsonrpsee::core::RpcResult::Ok(response)
    })?;
    modules.merge(module)?;

    let middleware = tower::ServiceBuilder::new().layer(
        ProxyGetRequestLayer::new([("/healthz", "healthz")])
            .map_err(|err| RpcServerError::Proxy(err.to_string()))?,
    );
    let server = Server::builder().set_http_middleware(middleware).build(config.socket).await?;

    match server.local_addr() {
        Ok(addr) => info!(target: "morph::rpc", addr = ?addr, "RPC server bound to address"),
        Err(err) => error!(target: "morph::rpc", %err, "Failed to get local address for RPC server"),
    }

    Ok(Some(server.start(modules)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, SocketAddr};

    #[tokio::test]
    async fn test_disabled_server_is_not_started() {
        let config = RpcBuilder { disabled: true, ..Default::default() };
        assert!(launch(&config, RpcModule::new(())).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_launch_on_ephemeral_port() {
        let mut config = RpcBuilder::default();
        config.set_addr(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)));

        let handle = launch(&config, RpcModule::new(())).await.unwrap().unwrap();
        handle.stop().unwrap();
        handle.stopped().await;
    }

    #[tokio::test]
    async fn test_duplicate_method_is_rejected() {
        let mut module = RpcModule::new(());
        module.register_method("healthz", |_, _, _| jsonrpsee::core::RpcResult::Ok(())).unwrap();
        let config =
            RpcBuilder { socket: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)), ..Default::default() };
        assert!(matches!(launch(&config, module).await, Err(RpcServerError::RegisterMethod(_))));
    }
}
