//! Contains the RPC Configuration.

use std::net::{Ipv4Addr, SocketAddr};

/// The RPC configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcBuilder {
    /// Disables the RPC server.
    pub disabled: bool,
    /// The RPC socket address.
    pub socket: SocketAddr,
}

impl Default for RpcBuilder {
    fn default() -> Self {
        Self { disabled: false, socket: SocketAddr::from((Ipv4Addr::LOCALHOST, 9545)) }
    }
}

impl RpcBuilder {
    /// Returns `true` if the server should be started.
    pub const fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Sets the given [`SocketAddr`].
    pub const fn set_addr(&mut self, addr: SocketAddr) {
        self.socket = addr;
    }
}
