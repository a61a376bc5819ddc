//! RPC CLI Flags

use morph_rpc::RpcBuilder;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Configuration of the `l2node` JSON-RPC server.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct RpcArgs {
    /// Disables the RPC server.
    #[arg(long = "rpc.disabled", default_value = "false", env = "MORPH_NODE_RPC_DISABLED")]
    pub rpc_disabled: bool,
    /// The address to bind the RPC server to.
    #[arg(long = "rpc.addr", default_value = "127.0.0.1", env = "MORPH_NODE_RPC_ADDR")]
    pub listen_addr: IpAddr,
    /// The port to bind the RPC server to.
    #[arg(long = "rpc.port", default_value = "9545", env = "MORPH_NODE_RPC_PORT")]
    pub listen_port: u16,
}

impl Default for RpcArgs {
    fn default() -> Self {
        Self { rpc_disabled: false, listen_addr: IpAddr::V4(Ipv4Addr::LOCALHOST), listen_port: 9545 }
    }
}

impl From<RpcArgs> for RpcBuilder {
    fn from(args: RpcArgs) -> Self {
        Self {
            disabled: args.rpc_disabled,
            socket: SocketAddr::new(args.listen_addr, args.listen_port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct MockCommand {
        #[clap(flatten)]
        rpc: RpcArgs,
    }

    #[test]
    fn test_rpc_args_defaults() {
        let args = MockCommand::parse_from(["test"]);
        assert_eq!(args.rpc, RpcArgs::default());
        assert_eq!(RpcBuilder::from(args.rpc), RpcBuilder::default());
    }

    #[test]
    fn test_rpc_args_into_builder() {
        let args = MockCommand::parse_from([
            "test",
            "--rpc.addr",
            "0.0.0.0",
            "--rpc.port",
            "8000",
            "--rpc.disabled",
        ]);
        let builder = RpcBuilder::from(args.rpc);
        assert!(!builder.enabled());
        assert_eq!(builder.socket, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }
}
