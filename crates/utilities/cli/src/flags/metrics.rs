//! Prometheus metrics CLI args.

use crate::{PrometheusError, init_prometheus_server};
use clap::Args;
use std::net::{IpAddr, Ipv4Addr};

/// Configuration for the Prometheus exporter.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MetricsArgs {
    /// Controls whether Prometheus metrics are enabled. Disabled by default.
    #[arg(
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "MORPH_NODE_METRICS_ENABLED"
    )]
    pub enabled: bool,
    /// The port to serve Prometheus metrics on.
    #[arg(
        long = "metrics.port",
        global = true,
        default_value = "9090",
        env = "MORPH_NODE_METRICS_PORT"
    )]
    pub port: u16,
    /// The IP address to use for Prometheus metrics.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "MORPH_NODE_METRICS_ADDR"
    )]
    pub addr: IpAddr,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, port: 9090, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    }
}

impl MetricsArgs {
    /// Starts the Prometheus exporter if metrics are enabled.
    pub fn init_metrics(&self) -> Result<(), PrometheusError> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port)?;
        }
        Ok(())
    }
}
