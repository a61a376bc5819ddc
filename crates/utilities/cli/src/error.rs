//! Error types for CLI utilities.

use metrics_exporter_prometheus::BuildError;
use std::io;
use thiserror::Error;

/// An error starting the Prometheus exporter.
#[derive(Debug, Error)]
pub enum PrometheusError {
    /// Failed to bind to the requested address.
    #[error("failed to bind metrics listener: {0}")]
    Bind(#[from] io::Error),
    /// Failed to build or install the recorder.
    #[error("failed to install prometheus recorder: {0}")]
    Build(#[from] BuildError),
}
