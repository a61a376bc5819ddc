#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::PrometheusError;

mod flags;
pub use flags::{LogArgs, MetricsArgs};

mod logs;
pub use logs::{FileLogConfig, LogConfig, LogRotation, StdoutLogConfig};

mod clap;
pub use clap::cli_styles;

mod prometheus;
pub use prometheus::init_prometheus_server;

mod tracing;
pub use tracing::{LogFormat, init_test_tracing};
