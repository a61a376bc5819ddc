//! Flags shared by the node binaries.

mod log;
pub use log::LogArgs;

mod metrics;
pub use metrics::MetricsArgs;
