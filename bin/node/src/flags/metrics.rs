//! Metrics initialization.

use crate::version::register_version_metrics;
use morph_cli::MetricsArgs;

/// Starts the Prometheus exporter and registers the metrics of every node component.
///
/// This function should be called at the beginning of the program.
pub fn init_unified_metrics(args: &MetricsArgs) -> anyhow::Result<()> {
    args.init_metrics()?;
    if args.enabled {
        morph_storage::Metrics::init();
        morph_sync::Metrics::init();
        morph_engine::Metrics::init();
        morph_executor::Metrics::init();
        morph_rpc::Metrics::init();
        register_version_metrics();
    }
    Ok(())
}
