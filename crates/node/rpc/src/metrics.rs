//! Metrics for the RPC server.

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of RPC calls, labelled by method.
    pub const RPC_CALLS: &str = "morph_node_rpc_calls";

    /// Identifier for the counter of failed RPC calls, labelled by method.
    pub const RPC_ERRORS: &str = "morph_node_rpc_errors";

    /// Initializes metrics for the RPC server.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in the RPC server.
    fn describe() {
        metrics::describe_counter!(Self::RPC_CALLS, "Calls made to the l2node RPC module");
        metrics::describe_counter!(Self::RPC_ERRORS, "Failed calls to the l2node RPC module");
    }

    /// Initializes metrics to `0` so they can be queried immediately by consumers of prometheus
    /// metrics.
    fn zero() {
        for method in ["requestBlockData", "checkBlockData", "deliverBlock"] {
            metrics::counter!(Self::RPC_CALLS, "method" => method).absolute(0);
            metrics::counter!(Self::RPC_ERRORS, "method" => method).absolute(0);
        }
    }
}
