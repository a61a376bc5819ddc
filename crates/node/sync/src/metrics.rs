/// Container for [`crate::Syncer`] metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of L1 messages appended to the queue.
    pub const SYNC_APPENDED_MESSAGES_TOTAL: &'static str = "morph_sync_appended_messages_total";
    /// Identifier for the counter of deposit logs that failed to decode.
    pub const SYNC_DECODE_FAILURES_TOTAL: &'static str = "morph_sync_decode_failures_total";
    /// Identifier for the counter of failed L1 RPC requests.
    pub const SYNC_RPC_ERRORS_TOTAL: &'static str = "morph_sync_rpc_errors_total";
    /// Identifier for the gauge of the L1 height synced up to.
    pub const SYNC_L1_SYNCED_HEIGHT: &'static str = "morph_sync_l1_synced_height";
    /// Identifier for the gauge of the latest queue index.
    pub const SYNC_LATEST_QUEUE_INDEX: &'static str = "morph_sync_latest_queue_index";

    /// Describes and zeroes the syncer metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::SYNC_APPENDED_MESSAGES_TOTAL,
            metrics::Unit::Count,
            "Total number of L1 messages appended to the queue"
        );
        metrics::describe_counter!(
            Self::SYNC_DECODE_FAILURES_TOTAL,
            metrics::Unit::Count,
            "Total number of deposit logs that failed to decode"
        );
        metrics::describe_counter!(
            Self::SYNC_RPC_ERRORS_TOTAL,
            metrics::Unit::Count,
            "Total number of failed L1 RPC requests"
        );
        metrics::describe_gauge!(Self::SYNC_L1_SYNCED_HEIGHT, "L1 height the queue is synced to");
        metrics::describe_gauge!(Self::SYNC_LATEST_QUEUE_INDEX, "Latest L1 message queue index");
    }

    fn zero() {
        metrics::counter!(Self::SYNC_APPENDED_MESSAGES_TOTAL).increment(0);
        metrics::counter!(Self::SYNC_DECODE_FAILURES_TOTAL).increment(0);
        metrics::counter!(Self::SYNC_RPC_ERRORS_TOTAL).increment(0);
    }
}
