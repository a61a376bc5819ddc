/// Container for [`crate::MessageDb`] metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of successful storage requests.
    pub const STORAGE_REQUESTS_SUCCESS_TOTAL: &'static str = "morph_storage_success_total";
    /// Identifier for the counter of failed storage requests.
    pub const STORAGE_REQUESTS_ERROR_TOTAL: &'static str = "morph_storage_error_total";
    /// Identifier for the histogram of storage request durations.
    pub const STORAGE_REQUEST_DURATION_SECONDS: &'static str = "morph_storage_duration_seconds";
    /// Identifier for the gauge tracking the latest stored queue index.
    pub const L1_MESSAGE_LATEST_QUEUE_INDEX: &'static str = "morph_storage_latest_queue_index";
    /// Identifier for the gauge tracking the synced L1 height.
    pub const L1_SYNCED_HEIGHT: &'static str = "morph_storage_synced_l1_height";

    pub(crate) const STORAGE_METHOD_READ_L1_MESSAGES: &'static str = "read_l1_messages";
    pub(crate) const STORAGE_METHOD_GET_L1_MESSAGE: &'static str = "get_l1_message";
    pub(crate) const STORAGE_METHOD_LATEST_L1_MESSAGE: &'static str = "latest_l1_message";
    pub(crate) const STORAGE_METHOD_SYNCED_L1_HEIGHT: &'static str = "synced_l1_height";
    pub(crate) const STORAGE_METHOD_APPEND_L1_MESSAGES: &'static str = "append_l1_messages";

    const STORAGE_METHODS: [&'static str; 5] = [
        Self::STORAGE_METHOD_READ_L1_MESSAGES,
        Self::STORAGE_METHOD_GET_L1_MESSAGE,
        Self::STORAGE_METHOD_LATEST_L1_MESSAGE,
        Self::STORAGE_METHOD_SYNCED_L1_HEIGHT,
        Self::STORAGE_METHOD_APPEND_L1_MESSAGES,
    ];

    /// Describes and zeroes all storage metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::STORAGE_REQUESTS_SUCCESS_TOTAL,
            metrics::Unit::Count,
            "Total number of successful L1 message storage requests"
        );
        metrics::describe_counter!(
            Self::STORAGE_REQUESTS_ERROR_TOTAL,
            metrics::Unit::Count,
            "Total number of failed L1 message storage requests"
        );
        metrics::describe_histogram!(
            Self::STORAGE_REQUEST_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Duration of L1 message storage requests"
        );
        metrics::describe_gauge!(
            Self::L1_MESSAGE_LATEST_QUEUE_INDEX,
            "Queue index of the latest stored L1 message"
        );
        metrics::describe_gauge!(Self::L1_SYNCED_HEIGHT, "L1 height the queue is synced up to");
    }

    fn zero() {
        for method in Self::STORAGE_METHODS {
            metrics::counter!(Self::STORAGE_REQUESTS_SUCCESS_TOTAL, "method" => method)
                .increment(0);
            metrics::counter!(Self::STORAGE_REQUESTS_ERROR_TOTAL, "method" => method).increment(0);
            metrics::histogram!(Self::STORAGE_REQUEST_DURATION_SECONDS, "method" => method)
                .record(0.0);
        }
    }

    /// Records the outcome and duration of a storage request.
    pub(crate) fn record_result<T, E>(
        method: &'static str,
        result: &Result<T, E>,
        elapsed: std::time::Duration,
    ) {
        metrics::histogram!(Self::STORAGE_REQUEST_DURATION_SECONDS, "method" => method)
            .record(elapsed.as_secs_f64());
        if result.is_ok() {
            metrics::counter!(Self::STORAGE_REQUESTS_SUCCESS_TOTAL, "method" => method)
                .increment(1);
        } else {
            metrics::counter!(Self::STORAGE_REQUESTS_ERROR_TOTAL, "method" => method).increment(1);
        }
    }
}
