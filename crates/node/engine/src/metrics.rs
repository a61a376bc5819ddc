/// Container for [`crate::EngineClient`] metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the histogram of engine method request durations.
    pub const ENGINE_METHOD_REQUEST_DURATION: &'static str = "morph_engine_method_request_duration";
    /// Identifier for the counter of failed engine requests.
    pub const ENGINE_METHOD_REQUEST_ERRORS: &'static str = "morph_engine_method_request_errors";

    /// Label for `engine_assembleL2Block`.
    pub const ASSEMBLE_L2_BLOCK_METHOD: &'static str = "assemble_l2_block";
    /// Label for `engine_validateL2Block`.
    pub const VALIDATE_L2_BLOCK_METHOD: &'static str = "validate_l2_block";
    /// Label for `engine_newL2Block`.
    pub const NEW_L2_BLOCK_METHOD: &'static str = "new_l2_block";
    /// Label for `eth_blockNumber`.
    pub const BLOCK_NUMBER_METHOD: &'static str = "block_number";

    /// Initializes metrics for the engine client.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes metrics used in [`morph_engine`][crate].
    #[cfg(feature = "metrics")]
    pub fn describe() {
        metrics::describe_histogram!(
            Self::ENGINE_METHOD_REQUEST_DURATION,
            metrics::Unit::Seconds,
            "Engine method request duration"
        );
        metrics::describe_counter!(
            Self::ENGINE_METHOD_REQUEST_ERRORS,
            metrics::Unit::Count,
            "Engine method request errors"
        );
    }

    /// Initializes metrics to `0` so they can be queried immediately by consumers of prometheus
    /// metrics.
    #[cfg(feature = "metrics")]
    pub fn zero() {
        for method in [
            Self::ASSEMBLE_L2_BLOCK_METHOD,
            Self::VALIDATE_L2_BLOCK_METHOD,
            Self::NEW_L2_BLOCK_METHOD,
            Self::BLOCK_NUMBER_METHOD,
        ] {
            metrics::counter!(Self::ENGINE_METHOD_REQUEST_ERRORS, "method" => method).increment(0);
        }
    }
}
