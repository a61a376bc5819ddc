/// Container for block executor metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of non-empty proposals.
    pub const EXECUTOR_BLOCKS_PROPOSED_TOTAL: &'static str = "morph_executor_blocks_proposed_total";
    /// Identifier for the counter of imported blocks.
    pub const EXECUTOR_BLOCKS_DELIVERED_TOTAL: &'static str =
        "morph_executor_blocks_delivered_total";
    /// Identifier for the counter of rejected blocks, labelled by stage.
    pub const EXECUTOR_BLOCKS_REJECTED_TOTAL: &'static str = "morph_executor_blocks_rejected_total";
    /// Identifier for the gauge of the L1 message cursor.
    pub const EXECUTOR_LATEST_PROCESSED_L1_INDEX: &'static str =
        "morph_executor_latest_processed_l1_index";
    /// Identifier for the gauge of the current L2 height.
    pub const EXECUTOR_CURRENT_HEIGHT: &'static str = "morph_executor_current_height";

    /// Label of rejections during checking.
    pub const STAGE_CHECK: &'static str = "check";
    /// Label of rejections during delivery.
    pub const STAGE_DELIVER: &'static str = "deliver";

    /// Describes and zeroes the executor metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::EXECUTOR_BLOCKS_PROPOSED_TOTAL,
            metrics::Unit::Count,
            "Total number of non-empty block proposals"
        );
        metrics::describe_counter!(
            Self::EXECUTOR_BLOCKS_DELIVERED_TOTAL,
            metrics::Unit::Count,
            "Total number of imported blocks"
        );
        metrics::describe_counter!(
            Self::EXECUTOR_BLOCKS_REJECTED_TOTAL,
            metrics::Unit::Count,
            "Total number of rejected blocks"
        );
        metrics::describe_gauge!(
            Self::EXECUTOR_LATEST_PROCESSED_L1_INDEX,
            "Queue index of the last L1 message included on L2"
        );
        metrics::describe_gauge!(Self::EXECUTOR_CURRENT_HEIGHT, "Current L2 block height");
    }

    fn zero() {
        metrics::counter!(Self::EXECUTOR_BLOCKS_PROPOSED_TOTAL).increment(0);
        metrics::counter!(Self::EXECUTOR_BLOCKS_DELIVERED_TOTAL).increment(0);
        for stage in [Self::STAGE_CHECK, Self::STAGE_DELIVER] {
            metrics::counter!(Self::EXECUTOR_BLOCKS_REJECTED_TOTAL, "stage" => stage).increment(0);
        }
    }
}
