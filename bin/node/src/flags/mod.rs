//! CLI Flags

mod globals;
pub use globals::GlobalArgs;

mod rpc;
pub use rpc::RpcArgs;

mod sync;
pub use sync::SyncArgs;

mod sequencer;
pub use sequencer::{MockSequencerArgs, NodeMode};

mod metrics;
pub use metrics::init_unified_metrics;
