#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod config;
pub use config::{ConfigError, DEFAULT_MAX_L1_MESSAGES_PER_BLOCK, ExecutorConfig};

mod error;
pub use error::ExecutorError;

mod inclusion;
pub use inclusion::{InclusionError, leading_l1_messages, verify_l1_inclusion};

mod traits;
pub use traits::{BlockExecutor, BlockProposer, L2Node};

mod state;

mod sequencer;
pub use sequencer::SequencerExecutor;

mod validator;
pub use validator::ValidatorExecutor;

mod executor;
pub use executor::Executor;

mod mock;
pub use mock::MockSequencer;

mod metrics;
pub use metrics::Metrics;
