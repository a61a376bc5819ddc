#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod config;
pub use config::{
    ConfigError, Confirmations, DEFAULT_FETCH_BLOCK_RANGE, DEFAULT_LOG_PROGRESS_INTERVAL,
    DEFAULT_POLL_INTERVAL, SyncConfig,
};

mod decode;
pub use decode::{DecodeFailure, DecodeFailureReason, DecodeOutcome, decode_deposit_logs};

mod error;
pub use error::SyncError;

mod metrics;
pub use metrics::Metrics;

mod source;
pub use source::L1Source;

mod syncer;
pub use syncer::{SyncReport, Syncer};
