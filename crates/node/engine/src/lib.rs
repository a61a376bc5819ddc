#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod client;
pub use client::{EngineClient, EngineClientError, HyperAuthClient};

mod traits;
pub use traits::ExecutionEngine;

mod jwt;
pub use jwt::{FileJwtSecret, JwtSecretError, JwtSecretProvider, StaticJwtSecret};

mod metrics;
pub use metrics::Metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
