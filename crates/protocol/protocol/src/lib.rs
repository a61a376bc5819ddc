#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod deposit;
pub use deposit::{
    DEPOSIT_EVENT_ABI, DEPOSIT_EVENT_ABI_HASH, DEPOSIT_EVENT_VERSION_0, DepositError,
    DepositErrorKind, decode_deposit_log,
};

mod message;
pub use message::{FIRST_QUEUE_INDEX, L1_MESSAGE_TX_TYPE, L1Message, L1MessageTx};

mod codec;
pub use codec::{WIRE_VERSION, WireError};

mod block;
pub use block::{AttestedHeader, BlockData, ExtendedPayload};

mod engine;
pub use engine::{AssembleL2BlockParams, ExecutableL2Data, GenericResponse};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
