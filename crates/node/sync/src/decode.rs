//! Batch decoding of deposit logs.

use alloy_primitives::B256;
use alloy_rpc_types_eth::Log;
use morph_protocol::{DepositError, L1Message, decode_deposit_log};

/// Why a log could not be turned into an [`L1Message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailureReason {
    /// The log payload was rejected by the deposit decoder.
    #[error(transparent)]
    Deposit(#[from] DepositError),
    /// The RPC returned the log without its block number, transaction hash or log index.
    #[error("log is missing its block number, transaction hash or log index")]
    MissingProvenance,
}

/// A log that failed to decode, with whatever provenance the RPC reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    /// The L1 block of the log.
    pub l1_height: Option<u64>,
    /// The L1 transaction of the log.
    pub l1_tx_hash: Option<B256>,
    /// The index of the log within its block.
    pub log_index: Option<u64>,
    /// Why decoding failed.
    pub reason: DecodeFailureReason,
}

/// The result of decoding a batch of logs.
///
/// A bad log never hides the good ones around it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// The decoded messages in L1 order, with queue index zero.
    pub decoded: Vec<L1Message>,
    /// The logs that could not be decoded.
    pub failed: Vec<DecodeFailure>,
}

/// Decodes every log in the batch.
///
/// Logs flagged as `removed` are dropped silently. The decoded messages are ordered by block
/// number, then log index.
pub fn decode_deposit_logs(logs: &[Log]) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();

    for log in logs.iter().filter(|log| !log.removed) {
        let (Some(l1_height), Some(l1_tx_hash), Some(log_index)) =
            (log.block_number, log.transaction_hash, log.log_index)
        else {
            outcome.failed.push(DecodeFailure {
                l1_height: log.block_number,
                l1_tx_hash: log.transaction_hash,
                log_index: log.log_index,
                reason: DecodeFailureReason::MissingProvenance,
            });
            continue;
        };

        match decode_deposit_log(&log.inner) {
            Ok(tx) => outcome.decoded.push(L1Message { tx, l1_height, l1_tx_hash, log_index }),
            Err(err) => outcome.failed.push(DecodeFailure {
                l1_height: Some(l1_height),
                l1_tx_hash: Some(l1_tx_hash),
                log_index: Some(log_index),
                reason: err.into(),
            }),
        }
    }

    outcome.decoded.sort_by_key(L1Message::l1_position);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use morph_protocol::test_utils::DepositLogBuilder;

    fn rpc_log(inner: alloy_primitives::Log, block: u64, index: u64) -> Log {
        Log {
            inner,
            block_number: Some(block),
            transaction_hash: Some(B256::with_last_byte(index as u8)),
            log_index: Some(index),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_partial_success() {
        let logs = vec![
            rpc_log(DepositLogBuilder::new().value(U256::from(1)).build(), 10, 0),
            rpc_log(DepositLogBuilder::new().offset(0).build(), 10, 1),
            rpc_log(DepositLogBuilder::new().value(U256::from(2)).build(), 11, 0),
        ];

        let outcome = decode_deposit_logs(&logs);
        assert_eq!(outcome.decoded.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].l1_height, Some(10));
        assert_eq!(outcome.failed[0].log_index, Some(1));
        assert!(matches!(
            outcome.failed[0].reason,
            DecodeFailureReason::Deposit(DepositError::InvalidOpaqueDataOffset(_))
        ));
        assert!(outcome.decoded.iter().all(|message| message.queue_index() == 0));
    }

    #[test]
    fn test_decode_orders_by_position() {
        let logs = vec![
            rpc_log(DepositLogBuilder::new().value(U256::from(3)).build(), 12, 0),
            rpc_log(DepositLogBuilder::new().value(U256::from(2)).build(), 11, 5),
            rpc_log(DepositLogBuilder::new().value(U256::from(1)).build(), 11, 2),
        ];

        let values: Vec<_> =
            decode_deposit_logs(&logs).decoded.iter().map(|message| message.tx.value).collect();
        assert_eq!(values, vec![U256::from(1), U256::from(2), U256::from(3)]);
    }

    #[test]
    fn test_decode_skips_removed_logs() {
        let mut removed = rpc_log(DepositLogBuilder::new().build(), 10, 0);
        removed.removed = true;

        let outcome = decode_deposit_logs(&[removed]);
        assert_eq!(outcome, DecodeOutcome::default());
    }

    #[test]
    fn test_decode_missing_provenance() {
        let mut log = rpc_log(DepositLogBuilder::new().build(), 10, 0);
        log.log_index = None;

        let outcome = decode_deposit_logs(&[log]);
        assert!(outcome.decoded.is_empty());
        assert_eq!(outcome.failed[0].reason, DecodeFailureReason::MissingProvenance);
        assert_eq!(outcome.failed[0].l1_height, Some(10));
    }
}
