//! Rules for L1 messages carried at the head of a block.

use alloy_primitives::Bytes;
use morph_protocol::L1Message;

/// Why the L1 messages declared by a block are not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InclusionError {
    /// The block declares more L1 messages than allowed.
    #[error("{count} L1 messages exceed the per-block limit of {max}")]
    TooMany {
        /// The number of declared messages.
        count: usize,
        /// The per-block limit.
        max: u64,
    },
    /// A declared message does not continue the queue.
    #[error("expected L1 message {expected}, got {got}")]
    NonContiguous {
        /// The queue index expected at this position.
        expected: u64,
        /// The declared queue index.
        got: u64,
    },
    /// The block has fewer transactions than declared L1 messages.
    #[error("L1 message {queue_index} has no transaction in the block")]
    MissingTransaction {
        /// The queue index of the message.
        queue_index: u64,
    },
    /// The transaction at the message's position is not the message's envelope.
    #[error("transaction at the position of L1 message {queue_index} does not match it")]
    TransactionMismatch {
        /// The queue index of the message.
        queue_index: u64,
    },
    /// The declared messages run past the last representable queue index.
    #[error("L1 message queue index space exhausted")]
    IndexOverflow,
    /// The declared message differs from the local L1 message queue.
    #[error("L1 message {queue_index} differs from the local queue")]
    UnknownMessage {
        /// The queue index of the message.
        queue_index: u64,
    },
}

/// Verifies that `messages` continue the queue at `next_index`, respect `max`, and are the
/// leading transactions of the block in the same order.
pub fn verify_l1_inclusion(
    messages: &[L1Message],
    txs: &[Bytes],
    next_index: u64,
    max: u64,
) -> Result<(), InclusionError> {
    if messages.len() as u64 > max {
        return Err(InclusionError::TooMany { count: messages.len(), max });
    }

    for (offset, message) in messages.iter().enumerate() {
        let expected =
            next_index.checked_add(offset as u64).ok_or(InclusionError::IndexOverflow)?;
        let queue_index = message.queue_index();
        if queue_index != expected {
            return Err(InclusionError::NonContiguous { expected, got: queue_index });
        }
        let tx = txs.get(offset).ok_or(InclusionError::MissingTransaction { queue_index })?;
        if message.tx.encoded_2718() != *tx {
            return Err(InclusionError::TransactionMismatch { queue_index });
        }
    }
    Ok(())
}

/// Returns the prefix of `offered` whose envelopes lead the block transactions.
pub fn leading_l1_messages(mut offered: Vec<L1Message>, txs: &[Bytes]) -> Vec<L1Message> {
    let included = offered
        .iter()
        .zip(txs)
        .take_while(|(message, tx)| message.tx.encoded_2718() == **tx)
        .count();
    offered.truncate(included);
    offered
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use morph_protocol::L1MessageTx;
    use rstest::rstest;

    fn message(queue_index: u64) -> L1Message {
        L1Message {
            tx: L1MessageTx {
                queue_index,
                gas_limit: 100_000,
                to: Some(Address::repeat_byte(0x22)),
                value: U256::from(queue_index),
                sender: Address::repeat_byte(0x11),
                ..Default::default()
            },
            l1_height: 10,
            ..Default::default()
        }
    }

    fn envelopes(messages: &[L1Message]) -> Vec<Bytes> {
        messages.iter().map(|message| message.tx.encoded_2718()).collect()
    }

    #[test]
    fn test_verify_accepts_leading_messages() {
        let messages = vec![message(3), message(4)];
        let mut txs = envelopes(&messages);
        txs.push(Bytes::from_static(&[0x02, 0xc0]));

        assert_eq!(verify_l1_inclusion(&messages, &txs, 3, 2), Ok(()));
        assert_eq!(verify_l1_inclusion(&[], &txs, 3, 2), Ok(()));
    }

    #[rstest]
    #[case::too_many(vec![message(1), message(2)], 1, 1, InclusionError::TooMany { count: 2, max: 1 })]
    #[case::wrong_start(vec![message(2)], 1, 5, InclusionError::NonContiguous { expected: 1, got: 2 })]
    #[case::gap(vec![message(1), message(3)], 1, 5, InclusionError::NonContiguous { expected: 2, got: 3 })]
    #[case::past_last_index(vec![message(u64::MAX), message(u64::MAX)], u64::MAX, 5, InclusionError::IndexOverflow)]
    fn test_verify_rejects(
        #[case] messages: Vec<L1Message>,
        #[case] next_index: u64,
        #[case] max: u64,
        #[case] expected: InclusionError,
    ) {
        let txs = envelopes(&messages);
        assert_eq!(verify_l1_inclusion(&messages, &txs, next_index, max), Err(expected));
    }

    #[test]
    fn test_verify_rejects_reordered_transactions() {
        let messages = vec![message(1), message(2)];
        let mut txs = envelopes(&messages);
        txs.swap(0, 1);
        assert_eq!(
            verify_l1_inclusion(&messages, &txs, 1, 5),
            Err(InclusionError::TransactionMismatch { queue_index: 1 })
        );
    }

    #[test]
    fn test_verify_rejects_missing_transaction() {
        let messages = vec![message(1), message(2)];
        let txs = envelopes(&messages[..1]);
        assert_eq!(
            verify_l1_inclusion(&messages, &txs, 1, 5),
            Err(InclusionError::MissingTransaction { queue_index: 2 })
        );
    }

    #[test]
    fn test_leading_l1_messages_stops_at_first_mismatch() {
        let offered = vec![message(1), message(2), message(3)];
        let mut txs = envelopes(&offered[..1]);
        txs.push(Bytes::from_static(&[0x02]));
        txs.push(offered[2].tx.encoded_2718());

        assert_eq!(leading_l1_messages(offered.clone(), &txs), vec![offered[0].clone()]);
        assert_eq!(leading_l1_messages(offered.clone(), &envelopes(&offered)), offered);
        assert!(leading_l1_messages(offered, &[]).is_empty());
    }
}
