//! Storage model of an L1 message queue entry.

use alloy_primitives::{Address, B256, Bytes, U256};
use morph_protocol::{L1Message, L1MessageTx};
use reth_codecs::Compact;
use serde::{Deserialize, Serialize};

/// An L1 message as stored in the [`crate::models::L1Messages`] table.
///
/// The recipient is flattened into `is_creation` and `to`, with `to` left zero for contract
/// creations. `input` is the only unbounded field and stays last.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Compact)]
pub struct StoredL1Message {
    /// Position of the message in the queue.
    pub queue_index: u64,
    /// Gas limit of the L2 transaction.
    pub gas_limit: u64,
    /// Whether the message creates a contract.
    pub is_creation: bool,
    /// Recipient of the message, zero for contract creations.
    pub to: Address,
    /// Value transferred to the recipient.
    pub value: U256,
    /// Amount minted on L2.
    pub mint: U256,
    /// The L1 account that initiated the deposit.
    pub sender: Address,
    /// Number of the L1 block that emitted the deposit.
    pub l1_height: u64,
    /// Hash of the L1 transaction that emitted the deposit.
    pub l1_tx_hash: B256,
    /// Index of the deposit log within its L1 block.
    pub log_index: u64,
    /// Call data.
    pub input: Bytes,
}

impl From<L1Message> for StoredL1Message {
    fn from(message: L1Message) -> Self {
        let L1Message { tx, l1_height, l1_tx_hash, log_index } = message;
        Self {
            queue_index: tx.queue_index,
            gas_limit: tx.gas_limit,
            is_creation: tx.to.is_none(),
            to: tx.to.unwrap_or_default(),
            value: tx.value,
            mint: tx.mint,
            sender: tx.sender,
            l1_height,
            l1_tx_hash,
            log_index,
            input: tx.input,
        }
    }
}

impl From<StoredL1Message> for L1Message {
    fn from(stored: StoredL1Message) -> Self {
        Self {
            tx: L1MessageTx {
                queue_index: stored.queue_index,
                gas_limit: stored.gas_limit,
                to: (!stored.is_creation).then_some(stored.to),
                value: stored.value,
                mint: stored.mint,
                input: stored.input,
                sender: stored.sender,
            },
            l1_height: stored.l1_height,
            l1_tx_hash: stored.l1_tx_hash,
            log_index: stored.log_index,
        }
    }
}
