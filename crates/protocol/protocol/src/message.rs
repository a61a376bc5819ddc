//! L1 message types.

use crate::codec::{WireError, WireReader, WireWriter};
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, keccak256};
use alloy_rlp::{BufMut, Encodable, Header};
use serde::{Deserialize, Serialize};

/// The EIP-2718 transaction type of an L1 message transaction.
pub const L1_MESSAGE_TX_TYPE: u8 = 0x7E;

/// The queue index assigned to the first L1 message.
///
/// Index zero is never assigned, a processed-index cursor of zero means no message has been
/// processed yet.
pub const FIRST_QUEUE_INDEX: u64 = 1;

/// A deposit originating on L1, executed as a synthetic transaction on L2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1MessageTx {
    /// Position of the message in the L1 message queue.
    #[serde(with = "alloy_serde::quantity")]
    pub queue_index: u64,
    /// Gas limit of the L2 transaction.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// Recipient, `None` for contract creations.
    pub to: Option<Address>,
    /// Value transferred to the recipient.
    pub value: U256,
    /// Amount minted on L2.
    pub mint: U256,
    /// Call data.
    pub input: Bytes,
    /// The L1 account that initiated the deposit.
    pub sender: Address,
}

impl L1MessageTx {
    /// Returns true if the message creates a contract.
    pub const fn is_creation(&self) -> bool {
        self.to.is_none()
    }

    /// Returns the [`TxKind`] of the message.
    pub const fn kind(&self) -> TxKind {
        match self.to {
            Some(to) => TxKind::Call(to),
            None => TxKind::Create,
        }
    }

    fn rlp_payload_length(&self) -> usize {
        self.queue_index.length() +
            self.gas_limit.length() +
            self.kind().length() +
            self.value.length() +
            self.input.length() +
            self.sender.length()
    }

    /// Encodes the message as a typed EIP-2718 transaction.
    ///
    /// `0x7E || rlp([queue_index, gas_limit, to, value, input, sender])`
    pub fn encode_2718(&self, out: &mut dyn BufMut) {
        out.put_u8(L1_MESSAGE_TX_TYPE);
        Header { list: true, payload_length: self.rlp_payload_length() }.encode(out);
        self.queue_index.encode(out);
        self.gas_limit.encode(out);
        self.kind().encode(out);
        self.value.encode(out);
        self.input.encode(out);
        self.sender.encode(out);
    }

    /// Returns the length of the EIP-2718 encoding.
    pub fn encode_2718_len(&self) -> usize {
        let payload_length = self.rlp_payload_length();
        1 + Header { list: true, payload_length }.length() + payload_length
    }

    /// Returns the EIP-2718 encoding of the message.
    pub fn encoded_2718(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut out);
        out.into()
    }

    /// Returns the hash of the L2 transaction.
    pub fn tx_hash(&self) -> B256 {
        keccak256(self.encoded_2718())
    }
}

/// An entry of the L1 message queue: a decoded deposit and where it was observed on L1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1Message {
    /// The decoded deposit.
    pub tx: L1MessageTx,
    /// Number of the L1 block that emitted the deposit.
    #[serde(with = "alloy_serde::quantity")]
    pub l1_height: u64,
    /// Hash of the L1 transaction that emitted the deposit.
    pub l1_tx_hash: B256,
    /// Index of the deposit log within its L1 block.
    #[serde(with = "alloy_serde::quantity")]
    pub log_index: u64,
}

impl L1Message {
    /// Returns the queue index of the message.
    pub const fn queue_index(&self) -> u64 {
        self.tx.queue_index
    }

    /// Returns the L1 position `(l1_height, log_index)` the message was derived from.
    pub const fn l1_position(&self) -> (u64, u64) {
        (self.l1_height, self.log_index)
    }

    pub(crate) fn write_to(&self, writer: &mut WireWriter) {
        writer
            .u64(self.tx.queue_index)
            .u64(self.tx.gas_limit)
            .optional(self.tx.to.as_ref(), |w, to| w.address(to))
            .u256(&self.tx.value)
            .u256(&self.tx.mint)
            .address(&self.tx.sender)
            .bytes(&self.tx.input)
            .u64(self.l1_height)
            .b256(&self.l1_tx_hash)
            .u64(self.log_index);
    }

    pub(crate) fn read_from(reader: &mut WireReader<'_>) -> Result<Self, WireError> {
        let queue_index = reader.u64()?;
        let gas_limit = reader.u64()?;
        let to = reader.optional(|r| r.address())?;
        let value = reader.u256()?;
        let mint = reader.u256()?;
        let sender = reader.address()?;
        let input = reader.bytes()?;
        Ok(Self {
            tx: L1MessageTx { queue_index, gas_limit, to, value, mint, input, sender },
            l1_height: reader.u64()?,
            l1_tx_hash: reader.b256()?,
            log_index: reader.u64()?,
        })
    }
}
