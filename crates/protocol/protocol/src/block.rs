//! Block data exchanged through consensus.
//!
//! A candidate block travels as three parts: the raw transaction list, the [`AttestedHeader`]
//! covered by the validators' signatures, and the [`ExtendedPayload`] carried alongside it.

use crate::{
    ExecutableL2Data, L1Message,
    codec::{WireError, WireReader, WireWriter},
};
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// The block fields covered by consensus attestation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttestedHeader {
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Proposer of the block.
    pub miner: Address,
    /// Block number.
    pub number: u64,
    /// Gas limit of the block.
    pub gas_limit: u64,
    /// Base fee per gas, absent before London.
    pub base_fee: Option<U256>,
    /// Block timestamp.
    pub timestamp: u64,
}

impl AttestedHeader {
    /// Encodes the header.
    pub fn encode(&self) -> Result<Bytes, WireError> {
        let mut writer = WireWriter::new();
        writer
            .b256(&self.parent_hash)
            .address(&self.miner)
            .u64(self.number)
            .u64(self.gas_limit)
            .optional(self.base_fee.as_ref(), |w, fee| w.u256(fee))
            .u64(self.timestamp);
        writer.finish()
    }

    /// Decodes a header produced by [`AttestedHeader::encode`].
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = WireReader::new(buf)?;
        let header = Self {
            parent_hash: reader.b256()?,
            miner: reader.address()?,
            number: reader.u64()?,
            gas_limit: reader.u64()?,
            base_fee: reader.optional(|r| r.u256())?,
            timestamp: reader.u64()?,
        };
        reader.finish()?;
        Ok(header)
    }
}

/// The block fields carried alongside the attested header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtendedPayload {
    /// State root after executing the block.
    pub state_root: B256,
    /// Gas used by the block.
    pub gas_used: u64,
    /// Root of the receipts trie.
    pub receipts_root: B256,
    /// Bloom filter of the block's logs.
    pub logs_bloom: Bytes,
    /// Extra data of the block.
    pub extra_data: Bytes,
    /// The L1 messages included in the block, in inclusion order.
    pub l1_messages: Vec<L1Message>,
}

impl ExtendedPayload {
    /// Encodes the payload.
    ///
    /// Fails if a byte string or the message list is too long for its `u32` length prefix.
    pub fn encode(&self) -> Result<Bytes, WireError> {
        let mut writer = WireWriter::new();
        writer
            .b256(&self.state_root)
            .u64(self.gas_used)
            .b256(&self.receipts_root)
            .bytes(&self.logs_bloom)
            .bytes(&self.extra_data)
            .len_prefix(self.l1_messages.len());
        for message in &self.l1_messages {
            message.write_to(&mut writer);
        }
        writer.finish()
    }

    /// Decodes a payload produced by [`ExtendedPayload::encode`].
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut reader = WireReader::new(buf)?;
        let state_root = reader.b256()?;
        let gas_used = reader.u64()?;
        let receipts_root = reader.b256()?;
        let logs_bloom = reader.bytes()?;
        let extra_data = reader.bytes()?;
        let count = reader.len_prefix()?;
        let l1_messages =
            (0..count).map(|_| L1Message::read_from(&mut reader)).collect::<Result<Vec<_>, _>>()?;
        reader.finish()?;
        Ok(Self { state_root, gas_used, receipts_root, logs_bloom, extra_data, l1_messages })
    }
}

impl ExecutableL2Data {
    /// Splits the block into its transactions, attested header and extended payload.
    ///
    /// `l1_messages` are the queue entries included at the head of the block.
    pub fn into_parts(
        self,
        l1_messages: Vec<L1Message>,
    ) -> (Vec<Bytes>, AttestedHeader, ExtendedPayload) {
        let header = AttestedHeader {
            parent_hash: self.parent_hash,
            miner: self.miner,
            number: self.number,
            gas_limit: self.gas_limit,
            base_fee: self.base_fee_per_gas,
            timestamp: self.timestamp,
        };
        let payload = ExtendedPayload {
            state_root: self.state_root,
            gas_used: self.gas_used,
            receipts_root: self.receipts_root,
            logs_bloom: self.logs_bloom,
            extra_data: self.extra_data,
            l1_messages,
        };
        (self.transactions, header, payload)
    }

    /// Reassembles a block from its parts.
    pub fn from_parts(
        transactions: Vec<Bytes>,
        header: AttestedHeader,
        payload: ExtendedPayload,
    ) -> Self {
        Self {
            parent_hash: header.parent_hash,
            miner: header.miner,
            number: header.number,
            gas_limit: header.gas_limit,
            base_fee_per_gas: header.base_fee,
            timestamp: header.timestamp,
            transactions,
            state_root: payload.state_root,
            gas_used: payload.gas_used,
            receipts_root: payload.receipts_root,
            logs_bloom: payload.logs_bloom,
            extra_data: payload.extra_data,
        }
    }
}

/// A block proposal as handed to the consensus driver.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    /// EIP-2718 encoded transactions.
    pub txs: Vec<Bytes>,
    /// Encoded [`AttestedHeader`].
    pub header: Bytes,
    /// Encoded [`ExtendedPayload`].
    pub payload: Bytes,
}

impl BlockData {
    /// Returns true if any part of the block is missing.
    ///
    /// Such data carries no block and is not applicable to check or deliver.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty() || self.header.is_empty() || self.payload.is_empty()
    }
}
