//! JSON types of the L2 execution engine API.

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Parameters of `engine_assembleL2Block`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleL2BlockParams {
    /// Number of the block to assemble.
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    /// Transactions that must lead the block, EIP-2718 encoded.
    pub transactions: Vec<Bytes>,
}

/// A `{ "success": bool }` engine API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenericResponse {
    /// Whether the call succeeded.
    pub success: bool,
}

/// An L2 block in the form exchanged with the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableL2Data {
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Fee recipient of the block.
    pub miner: Address,
    /// Block number.
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    /// Gas limit of the block.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// Base fee per gas, absent before London.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee_per_gas: Option<U256>,
    /// Block timestamp.
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// EIP-2718 encoded transactions.
    pub transactions: Vec<Bytes>,
    /// State root after executing the block.
    pub state_root: B256,
    /// Gas used by the block.
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// Root of the receipts trie.
    pub receipts_root: B256,
    /// Bloom filter of the block's logs.
    pub logs_bloom: Bytes,
    /// Extra data of the block.
    #[serde(default)]
    pub extra_data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_l2_data_json() {
        let raw = r#"{
            "parentHash": "0x0101010101010101010101010101010101010101010101010101010101010101",
            "miner": "0x0000000000000000000000000000000000000002",
            "number": "0x10",
            "gasLimit": "0x1c9c380",
            "baseFeePerGas": "0x7",
            "timestamp": "0x64",
            "transactions": ["0x7e01"],
            "stateRoot": "0x0202020202020202020202020202020202020202020202020202020202020202",
            "gasUsed": "0x5208",
            "receiptsRoot": "0x0303030303030303030303030303030303030303030303030303030303030303",
            "logsBloom": "0x00"
        }"#;

        let data: ExecutableL2Data = serde_json::from_str(raw).unwrap();
        assert_eq!(data.number, 16);
        assert_eq!(data.gas_limit, 30_000_000);
        assert_eq!(data.base_fee_per_gas, Some(U256::from(7)));
        assert_eq!(data.gas_used, 21_000);
        assert_eq!(data.transactions, vec![Bytes::from_static(&[0x7e, 0x01])]);
        assert!(data.extra_data.is_empty());
    }

    #[test]
    fn test_assemble_params_json() {
        let params = AssembleL2BlockParams { number: 5, transactions: vec![] };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"number":"0x5","transactions":[]}"#
        );
    }
}
