//! Builders for deposit event logs.

use crate::{DEPOSIT_EVENT_ABI_HASH, DEPOSIT_EVENT_VERSION_0};
use alloy_primitives::{Address, B256, Bytes, Log, LogData, U256};

/// Builds `TransactionDeposited` logs with a version 0 payload.
#[derive(Debug, Clone)]
pub struct DepositLogBuilder {
    contract: Address,
    from: Address,
    to: Address,
    version: B256,
    mint: U256,
    value: U256,
    gas_limit: u64,
    creation_flag: u8,
    input: Bytes,
    offset: u64,
}

impl Default for DepositLogBuilder {
    fn default() -> Self {
        Self {
            contract: Address::ZERO,
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            version: DEPOSIT_EVENT_VERSION_0,
            mint: U256::ZERO,
            value: U256::ZERO,
            gas_limit: 21_000,
            creation_flag: 0,
            input: Bytes::new(),
            offset: 32,
        }
    }
}

impl DepositLogBuilder {
    /// Creates a builder for a plain call deposit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address of the emitting contract.
    pub const fn contract(mut self, contract: Address) -> Self {
        self.contract = contract;
        self
    }

    /// Sets the depositor.
    pub const fn from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }

    /// Sets the recipient topic.
    pub const fn to(mut self, to: Address) -> Self {
        self.to = to;
        self
    }

    /// Sets the version topic.
    pub const fn version(mut self, version: B256) -> Self {
        self.version = version;
        self
    }

    /// Sets the minted amount.
    pub const fn mint(mut self, mint: U256) -> Self {
        self.mint = mint;
        self
    }

    /// Sets the transferred value.
    pub const fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the gas limit.
    pub const fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Sets the raw creation flag byte.
    pub const fn creation_flag(mut self, flag: u8) -> Self {
        self.creation_flag = flag;
        self
    }

    /// Sets the call data.
    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    /// Overrides the ABI offset word, which is 32 for well-formed logs.
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the version 0 opaque payload.
    pub fn opaque_data(&self) -> Vec<u8> {
        let mut opaque = Vec::with_capacity(73 + self.input.len());
        opaque.extend_from_slice(&self.mint.to_be_bytes::<32>());
        opaque.extend_from_slice(&self.value.to_be_bytes::<32>());
        opaque.extend_from_slice(&self.gas_limit.to_be_bytes());
        opaque.push(self.creation_flag);
        opaque.extend_from_slice(&self.input);
        opaque
    }

    /// Builds the log.
    pub fn build(&self) -> Log {
        let opaque = self.opaque_data();
        let padded = opaque.len().div_ceil(32) * 32;
        let mut data = vec![0u8; 64 + padded];
        data[24..32].copy_from_slice(&self.offset.to_be_bytes());
        data[56..64].copy_from_slice(&(opaque.len() as u64).to_be_bytes());
        data[64..64 + opaque.len()].copy_from_slice(&opaque);

        let topics =
            vec![DEPOSIT_EVENT_ABI_HASH, self.from.into_word(), self.to.into_word(), self.version];
        Log { address: self.contract, data: LogData::new_unchecked(topics, data.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DepositError, decode_deposit_log};

    #[test]
    fn test_builder_produces_decodable_log() {
        let log = DepositLogBuilder::new()
            .value(U256::from(7))
            .gas_limit(50_000)
            .input(vec![1, 2, 3])
            .build();

        let tx = decode_deposit_log(&log).unwrap();
        assert_eq!(tx.value, U256::from(7));
        assert_eq!(tx.gas_limit, 50_000);
        assert_eq!(tx.to, Some(Address::repeat_byte(0x22)));
        assert_eq!(tx.input, Bytes::from(vec![1, 2, 3]));
    }

    #[test]
    fn test_builder_offset_override() {
        let log = DepositLogBuilder::new().offset(64).build();
        assert!(matches!(
            decode_deposit_log(&log).unwrap_err(),
            DepositError::InvalidOpaqueDataOffset(_)
        ));
    }
}
