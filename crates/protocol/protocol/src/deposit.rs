//! Decoding of deposit event logs into [`L1MessageTx`] values.

use crate::L1MessageTx;
use alloy_primitives::{Address, B256, Bytes, Log, U256, b256};

/// Deposit log event abi signature.
pub const DEPOSIT_EVENT_ABI: &str = "TransactionDeposited(address,address,uint256,bytes)";

/// Deposit event abi hash.
///
/// `keccak256("TransactionDeposited(address,address,uint256,bytes)")`
pub const DEPOSIT_EVENT_ABI_HASH: B256 =
    b256!("b3813568d9991fc951961fcb4c784893574240a28925604d09fc577c55bb7c32");

/// The initial version of the deposit event log.
pub const DEPOSIT_EVENT_VERSION_0: B256 = B256::ZERO;

/// Size of the fixed version 0 prefix: mint (32) + value (32) + gas (8) + creation flag (1).
const VERSION_0_PREFIX_LEN: usize = 32 + 32 + 8 + 1;

/// The class of a [`DepositError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DepositErrorKind {
    /// The log does not have the shape of a deposit event.
    #[display("malformed input")]
    MalformedInput,
    /// The log is a deposit event with an unknown payload version.
    #[display("unsupported version")]
    UnsupportedVersion,
}

/// A deposit log decoding error.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum DepositError {
    /// Unexpected number of deposit event log topics.
    #[error("Unexpected number of deposit event log topics: {0}")]
    UnexpectedTopicsLen(usize),
    /// Invalid deposit event selector.
    /// Expected: [B256] (deposit event selector), Actual: [B256] (event log topic).
    #[error("Invalid deposit event selector: {1}, expected {0}")]
    InvalidSelector(B256, B256),
    /// Incomplete opaqueData slice header (incomplete length).
    #[error("Incomplete opaqueData slice header (incomplete length): {0}")]
    IncompleteOpaqueData(usize),
    /// The log data is not aligned to 32 bytes.
    #[error("Unaligned log data, expected multiple of 32 bytes, got: {0}")]
    UnalignedData(usize),
    /// The opaque data offset word is not exactly 32.
    #[error("Invalid opaque data content offset: {0}")]
    InvalidOpaqueDataOffset(Bytes),
    /// The opaque data length word does not fit a u64.
    #[error("Invalid u64 opaque data content length: {0}")]
    InvalidOpaqueDataLength(Bytes),
    /// Opaque data length exceeds the deposit log event data length.
    /// Specified: [usize] (opaque data length), Actual: [usize] (data length).
    #[error("Specified opaque data length {0} exceeds the deposit log event data length {1}")]
    OpaqueDataOverflow(usize, usize),
    /// Opaque data is followed by more padding than needed.
    /// Specified: [usize] (data length), Actual: [usize] (opaque data length).
    #[error("Opaque data with padding exceeds the specified data length: {1} > {0}")]
    PaddedOpaqueDataOverflow(usize, usize),
    /// An unknown deposit version.
    #[error("Unsupported deposit version: {0}")]
    UnsupportedVersion(B256),
    /// Unexpected opaque data length.
    #[error("Unexpected opaque data length: {0}")]
    UnexpectedOpaqueDataLen(usize),
}

impl DepositError {
    /// Returns the [`DepositErrorKind`] of the error.
    pub const fn kind(&self) -> DepositErrorKind {
        match self {
            Self::UnsupportedVersion(_) => DepositErrorKind::UnsupportedVersion,
            _ => DepositErrorKind::MalformedInput,
        }
    }
}

/// Decodes a `TransactionDeposited` log into an [`L1MessageTx`].
///
/// The returned transaction carries a queue index of zero. Queue indices are assigned when the
/// message is appended to the L1 message queue.
///
/// The log data is the ABI encoding of a single `bytes opaqueData` argument:
///
/// ```text
/// ------------------------------------------------------------
/// | offset | content                                         |
/// ------------------------------------------------------------
/// | 0      | u256 offset of the opaque data, always 32       |
/// | 32     | u256 length of the opaque data                  |
/// | 64     | opaque data, right padded to 32 bytes           |
/// ------------------------------------------------------------
/// ```
pub fn decode_deposit_log(log: &Log) -> Result<L1MessageTx, DepositError> {
    let topics = log.data.topics();
    if topics.len() != 4 {
        return Err(DepositError::UnexpectedTopicsLen(topics.len()));
    }
    if topics[0] != DEPOSIT_EVENT_ABI_HASH {
        return Err(DepositError::InvalidSelector(DEPOSIT_EVENT_ABI_HASH, topics[0]));
    }

    let data = log.data.data.as_ref();
    if data.len() < 64 {
        return Err(DepositError::IncompleteOpaqueData(data.len()));
    }
    if data.len() % 32 != 0 {
        return Err(DepositError::UnalignedData(data.len()));
    }

    let from = Address::from_word(topics[1]);
    let to = Address::from_word(topics[2]);
    let version = topics[3];

    let offset_word = &data[0..32];
    if U256::from_be_slice(offset_word) != U256::from(32) {
        return Err(DepositError::InvalidOpaqueDataOffset(Bytes::copy_from_slice(offset_word)));
    }

    let length_word = &data[32..64];
    if length_word[..24].iter().any(|b| *b != 0) {
        return Err(DepositError::InvalidOpaqueDataLength(Bytes::copy_from_slice(length_word)));
    }
    let opaque_len = u64::from_be_bytes(length_word[24..32].try_into().map_err(|_| {
        DepositError::InvalidOpaqueDataLength(Bytes::copy_from_slice(length_word))
    })?);

    let available = data.len() - 64;
    let opaque_len = usize::try_from(opaque_len)
        .ok()
        .filter(|len| *len <= available)
        .ok_or(DepositError::OpaqueDataOverflow(opaque_len as usize, available))?;
    let padded_len = opaque_len
        .checked_add(32)
        .ok_or(DepositError::OpaqueDataOverflow(opaque_len, available))?;
    if padded_len <= available {
        return Err(DepositError::PaddedOpaqueDataOverflow(available, opaque_len));
    }

    if version != DEPOSIT_EVENT_VERSION_0 {
        return Err(DepositError::UnsupportedVersion(version));
    }

    unmarshal_deposit_version0(from, to, &data[64..64 + opaque_len])
}

/// Unmarshals the version 0 opaque data of a deposit.
///
/// Layout: `uint256 mint . uint256 value . uint64 gas . uint8 isCreation . bytes data`.
pub(crate) fn unmarshal_deposit_version0(
    from: Address,
    to: Address,
    data: &[u8],
) -> Result<L1MessageTx, DepositError> {
    if data.len() < VERSION_0_PREFIX_LEN {
        return Err(DepositError::UnexpectedOpaqueDataLen(data.len()));
    }

    let mint = U256::from_be_slice(&data[0..32]);
    let value = U256::from_be_slice(&data[32..64]);

    // The gas limit is packed as exactly 8 bytes, so it always fits a u64.
    let mut raw_gas = [0u8; 8];
    raw_gas.copy_from_slice(&data[64..72]);
    let gas_limit = u64::from_be_bytes(raw_gas);

    // A zero flag keeps the recipient from the `to` topic, anything else is a contract creation.
    let to = (data[72] == 0).then_some(to);

    Ok(L1MessageTx {
        queue_index: 0,
        gas_limit,
        to,
        value,
        mint,
        input: Bytes::copy_from_slice(&data[VERSION_0_PREFIX_LEN..]),
        sender: from,
    })
}
