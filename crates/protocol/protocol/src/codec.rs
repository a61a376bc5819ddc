//! Primitives of the fixed-layout binary encoding shared by sequencers and validators.
//!
//! Every encoded object starts with a [`WIRE_VERSION`] byte. Integers are big endian, hashes,
//! addresses and 256-bit words are written at their natural width, and variable length byte
//! strings and lists are prefixed with a `u32` length.

use alloy_primitives::{Address, B256, Bytes, U256};
use bytes::BufMut;

/// The current version of the block wire encoding.
pub const WIRE_VERSION: u8 = 0;

/// An error decoding a wire encoded object.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The input is empty.
    #[error("empty input")]
    Empty,
    /// The encoding version is not known.
    #[error("unsupported wire version: {0}")]
    UnsupportedVersion(u8),
    /// The input ended before the object was fully decoded.
    #[error("unexpected end of input: needed {needed} more bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Number of bytes requested.
        needed: usize,
        /// Number of bytes left in the input.
        remaining: usize,
    },
    /// A presence flag holds a value other than 0 or 1.
    #[error("invalid presence flag: {0}")]
    InvalidFlag(u8),
    /// Bytes were left over after the object was decoded.
    #[error("{0} trailing bytes after decoded object")]
    TrailingBytes(usize),
    /// A length does not fit its `u32` prefix.
    #[error("length {0} does not fit a u32 prefix")]
    LengthOverflow(usize),
}

/// Writer half of the wire encoding.
#[derive(Debug, Default)]
pub(crate) struct WireWriter {
    buf: Vec<u8>,
    /// The first length that did not fit its prefix.
    overflow: Option<usize>,
}

impl WireWriter {
    /// Starts a new object, writing the version byte.
    pub(crate) fn new() -> Self {
        let mut writer = Self::default();
        writer.buf.put_u8(WIRE_VERSION);
        writer
    }

    pub(crate) fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.put_u8(value);
        self
    }

    pub(crate) fn u64(&mut self, value: u64) -> &mut Self {
        self.buf.put_u64(value);
        self
    }

    pub(crate) fn b256(&mut self, value: &B256) -> &mut Self {
        self.buf.put_slice(value.as_slice());
        self
    }

    pub(crate) fn address(&mut self, value: &Address) -> &mut Self {
        self.buf.put_slice(value.as_slice());
        self
    }

    pub(crate) fn u256(&mut self, value: &U256) -> &mut Self {
        self.buf.put_slice(&value.to_be_bytes::<32>());
        self
    }

    /// Writes a `u32` length. A length beyond `u32::MAX` fails the object in [`Self::finish`].
    pub(crate) fn len_prefix(&mut self, len: usize) -> &mut Self {
        match u32::try_from(len) {
            Ok(len) => self.buf.put_u32(len),
            Err(_) => {
                self.overflow.get_or_insert(len);
            }
        }
        self
    }

    pub(crate) fn bytes(&mut self, value: &[u8]) -> &mut Self {
        self.len_prefix(value.len());
        self.buf.put_slice(value);
        self
    }

    pub(crate) fn optional<T>(
        &mut self,
        value: Option<&T>,
        f: impl for<'w> FnOnce(&'w mut Self, &T) -> &'w mut Self,
    ) -> &mut Self {
        match value {
            Some(inner) => {
                self.u8(1);
                f(self, inner)
            }
            None => self.u8(0),
        }
    }

    pub(crate) fn finish(self) -> Result<Bytes, WireError> {
        match self.overflow {
            Some(len) => Err(WireError::LengthOverflow(len)),
            None => Ok(self.buf.into()),
        }
    }
}

/// Reader half of the wire encoding.
#[derive(Debug)]
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    /// Opens an encoded object, checking its version byte.
    pub(crate) fn new(buf: &'a [u8]) -> Result<Self, WireError> {
        let (version, rest) = buf.split_first().ok_or(WireError::Empty)?;
        if *version != WIRE_VERSION {
            return Err(WireError::UnsupportedVersion(*version));
        }
        Ok(Self { buf: rest })
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.buf.len() < n {
            return Err(WireError::UnexpectedEof { needed: n, remaining: self.buf.len() });
        }
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u32(&mut self) -> Result<u32, WireError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    pub(crate) fn u64(&mut self) -> Result<u64, WireError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    pub(crate) fn b256(&mut self) -> Result<B256, WireError> {
        Ok(B256::from(self.array::<32>()?))
    }

    pub(crate) fn address(&mut self) -> Result<Address, WireError> {
        Ok(Address::from(self.array::<20>()?))
    }

    pub(crate) fn u256(&mut self) -> Result<U256, WireError> {
        Ok(U256::from_be_bytes(self.array::<32>()?))
    }

    pub(crate) fn len_prefix(&mut self) -> Result<usize, WireError> {
        Ok(self.u32()? as usize)
    }

    pub(crate) fn bytes(&mut self) -> Result<Bytes, WireError> {
        let len = self.len_prefix()?;
        Ok(Bytes::copy_from_slice(self.take(len)?))
    }

    pub(crate) fn optional<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, WireError>,
    ) -> Result<Option<T>, WireError> {
        match self.u8()? {
            0 => Ok(None),
            1 => f(self).map(Some),
            flag => Err(WireError::InvalidFlag(flag)),
        }
    }

    /// Ensures the whole input was consumed.
    pub(crate) const fn finish(self) -> Result<(), WireError> {
        if !self.buf.is_empty() {
            return Err(WireError::TrailingBytes(self.buf.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_rejects_unknown_version() {
        assert_eq!(WireReader::new(&[7, 0, 0]).unwrap_err(), WireError::UnsupportedVersion(7));
        assert_eq!(WireReader::new(&[]).unwrap_err(), WireError::Empty);
    }

    #[test]
    fn test_reader_eof() {
        let mut reader = WireReader::new(&[WIRE_VERSION, 0, 0, 0]).unwrap();
        assert_eq!(reader.u64().unwrap_err(), WireError::UnexpectedEof { needed: 8, remaining: 3 });
    }

    #[test]
    fn test_reader_invalid_flag() {
        let mut reader = WireReader::new(&[WIRE_VERSION, 2]).unwrap();
        assert_eq!(reader.optional(|r| r.u8()).unwrap_err(), WireError::InvalidFlag(2));
    }

    #[test]
    fn test_reader_trailing_bytes() {
        let mut writer = WireWriter::new();
        writer.u64(42).u8(1);
        let encoded = writer.finish().unwrap();

        let mut reader = WireReader::new(&encoded).unwrap();
        assert_eq!(reader.u64().unwrap(), 42);
        assert_eq!(reader.finish().unwrap_err(), WireError::TrailingBytes(1));
    }

    #[test]
    fn test_bytes_are_length_prefixed() {
        let mut writer = WireWriter::new();
        writer.bytes(&[0xaa, 0xbb]);
        let encoded = writer.finish().unwrap();
        assert_eq!(encoded.as_ref(), &[WIRE_VERSION, 0, 0, 0, 2, 0xaa, 0xbb]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_length_fails_encoding() {
        let too_long = u32::MAX as usize + 1;
        let mut writer = WireWriter::new();
        writer.len_prefix(too_long).u64(7).len_prefix(too_long + 1);
        assert_eq!(writer.finish().unwrap_err(), WireError::LengthOverflow(too_long));

        let mut writer = WireWriter::new();
        writer.len_prefix(u32::MAX as usize);
        assert_eq!(writer.finish().unwrap().as_ref(), &[WIRE_VERSION, 0xff, 0xff, 0xff, 0xff]);
    }
}
