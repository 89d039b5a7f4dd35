//! Canonical binary encoding for transactions and receipts.
//!
//! The format is word oriented:
//! - integers are 8-byte big-endian words
//! - 32-byte values are written raw
//! - variable byte arrays are a length word followed by the bytes, zero-padded
//!   to the next word boundary
//! - lists are a count word followed by the items
//! - enum variants are prefixed by a discriminant word
//!
//! Every value is self-delimiting, so a payload can be decoded from offset 0
//! with no external length hint.

use bytes::Bytes;
use thiserror::Error;

use crate::primitives::{Address, Bytes32, Color, ContractId};
use crate::Word;

/// Size of a machine word in bytes
pub const WORD_SIZE: usize = 8;

/// Binary decoding error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Ran out of input
    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes required to continue
        needed: usize,
        /// Bytes remaining in the input
        available: usize,
    },

    /// Discriminant word does not name a known variant
    #[error("unknown {kind} discriminant: {value}")]
    UnknownDiscriminant {
        /// Type being decoded
        kind: &'static str,
        /// Offending discriminant
        value: Word,
    },

    /// A word does not fit the narrower field it encodes
    #[error("value {value} out of range for {field}")]
    ValueOutOfRange {
        /// Field being decoded
        field: &'static str,
        /// Offending value
        value: Word,
    },

    /// Padding after a byte array is not zero
    #[error("non-zero padding after byte array")]
    InvalidPadding,

    /// A length word does not fit in memory
    #[error("length {0} exceeds addressable size")]
    LengthOverflow(Word),

    /// Decoding started past the end of the input
    #[error("offset {offset} is beyond input of {len} bytes")]
    OffsetOutOfBounds {
        /// Requested start offset
        offset: usize,
        /// Input length
        len: usize,
    },
}

/// Types with a canonical binary encoding
pub trait Encode {
    /// Append the encoding of `self` to `buf`
    fn encode_to(&self, buf: &mut Vec<u8>);

    /// Encode `self` into a fresh buffer
    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_to(&mut buf);
        buf
    }
}

/// Types that can be read back from their canonical encoding
pub trait Decode: Sized {
    /// Read one value from the reader, advancing it
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError>;

    /// Decode one value starting at `offset`.
    ///
    /// Returns the value and the number of bytes consumed. Trailing bytes are
    /// left untouched.
    fn decode(bytes: &[u8], offset: usize) -> Result<(Self, usize), DecodeError> {
        if offset > bytes.len() {
            return Err(DecodeError::OffsetOutOfBounds {
                offset,
                len: bytes.len(),
            });
        }
        let mut reader = Reader::new(&bytes[offset..]);
        let value = Self::decode_from(&mut reader)?;
        Ok((value, reader.position()))
    }
}

// ============================================================================
// Writer helpers
// ============================================================================

/// Number of zero bytes needed to pad `len` to a word boundary
pub fn padding_len(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}

/// Write a word
pub fn put_word(buf: &mut Vec<u8>, value: Word) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Write a length-prefixed, word-padded byte array
pub fn put_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    put_word(buf, data.len() as Word);
    buf.extend_from_slice(data);
    buf.resize(buf.len() + padding_len(data.len()), 0);
}

/// Write a count-prefixed list
pub fn put_list<T: Encode>(buf: &mut Vec<u8>, items: &[T]) {
    put_word(buf, items.len() as Word);
    for item in items {
        item.encode_to(buf);
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Cursor over an encoded payload
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader at the start of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a word
    pub fn word(&mut self) -> Result<Word, DecodeError> {
        let raw = self.take(WORD_SIZE)?;
        let mut buf = [0u8; WORD_SIZE];
        buf.copy_from_slice(raw);
        Ok(Word::from_be_bytes(buf))
    }

    /// Read a word that must fit in a `u8`
    pub fn word_u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        let value = self.word()?;
        u8::try_from(value).map_err(|_| DecodeError::ValueOutOfRange { field, value })
    }

    /// Read a raw 32-byte value
    pub fn array32(&mut self) -> Result<[u8; 32], DecodeError> {
        let raw = self.take(32)?;
        let mut buf = [0u8; 32];
        buf.copy_from_slice(raw);
        Ok(buf)
    }

    /// Read a length-prefixed, word-padded byte array
    pub fn bytes(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.length()?;
        let data = Bytes::copy_from_slice(self.take(len)?);
        let padding = self.take(padding_len(len))?;
        if padding.iter().any(|&b| b != 0) {
            return Err(DecodeError::InvalidPadding);
        }
        Ok(data)
    }

    /// Read a count-prefixed list
    pub fn list<T: Decode>(&mut self) -> Result<Vec<T>, DecodeError> {
        let count = self.length()?;
        // Every item takes at least one word, so cap the preallocation.
        let mut items = Vec::with_capacity(count.min(self.remaining() / WORD_SIZE));
        for _ in 0..count {
            items.push(T::decode_from(self)?);
        }
        Ok(items)
    }

    fn length(&mut self) -> Result<usize, DecodeError> {
        let raw = self.word()?;
        usize::try_from(raw).map_err(|_| DecodeError::LengthOverflow(raw))
    }
}

// ============================================================================
// Primitive impls
// ============================================================================

impl Encode for Word {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        put_word(buf, *self);
    }
}

impl Decode for Word {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        reader.word()
    }
}

impl Encode for Bytes {
    fn encode_to(&self, buf: &mut Vec<u8>) {
        put_bytes(buf, self);
    }
}

impl Decode for Bytes {
    fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        reader.bytes()
    }
}

macro_rules! codec_bytes32 {
    ($($name:ident),*) => {
        $(
            impl Encode for $name {
                fn encode_to(&self, buf: &mut Vec<u8>) {
                    buf.extend_from_slice(self.as_bytes());
                }
            }

            impl Decode for $name {
                fn decode_from(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
                    Ok($name::from_bytes(reader.array32()?))
                }
            }
        )*
    };
}

codec_bytes32!(Bytes32, Address, Color, ContractId);
