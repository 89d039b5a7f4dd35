//! Fixed-size 32-byte primitives (ids, addresses, asset colors)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Primitive parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        got: usize,
    },
}

macro_rules! bytes32_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Size in bytes
            pub const LEN: usize = 32;

            /// All-zero value
            pub const ZERO: $name = $name([0u8; 32]);

            /// Create from bytes
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }

            /// Create from slice
            pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
                if slice.len() != Self::LEN {
                    return Err(PrimitiveError::InvalidLength {
                        expected: Self::LEN,
                        got: slice.len(),
                    });
                }
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(slice);
                Ok($name(bytes))
            }

            /// Parse from hex string (with or without 0x prefix)
            pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes =
                    hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            /// Get as bytes
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Check if zero
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Convert to hex string with 0x prefix
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = PrimitiveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }
        }

        impl From<$name> for [u8; 32] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

bytes32_type!(
    /// Generic 32-byte value: transaction, block and coin ids, state roots
    Bytes32
);

bytes32_type!(
    /// Owner of a coin (hash of a public key or predicate)
    Address
);

bytes32_type!(
    /// Asset tag carried by every coin amount
    Color
);

bytes32_type!(
    /// Identifier of a deployed contract
    ContractId
);

/// Salt mixed into a contract id at creation
pub type Salt = Bytes32;
