//! SDK error types

use lumen_types::{Bytes32, DecodeError, PrimitiveError};
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error, or a response missing data the operation requires
    #[error("Transport error: {0}")]
    Transport(String),

    /// Errors reported by the node in the GraphQL response
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response data does not match the operation's declared shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Binary payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// A just-submitted transaction is not reported by the node
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Bytes32),

    /// Transaction build error
    #[error("Transaction build error: {0}")]
    TxBuild(String),
}

impl SdkError {
    /// Check if the error came from the transport or the node's response envelope
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SdkError::Transport(_) | SdkError::GraphQl(_) | SdkError::Serialization(_)
        )
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<PrimitiveError> for SdkError {
    fn from(e: PrimitiveError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_joins_messages() {
        let err = SdkError::GraphQl(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "GraphQL error: first; second");
        assert!(err.is_transport());
    }

    #[test]
    fn test_decode_error_converts() {
        let err: SdkError = DecodeError::InvalidPadding.into();
        assert!(matches!(err, SdkError::Decode(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_not_found_mentions_id() {
        let err = SdkError::TransactionNotFound(Bytes32::ZERO);
        assert!(err.to_string().contains(&Bytes32::ZERO.to_hex()));
    }
}
