//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Entity not reported by the node
    #[error("Not found: {0}")]
    NotFound(String),

    /// SDK error
    #[error("SDK error: {0}")]
    Sdk(#[from] lumen_sdk::SdkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_error_wraps() {
        let err: CliError = lumen_sdk::SdkError::Transport("refused".to_string()).into();
        assert!(matches!(err, CliError::Sdk(_)));
        assert_eq!(err.to_string(), "SDK error: Transport error: refused");
    }

    #[test]
    fn test_json_error_wraps() {
        let err: CliError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, CliError::Json(_)));
    }
}
