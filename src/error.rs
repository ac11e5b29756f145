//! Error types for cadbridge
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while bridging a tool call to the CAD host
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Connection could not be established or failed mid-flight
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response bytes did not parse as the expected document
    #[error("Decode error: {0}")]
    Decode(String),

    /// The host answered with `ok: false`; message is passed through verbatim
    #[error("{0}")]
    Remote(String),

    /// Tool arguments rejected before reaching the channel
    #[error("Validation error: {0}")]
    Validation(String),

    /// No catalog entry for the requested tool
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cadbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let err = BridgeError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_decode_error() {
        let err = BridgeError::Decode("EOF while parsing a value".to_string());
        assert_eq!(err.to_string(), "Decode error: EOF while parsing a value");
    }

    #[test]
    fn test_remote_error_is_verbatim() {
        let err = BridgeError::Remote("No active Fusion design open".to_string());
        assert_eq!(err.to_string(), "No active Fusion design open");
    }

    #[test]
    fn test_validation_error() {
        let err = BridgeError::Validation("missing required field: radius".to_string());
        assert_eq!(err.to_string(), "Validation error: missing required field: radius");
    }

    #[test]
    fn test_unknown_tool_error() {
        let err = BridgeError::UnknownTool("draw-hexagon".to_string());
        assert_eq!(err.to_string(), "Unknown tool: draw-hexagon");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: BridgeError = io_err.into();
        assert!(matches!(err, BridgeError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: BridgeError = json_err.into();
        assert!(matches!(err, BridgeError::Json(_)));
    }
}
