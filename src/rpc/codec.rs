//! Codec for the host's unframed JSON documents.
//!
//! A request is one JSON document written right after connect. A response is
//! whatever the host wrote before closing the socket; there is no length prefix
//! and no delimiter, so decoding only happens once the buffer is complete.

use crate::error::{BridgeError, Result};

use super::messages::{RemoteRequest, RemoteResponse};

/// Encode a request as a single compact JSON document.
pub fn encode_request(request: &RemoteRequest) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(Into::into)
}

/// Parse the accumulated response buffer into a response document.
///
/// Surrounding whitespace is ignored (the host appends a newline).
pub fn decode_response(data: &[u8]) -> Result<RemoteResponse> {
    serde_json::from_slice(data.trim_ascii()).map_err(|e| BridgeError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn decode_result(data: &[u8]) -> Result<Value> {
        decode_response(data).and_then(RemoteResponse::into_result)
    }

    #[test]
    fn test_encode_request_is_single_document() {
        let req = RemoteRequest::new("1-a", "draw_circle", Some(json!({"radius": 10})));
        let bytes = encode_request(&req).unwrap();
        assert!(!bytes.contains(&b'\n'));
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["method"], "draw_circle");
        assert_eq!(value["params"]["radius"], 10);
    }

    #[test]
    fn test_decode_result_success() {
        let raw = b"{\"ok\":true,\"id\":\"1-a\",\"result\":{\"token\":\"f1\",\"edgeCount\":2}}\n";
        assert_eq!(decode_result(raw).unwrap(), json!({"token": "f1", "edgeCount": 2}));
    }

    #[test]
    fn test_decode_result_remote_failure() {
        let raw = br#"{"ok":false,"error":"No active Fusion design open"}"#;
        let err = decode_result(raw).unwrap_err();
        assert_eq!(err.to_string(), "No active Fusion design open");
    }

    #[test]
    fn test_decode_empty_buffer_is_decode_error() {
        let err = decode_result(b"").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[test]
    fn test_decode_truncated_document_is_decode_error() {
        let err = decode_result(br#"{"ok":true,"result":{"tok"#).unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[test]
    fn test_decode_non_object_is_decode_error() {
        let err = decode_result(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[test]
    fn test_decode_trailing_garbage_is_decode_error() {
        let err = decode_result(b"{\"ok\":true}\n{\"ok\":true}").unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }
}
