//! Wire message types for cadbridge ↔ CAD host communication.
//!
//! One request document per connection, one response document read until the
//! host closes the socket. Field names (id, method, params, ok, result, error)
//! follow the host's bridge; this is not JSON-RPC.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Request sent to the CAD host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRequest {
    /// Best-effort unique id; carried but not used for correlation.
    pub id: String,
    /// Remote method name (e.g., "draw_circle", "get_body_info").
    pub method: String,
    /// Method parameters; omitted from the document when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RemoteRequest {
    /// Create a new request with the given method and params.
    pub fn new(id: impl Into<String>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
        }
    }
}

/// Response sent back by the CAD host.
///
/// `ok` selects which of `result`/`error` is meaningful. A missing `ok` reads
/// as failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub ok: bool,
    /// Echo of the request id, when the host sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoteResponse {
    /// Create a success response.
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            id: None,
            result: Some(result),
            error: None,
        }
    }

    /// Create a failure response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            result: None,
            error: Some(message.into()),
        }
    }

    /// Check if this response indicates success.
    pub fn is_success(&self) -> bool {
        self.ok
    }

    /// Collapse the discriminated document into the call outcome.
    ///
    /// A success without `result` yields `null`. A failure without a message
    /// yields an empty Remote error.
    pub fn into_result(self) -> Result<Value> {
        if self.ok {
            Ok(self.result.unwrap_or(Value::Null))
        } else {
            Err(BridgeError::Remote(self.error.unwrap_or_default()))
        }
    }
}

/// Remote method names understood by the CAD host.
pub struct Methods;

impl Methods {
    pub const DRAW_RECTANGLE: &'static str = "draw_rectangle";
    pub const DRAW_CIRCLE: &'static str = "draw_circle";
    pub const EXTRUDE: &'static str = "extrude";
    pub const FILLET_EDGES: &'static str = "fillet_edges";
    pub const GET_BODY_INFO: &'static str = "get_body_info";
    pub const APPLY_MATERIAL: &'static str = "apply_material";
    pub const LIST_SKETCHES: &'static str = "list_sketches";
    pub const LIST_MATERIALS: &'static str = "list_materials";
}
