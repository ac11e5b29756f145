//! cadbridge - MCP tools for a CAD automation host
//!
//! Bridges agent tool calls to a CAD host that listens on a private TCP port.
//! Each remote call is one connection: send a JSON request, read until the
//! host closes, decode. Fillet is the one composite tool, resolving a body's
//! edges before filleting them.

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod mcp;
pub mod rpc;

pub use error::{BridgeError, Result};
