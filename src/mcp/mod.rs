//! Front-End Adapter - MCP tool server over stdio
//!
//! Exposes the operation catalog as MCP tools and formats dispatcher results
//! (or failures) for the calling agent.

pub mod protocol;
pub mod server;

pub use protocol::{
    Content, ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpMethods, ToolCallParams, ToolCallResult,
};
pub use server::McpServer;
