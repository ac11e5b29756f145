//! Remote Procedure Channel - one TCP connection per call to the CAD host
//!
//! This module provides:
//! - Wire message types for requests and responses
//! - Unframed JSON codec
//! - The `RemoteChannel` seam and its TCP client

pub mod client;
pub mod codec;
pub mod messages;

pub use client::{DEFAULT_HOST, DEFAULT_PORT, RemoteChannel, RpcClient, RpcClientConfig};
pub use codec::{decode_response, encode_request};
pub use messages::{Methods, RemoteRequest, RemoteResponse};
