//! One-shot RPC client for the CAD host.
//!
//! Every call opens its own TCP connection, writes one request document,
//! reads until the host closes the socket, and decodes what arrived. The
//! connection is the correlation: nothing is pooled or multiplexed.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{BridgeError, Result};
use crate::id::generate_request_id;

use super::codec::{decode_response, encode_request};
use super::messages::RemoteRequest;

/// Default CAD host address.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default CAD host port.
pub const DEFAULT_PORT: u16 = 8765;

/// Anything that can carry one remote call to the CAD host.
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    /// Invoke `method` with optional params and return the host's `result`.
    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value>;
}

/// Configuration for the RPC client.
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// CAD host address.
    pub host: String,
    /// CAD host port.
    pub port: u16,
    /// Upper bound on one connect-send-receive cycle. `None` waits forever.
    pub request_timeout_ms: Option<u64>,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout_ms: None,
        }
    }
}

impl RpcClientConfig {
    /// Create config for a specific host and port.
    pub fn with_address(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// `host:port` form for logging and error messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// RPC client that talks to the CAD host over transient TCP connections.
#[derive(Debug, Clone)]
pub struct RpcClient {
    config: RpcClientConfig,
}

impl RpcClient {
    /// Create a new RPC client with config.
    pub fn new(config: RpcClientConfig) -> Self {
        Self { config }
    }

    /// Create client for a host and port.
    pub fn with_address(host: impl Into<String>, port: u16) -> Self {
        Self::new(RpcClientConfig::with_address(host, port))
    }

    /// Get the client config.
    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    /// Connect, send the request, and collect every byte until the host closes.
    async fn exchange(&self, request: &RemoteRequest) -> Result<Vec<u8>> {
        let payload = encode_request(request)?;
        let address = self.config.address();

        let mut stream = TcpStream::connect((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|e| BridgeError::Transport(format!("Failed to connect to {}: {}", address, e)))?;

        stream
            .write_all(&payload)
            .await
            .map_err(|e| BridgeError::Transport(format!("Failed to write: {}", e)))?;
        stream
            .flush()
            .await
            .map_err(|e| BridgeError::Transport(format!("Failed to flush: {}", e)))?;

        let mut buffer = Vec::new();
        stream
            .read_to_end(&mut buffer)
            .await
            .map_err(|e| BridgeError::Transport(format!("Failed to read response: {}", e)))?;

        Ok(buffer)
    }
}

#[async_trait]
impl RemoteChannel for RpcClient {
    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let request = RemoteRequest::new(generate_request_id(), method, params);
        debug!("Calling {} on {} (id {})", method, self.config.address(), request.id);

        let buffer = match self.config.request_timeout_ms {
            Some(timeout_ms) => {
                tokio::time::timeout(Duration::from_millis(timeout_ms), self.exchange(&request))
                    .await
                    .map_err(|_| BridgeError::Transport(format!("Request timed out after {}ms", timeout_ms)))??
            }
            None => self.exchange(&request).await?,
        };
        debug!("Received {} bytes for {} (id {})", buffer.len(), method, request.id);

        let response = decode_response(&buffer)?;
        if let Some(echoed) = response.id.as_deref()
            && echoed != request.id
        {
            warn!("Host echoed id {} for request {} ({})", echoed, request.id, method);
        }

        response.into_result()
    }
}
