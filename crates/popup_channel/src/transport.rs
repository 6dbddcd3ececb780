use serde_json::Value;
use thiserror::Error;

/// Where a request is addressed. The coordinator and the key-value store
/// live in the host extension runtime; the companion is a separate
/// extension that may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Coordinator,
    Companion,
    Storage,
}

/// Rejection shape for every call: either the host messaging layer failed,
/// or the reply envelope carried a non-OK status. Both end up as a
/// human-readable string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("{0}")]
    Protocol(String),
}

/// The host messaging primitive. Implementations own failure signaling
/// (including the absent-companion case); this crate adds no timeouts.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, request: Value) -> Result<Value, ChannelError>;
}
