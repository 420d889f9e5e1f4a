//! JSON-RPC envelope types and their wire encoding.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::RpcError;

/// Identifier stamped on every request issued by this process.
pub const REQUEST_ID: &str = "bitclient";

/// Protocol version carried in the `jsonrpc` field.
pub const JSONRPC_VERSION: &str = "2.0";

// ==============================================================================
// Request
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<serde_json::Value>,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            id: REQUEST_ID.to_owned(),
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.into(),
            params,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RpcError> {
        serde_json::to_vec(self).map_err(RpcError::Serialization)
    }
}

// ==============================================================================
// Response
// ==============================================================================

/// Decoded reply envelope. `result` stays raw JSON text until the caller picks
/// a shape for it (see `rpc::result`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub result: Option<Box<RawValue>>,
}

impl Response {
    pub fn from_slice(body: &[u8]) -> Result<Self, RpcError> {
        serde_json::from_slice(body).map_err(|e| {
            RpcError::Deserialization(format!(
                "{e}; body={}",
                String::from_utf8_lossy(body)
            ))
        })
    }

    /// Split the envelope into its payload or the daemon's error.
    pub fn into_outcome(self) -> Result<Self, RpcError> {
        match self.error {
            Some(err) => Err(RpcError::Remote(RemoteError::from_value(err))),
            None => Ok(self),
        }
    }
}

// ==============================================================================
// Remote Error
// ==============================================================================

/// Error value reported by the daemon, as received.
///
/// Bitcoin Core sends `{"code": <int>, "message": <string>}`. Anything else
/// (proxies, other node software, pre-stringified errors) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("{message} (code {code})")]
    Daemon { code: i64, message: String },

    #[error("{0}")]
    Opaque(String),
}

impl RemoteError {
    pub fn from_value(err: serde_json::Value) -> Self {
        #[derive(Deserialize)]
        struct JsonRpcError {
            code: i64,
            message: String,
        }

        if let Ok(parsed) = serde_json::from_value::<JsonRpcError>(err.clone()) {
            return Self::Daemon {
                code: parsed.code,
                message: parsed.message,
            };
        }

        match err {
            serde_json::Value::String(text) => Self::Opaque(text),
            other => Self::Opaque(other.to_string()),
        }
    }
}
