//! Bitcoin Core JSON-RPC layer.
//!
//! Defines the [`RpcTransport`] trait and provides an HTTP implementation
//! ([`HttpRpcClient`]), the envelope codec, credential schemes, result
//! decoding and error normalization, plus a test mock (`mock::MockRpc`).

mod auth;
mod cancel;
mod client;
mod connection;
#[cfg(test)]
pub mod mock;
pub mod normalize;
pub mod protocol;
pub mod result;

pub use auth::{AuthType, Authentication};
pub use cancel::Cancellable;
pub use client::{ClientConfig, HttpRpcClient, DEFAULT_TIMEOUT};
pub use normalize::{normalize, NormalizedError};
pub use protocol::{RemoteError, Request, Response};
pub use result::{array_result, object_result, unit_result, value_result};

use async_trait::async_trait;

use crate::error::RpcError;

/// One JSON-RPC exchange against a daemon.
///
/// Implementations perform exactly one request per call and return the
/// envelope untouched, except that a non-null `error` becomes
/// [`RpcError::Remote`]. Normalizing that error is left to the caller.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, request: Request) -> Result<Response, RpcError>;
}
