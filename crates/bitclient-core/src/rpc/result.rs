//! Shaping of a successful envelope's `result`.
//!
//! Every RPC method has a fixed result shape, so the call site picks the
//! decoder: [`Response::as_object`], [`Response::as_array`] or
//! [`Response::decode`] for typed scalars. There is no trial-and-error
//! fallback between shapes.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CoreError, RpcError};
use crate::types::{Json, JsonArray};

use super::normalize::normalize;
use super::protocol::Response;

impl Response {
    /// The untouched `result` text; `null` when the daemon sent none.
    pub fn raw(&self) -> &str {
        self.result.as_deref().map_or("null", |raw| raw.get())
    }

    pub fn as_object(&self) -> Result<Json, RpcError> {
        self.decode()
    }

    pub fn as_array(&self) -> Result<JsonArray, RpcError> {
        self.decode()
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RpcError> {
        serde_json::from_str(self.raw()).map_err(|e| {
            debug!(error = %e, "failed to process result");
            RpcError::Deserialization(format!("failed to process result: {e}"))
        })
    }
}

/// Decode a transport outcome as a single object, normalizing any error.
pub fn object_result(
    outcome: Result<Response, RpcError>,
    warning: Option<&str>,
) -> Result<Json, CoreError> {
    value_result(outcome, warning)
}

/// Decode a transport outcome as a list of objects, normalizing any error.
pub fn array_result(
    outcome: Result<Response, RpcError>,
    warning: Option<&str>,
) -> Result<JsonArray, CoreError> {
    value_result(outcome, warning)
}

/// Decode a transport outcome into `T`, normalizing any error.
pub fn value_result<T: DeserializeOwned>(
    outcome: Result<Response, RpcError>,
    warning: Option<&str>,
) -> Result<T, CoreError> {
    match outcome {
        Ok(response) => Ok(response.decode()?),
        Err(err) => Err(normalize(err.into(), warning)),
    }
}

/// For methods whose result is `null`: keep only success or the normalized
/// error.
pub fn unit_result(
    outcome: Result<Response, RpcError>,
    warning: Option<&str>,
) -> Result<(), CoreError> {
    match outcome {
        Ok(_) => Ok(()),
        Err(err) => Err(normalize(err.into(), warning)),
    }
}
