use std::time::Duration;

use crate::rpc::normalize::NormalizedError;
use crate::rpc::protocol::RemoteError;

/// Error returned by every public operation of the crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A daemon error reduced to a readable message.
    #[error("{0}")]
    Remote(NormalizedError),
}

/// Caller input that was rejected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported authentication type `{0}`; expected `api-key` or `user:password`")]
    UnsupportedAuthType(String),

    #[error("authentication label cannot be empty")]
    EmptyAuthLabel,

    #[error("credentials must be in format 'username:password'")]
    MalformedCredentials,

    #[error("username and password cannot be empty")]
    EmptyCredentialPart,

    #[error("cannot use rpc cookie file {path}: {reason}")]
    CookieFile { path: String, reason: String },

    #[error("invalid endpoint `{url}`: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("block must be a valid block hash or a numeric height, got `{0}`")]
    InvalidIdentifier(String),

    #[error("invalid verbosity level ({0}), valid range is 0-3")]
    InvalidVerbosity(i64),

    #[error("ban's subnet must be provided")]
    EmptySubnet,
}

/// Failures of a single JSON-RPC exchange, one variant per stage.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("failed to serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to set up http request: {0}")]
    Setup(String),

    #[error("failed to authenticate http request: {0}")]
    Auth(#[from] ValidationError),

    #[error("failed to send http request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read http response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("server responded with status code {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// The envelope carried a non-null `error`.
    #[error("{0}")]
    Remote(RemoteError),
}
