use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use tracing::{debug, trace};

use crate::error::{RpcError, ValidationError};

use super::auth::Authentication;
use super::connection::parse_endpoint;
use super::protocol::{Request, Response};
use super::RpcTransport;

/// Request deadline used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the HTTP client needs, supplied by the process entry point.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub auth: Authentication,
    /// Deadline for one full exchange (connect, send, read). Must be non-zero.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, auth: Authentication) -> Self {
        Self {
            url: url.into(),
            auth,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Bitcoin Core JSON-RPC client over HTTP(S).
///
/// Holds only immutable configuration and a reusable `reqwest::Client`, so a
/// single instance can be shared by reference across tasks.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: Url,
    auth: Authentication,
    timeout: Duration,
}

impl HttpRpcClient {
    /// Validate `config` and build the client. No request is sent.
    pub fn new(config: ClientConfig) -> Result<Self, ValidationError> {
        let url = parse_endpoint(&config.url)?;
        config.auth.validate()?;
        if config.timeout.is_zero() {
            return Err(ValidationError::ZeroTimeout);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .timeout(config.timeout)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ValidationError::InvalidEndpoint {
                url: config.url.clone(),
                reason: format!("cannot build http client: {e}"),
            })?;

        Ok(Self {
            client,
            url,
            auth: config.auth,
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn map_send_error(&self, err: reqwest::Error) -> RpcError {
        if err.is_timeout() {
            RpcError::Timeout(self.timeout)
        } else {
            RpcError::Send(err)
        }
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn call(&self, request: Request) -> Result<Response, RpcError> {
        debug!(
            rpc.id = %request.id,
            rpc.method = %request.method,
            rpc.params = request.params.len(),
            "rpc call"
        );
        let body = request.to_bytes()?;

        let builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        let http_request = self
            .auth
            .setup(builder)?
            .build()
            .map_err(|e| RpcError::Setup(e.to_string()))?;

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| self.map_send_error(e))?;
        let status = response.status();

        let payload = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RpcError::Timeout(self.timeout)
            } else {
                RpcError::Read(e)
            }
        })?;
        debug!(
            rpc.method = %request.method,
            %status,
            body_len = payload.len(),
            "rpc response"
        );
        trace!(
            rpc.method = %request.method,
            body = %String::from_utf8_lossy(&payload),
            "rpc response body"
        );

        if status != StatusCode::OK {
            return Err(RpcError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&payload).into_owned(),
            });
        }

        let decoded = Response::from_slice(&payload)?;
        if let Some(err) = &decoded.error {
            debug!(rpc.method = %request.method, error = %err, "rpc call error");
        }
        decoded.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::AuthType;

    fn api_key() -> Authentication {
        Authentication::new(AuthType::ApiKey, "abc123")
    }

    #[test]
    fn new_accepts_valid_config() {
        let client = HttpRpcClient::new(ClientConfig::new("http://127.0.0.1:8332", api_key()))
            .expect("client must build");
        assert_eq!(client.url().as_str(), "http://127.0.0.1:8332/");
    }

    #[test]
    fn new_rejects_invalid_auth() {
        let auth = Authentication::new(AuthType::Credentials, "no-colon");
        let err = HttpRpcClient::new(ClientConfig::new("http://127.0.0.1:8332", auth))
            .err()
            .expect("must reject");
        assert_eq!(err, ValidationError::MalformedCredentials);
    }

    #[test]
    fn new_rejects_non_http_endpoint() {
        let err = HttpRpcClient::new(ClientConfig::new("ftp://127.0.0.1", api_key()))
            .err()
            .expect("must reject");
        assert!(matches!(err, ValidationError::InvalidEndpoint { .. }));
    }

    #[test]
    fn new_rejects_zero_timeout() {
        let config =
            ClientConfig::new("http://127.0.0.1:8332", api_key()).with_timeout(Duration::ZERO);
        let err = HttpRpcClient::new(config).err().expect("must reject");
        assert_eq!(err, ValidationError::ZeroTimeout);
    }
}
