use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::RpcError;

use super::protocol::{Request, Response};
use super::RpcTransport;

/// View over a transport whose calls abort when `token` is cancelled.
///
/// Dropping the in-flight exchange closes its HTTP request; nothing is
/// retried.
pub struct Cancellable<'a> {
    inner: &'a dyn RpcTransport,
    token: CancellationToken,
}

impl<'a> Cancellable<'a> {
    pub fn new(inner: &'a dyn RpcTransport, token: CancellationToken) -> Self {
        Self { inner, token }
    }
}

#[async_trait]
impl RpcTransport for Cancellable<'_> {
    async fn call(&self, request: Request) -> Result<Response, RpcError> {
        if self.token.is_cancelled() {
            return Err(RpcError::Cancelled);
        }

        let method = request.method.clone();
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!(rpc.method = %method, "rpc call cancelled");
                Err(RpcError::Cancelled)
            }
            result = self.inner.call(request) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockRpc;

    #[tokio::test]
    async fn passes_through_when_not_cancelled() {
        let mock = MockRpc::builder().with_result("getblockcount", json!(7)).build();
        let rpc = Cancellable::new(&mock, CancellationToken::new());

        let response = rpc
            .call(Request::new("getblockcount", Vec::new()))
            .await
            .expect("call must succeed");
        assert_eq!(response.decode::<u64>().expect("u64"), 7);
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits_before_send() {
        let mock = MockRpc::builder().with_result("getblockcount", json!(7)).build();
        let token = CancellationToken::new();
        token.cancel();
        let rpc = Cancellable::new(&mock, token);

        let err = rpc
            .call(Request::new("getblockcount", Vec::new()))
            .await
            .expect_err("cancelled call must fail");
        assert!(matches!(err, RpcError::Cancelled));
        assert!(mock.calls().is_empty(), "no request may reach the transport");
    }
}
