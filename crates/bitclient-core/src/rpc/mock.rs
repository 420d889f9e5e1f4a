use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RpcError;

use super::protocol::{RemoteError, Request, Response, REQUEST_ID};
use super::RpcTransport;

#[derive(Clone)]
enum MockReply {
    Result(serde_json::Value),
    Remote(RemoteError),
    Status(u16, String),
}

/// A mock JSON-RPC transport for testing. Replies with canned results keyed
/// by method name and records every request it receives.
pub struct MockRpc {
    replies: HashMap<String, MockReply>,
    calls: Mutex<Vec<Request>>,
}

impl MockRpc {
    pub fn builder() -> MockRpcBuilder {
        MockRpcBuilder {
            replies: HashMap::new(),
        }
    }

    /// Requests received so far, in arrival order.
    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    pub fn methods_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.method).collect()
    }

    /// Params of the only request received; panics otherwise.
    pub fn single_call_params(&self) -> Vec<serde_json::Value> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls[0].params.clone()
    }
}

pub struct MockRpcBuilder {
    replies: HashMap<String, MockReply>,
}

impl MockRpcBuilder {
    pub fn with_result(mut self, method: &str, result: serde_json::Value) -> Self {
        self.replies
            .insert(method.to_owned(), MockReply::Result(result));
        self
    }

    pub fn with_daemon_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies.insert(
            method.to_owned(),
            MockReply::Remote(RemoteError::Daemon {
                code,
                message: message.to_owned(),
            }),
        );
        self
    }

    pub fn with_status(mut self, method: &str, status: u16, body: &str) -> Self {
        self.replies
            .insert(method.to_owned(), MockReply::Status(status, body.to_owned()));
        self
    }

    pub fn build(self) -> MockRpc {
        MockRpc {
            replies: self.replies,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockRpc {
    async fn call(&self, request: Request) -> Result<Response, RpcError> {
        let reply = self.replies.get(&request.method).cloned();
        self.calls.lock().expect("mock lock poisoned").push(request);

        match reply {
            Some(MockReply::Result(value)) => Ok(Response {
                id: Some(REQUEST_ID.to_owned()),
                error: None,
                result: Some(
                    serde_json::value::to_raw_value(&value).expect("mock result must serialize"),
                ),
            }),
            Some(MockReply::Remote(err)) => Err(RpcError::Remote(err)),
            Some(MockReply::Status(status, body)) => Err(RpcError::Status { status, body }),
            None => Err(RpcError::Remote(RemoteError::Daemon {
                code: -32601,
                message: "Method not found".to_owned(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_method_reports_method_not_found() {
        let rpc = MockRpc::builder().build();
        let err = rpc
            .call(Request::new("getfoo", Vec::new()))
            .await
            .expect_err("unknown method must fail");
        assert!(matches!(
            err,
            RpcError::Remote(RemoteError::Daemon { code: -32601, .. })
        ));
        assert_eq!(rpc.methods_called(), vec!["getfoo".to_owned()]);
    }

    #[tokio::test]
    async fn canned_result_is_returned_raw() {
        let rpc = MockRpc::builder()
            .with_result("getbestblockhash", json!("00ab"))
            .build();
        let response = rpc
            .call(Request::new("getbestblockhash", Vec::new()))
            .await
            .expect("canned result");
        assert_eq!(response.raw(), r#""00ab""#);
    }
}
