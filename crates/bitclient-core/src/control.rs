//! Node control: memory, RPC server state, help text and log categories.

use serde_json::json;

use crate::error::CoreError;
use crate::rpc::{object_result, value_result, Request, RpcTransport};
use crate::types::Json;

pub const METHOD_GET_MEMORY_INFO: &str = "getmemoryinfo";
pub const METHOD_GET_RPC_INFO: &str = "getrpcinfo";
pub const METHOD_HELP: &str = "help";
pub const METHOD_LOGGING: &str = "logging";

/// Log categories to toggle with `logging`. Categories in `exclude` win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Locked-memory pool usage (`getmemoryinfo "stats"`).
pub async fn get_memory_info(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_MEMORY_INFO, vec![json!("stats")]))
        .await;
    object_result(outcome, None)
}

/// glibc malloc statistics as the XML string the node produces.
pub async fn get_malloc_info(rpc: &dyn RpcTransport) -> Result<String, CoreError> {
    let outcome = rpc
        .call(Request::new(
            METHOD_GET_MEMORY_INFO,
            vec![json!("mallocinfo")],
        ))
        .await;
    value_result(outcome, None)
}

pub async fn get_rpc_info(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_RPC_INFO, Vec::new()))
        .await;
    object_result(outcome, None)
}

/// Help text for `command`, or the full command list.
pub async fn help(rpc: &dyn RpcTransport, command: Option<&str>) -> Result<String, CoreError> {
    let params = command.map(|c| vec![json!(c)]).unwrap_or_default();
    let outcome = rpc.call(Request::new(METHOD_HELP, params)).await;
    value_result(outcome, None)
}

/// Current state of every logging category.
pub async fn get_logging(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_LOGGING, Vec::new()))
        .await;
    object_result(outcome, None)
}

/// Apply `config` and return the resulting category states.
///
/// Both lists are sent positionally, so an exclude-only change goes out as
/// `[[], exclude]`.
pub async fn set_logging(
    rpc: &dyn RpcTransport,
    config: &LoggingConfig,
) -> Result<Json, CoreError> {
    let params = vec![json!(config.include), json!(config.exclude)];
    let outcome = rpc.call(Request::new(METHOD_LOGGING, params)).await;
    object_result(outcome, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::mock::MockRpc;

    #[tokio::test]
    async fn memory_info_modes() {
        let rpc = MockRpc::builder()
            .with_result(METHOD_GET_MEMORY_INFO, json!({"locked": {"used": 1}}))
            .build();
        let stats = get_memory_info(&rpc).await.expect("stats");
        assert!(stats.contains_key("locked"));
        assert_eq!(rpc.single_call_params(), vec![json!("stats")]);

        let rpc = MockRpc::builder()
            .with_result(METHOD_GET_MEMORY_INFO, json!("<malloc version=\"1\"/>"))
            .build();
        let xml = get_malloc_info(&rpc).await.expect("mallocinfo");
        assert!(xml.starts_with("<malloc"));
        assert_eq!(rpc.single_call_params(), vec![json!("mallocinfo")]);
    }

    #[tokio::test]
    async fn help_with_and_without_command() {
        let rpc = MockRpc::builder()
            .with_result(METHOD_HELP, json!("getblockcount\n\nReturns the height"))
            .build();
        help(&rpc, None).await.expect("help");
        let text = help(&rpc, Some("getblockcount")).await.expect("help");
        assert!(text.starts_with("getblockcount"));

        let calls = rpc.calls();
        assert!(calls[0].params.is_empty());
        assert_eq!(calls[1].params, vec![json!("getblockcount")]);
    }

    #[tokio::test]
    async fn set_logging_sends_both_lists() {
        let rpc = MockRpc::builder()
            .with_result(METHOD_LOGGING, json!({"net": false, "rpc": true}))
            .build();
        let config = LoggingConfig {
            include: Vec::new(),
            exclude: vec!["net".to_owned()],
        };
        let state = set_logging(&rpc, &config).await.expect("logging");
        assert_eq!(state.get("net"), Some(&json!(false)));
        assert_eq!(rpc.single_call_params(), vec![json!([]), json!(["net"])]);
    }

    #[tokio::test]
    async fn get_logging_and_rpc_info_take_no_params() {
        let rpc = MockRpc::builder()
            .with_result(METHOD_LOGGING, json!({"net": true}))
            .with_result(METHOD_GET_RPC_INFO, json!({"active_commands": []}))
            .build();
        get_logging(&rpc).await.expect("logging");
        get_rpc_info(&rpc).await.expect("rpcinfo");
        assert!(rpc.calls().iter().all(|c| c.params.is_empty()));
        assert_eq!(
            rpc.methods_called(),
            vec![METHOD_LOGGING.to_owned(), METHOD_GET_RPC_INFO.to_owned()]
        );
    }

    #[tokio::test]
    async fn unknown_command_error_is_lowercased() {
        let rpc = MockRpc::builder()
            .with_daemon_error(METHOD_HELP, -1, "help: unknown command: foo")
            .build();
        let err = help(&rpc, Some("foo")).await.expect_err("must fail");
        assert_eq!(err.to_string(), "help: unknown command: foo");
        assert!(matches!(err, CoreError::Remote(ref n) if n.code == Some(-1)));
    }
}
