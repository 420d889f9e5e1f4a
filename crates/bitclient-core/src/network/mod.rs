//! Peer, ban-list and traffic operations.

mod types;

pub use types::{Ban, NodeRef};

use serde_json::json;
use tracing::debug;

use crate::error::CoreError;
use crate::rpc::{array_result, object_result, unit_result, value_result, Request, RpcTransport};
use crate::types::{Json, JsonArray};

use types::AddNodeCommand;

pub const METHOD_ADD_NODE: &str = "addnode";
pub const METHOD_CLEAR_BANNED: &str = "clearbanned";
pub const METHOD_DISCONNECT_NODE: &str = "disconnectnode";
pub const METHOD_GET_ADDED_NODE_INFO: &str = "getaddednodeinfo";
pub const METHOD_GET_CONNECTION_COUNT: &str = "getconnectioncount";
pub const METHOD_GET_NET_TOTALS: &str = "getnettotals";
pub const METHOD_GET_NETWORK_INFO: &str = "getnetworkinfo";
pub const METHOD_GET_NODE_ADDRESSES: &str = "getnodeaddresses";
pub const METHOD_GET_PEER_INFO: &str = "getpeerinfo";
pub const METHOD_LIST_BANNED: &str = "listbanned";
pub const METHOD_PING: &str = "ping";
pub const METHOD_SET_BAN: &str = "setban";
pub const METHOD_SET_NETWORK_ACTIVE: &str = "setnetworkactive";

// ==============================================================================
// Added Nodes
// ==============================================================================

async fn add_node_command(
    rpc: &dyn RpcTransport,
    node: &str,
    command: AddNodeCommand,
) -> Result<(), CoreError> {
    let outcome = rpc
        .call(Request::new(
            METHOD_ADD_NODE,
            vec![json!(node), json!(command.as_str())],
        ))
        .await;
    unit_result(outcome, None)
}

/// Try a single connection to `node` without adding it to the list.
pub async fn connect_to_node(rpc: &dyn RpcTransport, node: &str) -> Result<(), CoreError> {
    add_node_command(rpc, node, AddNodeCommand::OneTry).await
}

/// Add `node` to the addnode list, protecting it from DoS disconnection.
pub async fn add_node(rpc: &dyn RpcTransport, node: &str) -> Result<(), CoreError> {
    add_node_command(rpc, node, AddNodeCommand::Add).await
}

pub async fn remove_node(rpc: &dyn RpcTransport, node: &str) -> Result<(), CoreError> {
    add_node_command(rpc, node, AddNodeCommand::Remove).await
}

/// Info about added nodes; all of them when `node` is `None`.
pub async fn inspect_added_nodes(
    rpc: &dyn RpcTransport,
    node: Option<&str>,
) -> Result<JsonArray, CoreError> {
    let params = node.map(|n| vec![json!(n)]).unwrap_or_default();
    let outcome = rpc
        .call(Request::new(METHOD_GET_ADDED_NODE_INFO, params))
        .await;
    array_result(outcome, None)
}

// ==============================================================================
// Connections
// ==============================================================================

/// Bitcoin Core takes either an address or, with an empty address, a node id.
pub async fn disconnect_node(rpc: &dyn RpcTransport, node: &NodeRef) -> Result<(), CoreError> {
    let params = match node {
        NodeRef::Address(address) => vec![json!(address)],
        NodeRef::Id(id) => vec![json!(""), json!(id)],
    };
    let outcome = rpc
        .call(Request::new(METHOD_DISCONNECT_NODE, params))
        .await;
    unit_result(outcome, None)
}

pub async fn get_connection_count(rpc: &dyn RpcTransport) -> Result<u64, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_CONNECTION_COUNT, Vec::new()))
        .await;
    value_result(outcome, None)
}

pub async fn get_peers(rpc: &dyn RpcTransport) -> Result<JsonArray, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_PEER_INFO, Vec::new()))
        .await;
    array_result(outcome, None)
}

/// Known peer addresses; `count` of 0 asks for all of them.
pub async fn find_addresses(
    rpc: &dyn RpcTransport,
    count: Option<u64>,
) -> Result<JsonArray, CoreError> {
    let params = count.map(|c| vec![json!(c)]).unwrap_or_default();
    let outcome = rpc
        .call(Request::new(METHOD_GET_NODE_ADDRESSES, params))
        .await;
    array_result(outcome, None)
}

pub async fn set_network_active(rpc: &dyn RpcTransport, active: bool) -> Result<(), CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_SET_NETWORK_ACTIVE, vec![json!(active)]))
        .await;
    unit_result(outcome, None)
}

// ==============================================================================
// Info and Traffic
// ==============================================================================

/// Network traffic totals (`getnettotals`).
pub async fn inspect_traffic(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_NET_TOTALS, Vec::new()))
        .await;
    object_result(outcome, None)
}

pub async fn get_network_info(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_NETWORK_INFO, Vec::new()))
        .await;
    object_result(outcome, None)
}

pub async fn ping(rpc: &dyn RpcTransport) -> Result<(), CoreError> {
    let outcome = rpc.call(Request::new(METHOD_PING, Vec::new())).await;
    unit_result(outcome, None)
}

/// Whether the daemon answers `ping`.
pub async fn health(rpc: &dyn RpcTransport) -> bool {
    match ping(rpc).await {
        Ok(()) => true,
        Err(err) => {
            debug!(error = %err, "health check failed");
            false
        }
    }
}

// ==============================================================================
// Bans
// ==============================================================================

pub async fn list_banned(rpc: &dyn RpcTransport) -> Result<JsonArray, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_LIST_BANNED, Vec::new()))
        .await;
    array_result(outcome, None)
}

pub async fn set_ban(rpc: &dyn RpcTransport, ban: &Ban) -> Result<(), CoreError> {
    ban.validate()?;
    let params = vec![
        json!(ban.subnet),
        json!("add"),
        json!(ban.time),
        json!(ban.absolute),
    ];
    let outcome = rpc.call(Request::new(METHOD_SET_BAN, params)).await;
    unit_result(outcome, None)
}

pub async fn unban(rpc: &dyn RpcTransport, subnet: &str) -> Result<(), CoreError> {
    Ban::new(subnet).validate()?;
    let outcome = rpc
        .call(Request::new(
            METHOD_SET_BAN,
            vec![json!(subnet), json!("remove")],
        ))
        .await;
    unit_result(outcome, None)
}

/// Remove every entry from the ban list.
pub async fn clear_banned(rpc: &dyn RpcTransport) -> Result<(), CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_CLEAR_BANNED, Vec::new()))
        .await;
    unit_result(outcome, None)
}
