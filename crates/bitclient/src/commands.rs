use std::convert::Infallible;

use serde_json::{json, Value};

use bitclient_core::blocks::{self, BlockVerbosity};
use bitclient_core::control::{self, LoggingConfig};
use bitclient_core::network::{self, Ban, NodeRef};
use bitclient_core::rpc::RpcTransport;
use bitclient_core::types::{BlockData, BlockHeader, JsonArray};
use bitclient_core::CoreError;

use crate::cli::Command;

/// What a command produced, ready for printing.
#[derive(Debug, PartialEq)]
pub enum Output {
    Json(Value),
    Text(String),
    /// The call succeeded and returned nothing worth printing.
    Done,
    /// `health`: whether the node answered.
    Health(bool),
}

fn array(items: JsonArray) -> Output {
    Output::Json(Value::Array(items.into_iter().map(Value::Object).collect()))
}

fn node_ref(node: &str) -> NodeRef {
    node.parse().unwrap_or_else(|never: Infallible| match never {})
}

pub async fn run(rpc: &dyn RpcTransport, command: Command) -> Result<Output, CoreError> {
    let output = match command {
        Command::BlockchainInfo => Output::Json(Value::Object(blocks::get_blockchain_info(rpc).await?)),
        Command::BlockCount => Output::Json(json!(blocks::get_block_count(rpc).await?)),
        Command::BestBlockHash => Output::Text(blocks::get_best_block_hash(rpc).await?.to_string()),
        Command::BlockHash { height } => {
            Output::Text(blocks::get_block_hash(rpc, height).await?.to_string())
        }
        Command::Block { block, verbosity } => {
            let verbosity = BlockVerbosity::try_from(verbosity)?;
            match blocks::get_block(rpc, &block, verbosity).await? {
                BlockData::Hex(hex) => Output::Text(hex),
                BlockData::Object(obj) => Output::Json(Value::Object(obj)),
            }
        }
        Command::BlockHeader { block, hex } => {
            match blocks::get_block_header(rpc, &block, !hex).await? {
                BlockHeader::Hex(hex) => Output::Text(hex),
                BlockHeader::Object(obj) => Output::Json(Value::Object(obj)),
            }
        }
        Command::BlockFilter { block, filter_type } => Output::Json(Value::Object(
            blocks::get_block_filter(rpc, &block, filter_type.as_deref()).await?,
        )),
        Command::BlockStats { block, stats } => Output::Json(Value::Object(
            blocks::get_block_stats(rpc, &block, &stats).await?,
        )),

        Command::AddNode { node } => {
            network::add_node(rpc, &node).await?;
            Output::Done
        }
        Command::RemoveNode { node } => {
            network::remove_node(rpc, &node).await?;
            Output::Done
        }
        Command::ConnectNode { node } => {
            network::connect_to_node(rpc, &node).await?;
            Output::Done
        }
        Command::DisconnectNode { node } => {
            network::disconnect_node(rpc, &node_ref(&node)).await?;
            Output::Done
        }
        Command::AddedNodes { node } => {
            array(network::inspect_added_nodes(rpc, node.as_deref()).await?)
        }
        Command::ConnectionCount => Output::Json(json!(network::get_connection_count(rpc).await?)),
        Command::NetTotals => Output::Json(Value::Object(network::inspect_traffic(rpc).await?)),
        Command::NetworkInfo => Output::Json(Value::Object(network::get_network_info(rpc).await?)),
        Command::NodeAddresses { count } => array(network::find_addresses(rpc, count).await?),
        Command::Peers => array(network::get_peers(rpc).await?),
        Command::ListBanned => array(network::list_banned(rpc).await?),
        Command::Ping => {
            network::ping(rpc).await?;
            Output::Done
        }
        Command::Health => Output::Health(network::health(rpc).await),
        Command::Ban {
            subnet,
            time,
            absolute,
        } => {
            network::set_ban(
                rpc,
                &Ban {
                    subnet,
                    time,
                    absolute,
                },
            )
            .await?;
            Output::Done
        }
        Command::Unban { subnet } => {
            network::unban(rpc, &subnet).await?;
            Output::Done
        }
        Command::ClearBanned => {
            network::clear_banned(rpc).await?;
            Output::Done
        }
        Command::SetNetworkActive { active } => {
            network::set_network_active(rpc, active).await?;
            Output::Done
        }

        Command::MemoryInfo => Output::Json(Value::Object(control::get_memory_info(rpc).await?)),
        Command::MallocInfo => Output::Text(control::get_malloc_info(rpc).await?),
        Command::RpcInfo => Output::Json(Value::Object(control::get_rpc_info(rpc).await?)),
        Command::Help { command } => Output::Text(control::help(rpc, command.as_deref()).await?),
        Command::Logging { include, exclude } => {
            let state = if include.is_empty() && exclude.is_empty() {
                control::get_logging(rpc).await?
            } else {
                control::set_logging(rpc, &LoggingConfig { include, exclude }).await?
            };
            Output::Json(Value::Object(state))
        }
    };
    Ok(output)
}
