//! Block and blockchain queries.
//!
//! Every operation that takes a block accepts either a hash or a height and
//! resolves it with [`resolve_block_hash`] before issuing the hash-only call.

mod identifier;
mod verbosity;

pub use identifier::{is_block_hash_invalid, resolve_block_hash, BlockId};
pub use verbosity::BlockVerbosity;

use bitcoin::BlockHash;
use serde_json::json;

use crate::error::CoreError;
use crate::rpc::{object_result, value_result, Request, RpcTransport};
use crate::types::{BlockData, BlockHeader, ChainInfo, Json};

pub const METHOD_GET_BEST_BLOCK_HASH: &str = "getbestblockhash";
pub const METHOD_GET_BLOCK: &str = "getblock";
pub const METHOD_GET_BLOCKCHAIN_INFO: &str = "getblockchaininfo";
pub const METHOD_GET_BLOCK_COUNT: &str = "getblockcount";
pub const METHOD_GET_BLOCK_FILTER: &str = "getblockfilter";
pub const METHOD_GET_BLOCK_HASH: &str = "getblockhash";
pub const METHOD_GET_BLOCK_HEADER: &str = "getblockheader";
pub const METHOD_GET_BLOCK_STATS: &str = "getblockstats";

/// Filter type requested when the caller does not name one.
pub const DEFAULT_FILTER_TYPE: &str = "basic";

const BLOCK_FILTER_WARNING: &str =
    "compact block filters may need to be enabled by starting bitcoind with -blockfilterindex=basic";

// ==============================================================================
// Blockchain
// ==============================================================================

pub async fn get_blockchain_info(rpc: &dyn RpcTransport) -> Result<Json, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_BLOCKCHAIN_INFO, Vec::new()))
        .await;
    object_result(outcome, None)
}

/// Typed subset of `getblockchaininfo`.
pub async fn get_chain_info(rpc: &dyn RpcTransport) -> Result<ChainInfo, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_BLOCKCHAIN_INFO, Vec::new()))
        .await;
    value_result(outcome, None)
}

pub async fn get_block_count(rpc: &dyn RpcTransport) -> Result<u64, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_BLOCK_COUNT, Vec::new()))
        .await;
    value_result(outcome, None)
}

pub async fn get_best_block_hash(rpc: &dyn RpcTransport) -> Result<BlockHash, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_BEST_BLOCK_HASH, Vec::new()))
        .await;
    value_result(outcome, None)
}

// ==============================================================================
// Blocks
// ==============================================================================

/// Hash of the block at `height` in the best chain.
pub async fn get_block_hash(rpc: &dyn RpcTransport, height: u64) -> Result<BlockHash, CoreError> {
    let outcome = rpc
        .call(Request::new(METHOD_GET_BLOCK_HASH, vec![json!(height)]))
        .await;
    value_result(outcome, None)
}

pub async fn get_block(
    rpc: &dyn RpcTransport,
    block: &str,
    verbosity: BlockVerbosity,
) -> Result<BlockData, CoreError> {
    let hash = resolve_block_hash(rpc, block).await?;
    let outcome = rpc
        .call(Request::new(
            METHOD_GET_BLOCK,
            vec![json!(hash), json!(verbosity.level())],
        ))
        .await;

    match verbosity {
        BlockVerbosity::SerializedHex => value_result(outcome, None).map(BlockData::Hex),
        _ => object_result(outcome, None).map(BlockData::Object),
    }
}

pub async fn get_block_header(
    rpc: &dyn RpcTransport,
    block: &str,
    verbose: bool,
) -> Result<BlockHeader, CoreError> {
    let hash = resolve_block_hash(rpc, block).await?;
    let outcome = rpc
        .call(Request::new(
            METHOD_GET_BLOCK_HEADER,
            vec![json!(hash), json!(verbose)],
        ))
        .await;

    if verbose {
        object_result(outcome, None).map(BlockHeader::Object)
    } else {
        value_result(outcome, None).map(BlockHeader::Hex)
    }
}

/// BIP 157 compact filter and filter header for a block.
pub async fn get_block_filter(
    rpc: &dyn RpcTransport,
    block: &str,
    filter_type: Option<&str>,
) -> Result<Json, CoreError> {
    let hash = resolve_block_hash(rpc, block).await?;
    let filter_type = filter_type.unwrap_or(DEFAULT_FILTER_TYPE);
    let outcome = rpc
        .call(Request::new(
            METHOD_GET_BLOCK_FILTER,
            vec![json!(hash), json!(filter_type)],
        ))
        .await;
    object_result(outcome, Some(BLOCK_FILTER_WARNING))
}

/// Per-block statistics; `stats` narrows the returned fields when non-empty.
pub async fn get_block_stats(
    rpc: &dyn RpcTransport,
    block: &str,
    stats: &[String],
) -> Result<Json, CoreError> {
    let hash = resolve_block_hash(rpc, block).await?;
    let mut params = vec![json!(hash)];
    if !stats.is_empty() {
        params.push(json!(stats));
    }

    let outcome = rpc
        .call(Request::new(METHOD_GET_BLOCK_STATS, params))
        .await;
    object_result(outcome, None)
}
