//! Result shapes shared by the daemon operations.

use bitcoin::{BlockHash, Network};
use serde::{Deserialize, Serialize};

/// A single decoded result object. Key order carries no meaning.
pub type Json = serde_json::Map<String, serde_json::Value>;

/// An ordered list of decoded result objects.
pub type JsonArray = Vec<Json>;

// ==============================================================================
// Chain Info
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    pub pruned: bool,
}

impl ChainInfo {
    /// Map Bitcoin Core's chain name to a [`Network`].
    pub fn network(&self) -> Option<Network> {
        match self.chain.as_str() {
            "main" => Some(Network::Bitcoin),
            "test" => Some(Network::Testnet),
            "signet" => Some(Network::Signet),
            "regtest" => Some(Network::Regtest),
            _ => None,
        }
    }
}

// ==============================================================================
// Block Payloads
// ==============================================================================

/// `getblock` result: hex for verbosity 0, an object otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockData {
    Hex(String),
    Object(Json),
}

/// `getblockheader` result: hex when not verbose, an object otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockHeader {
    Hex(String),
    Object(Json),
}
