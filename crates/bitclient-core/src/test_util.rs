//! Shared test fixtures for `bitclient-core` unit tests.

use serde_json::json;

use crate::types::Json;

// ==============================================================================
// Block Hashes
// ==============================================================================

/// Mainnet genesis block hash.
pub const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

/// Mainnet block hash at height 1000.
pub const HASH_AT_1000: &str = "00000000c937983704a73af28acdec37b049d214adbda81d7e2a3dd146f6ed09";

// ==============================================================================
// Result Builders
// ==============================================================================

/// A `getblock`/`getblockheader` style object for the block at height 1000.
pub fn block_object() -> Json {
    let value = json!({
        "hash": HASH_AT_1000,
        "confirmations": 800_000,
        "height": 1000,
        "version": 1,
        "nTx": 1,
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}
