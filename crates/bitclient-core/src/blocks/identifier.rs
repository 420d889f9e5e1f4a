use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, ValidationError};
use crate::rpc::RpcTransport;

use super::get_block_hash;

const BLOCK_HASH_HEX_LEN: usize = 64;

/// True unless `hash` is exactly 64 hexadecimal characters (either case).
pub fn is_block_hash_invalid(hash: &str) -> bool {
    hash.len() != BLOCK_HASH_HEX_LEN || !hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A block as the caller named it: by hash or by height.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockId {
    /// Hash text exactly as supplied.
    Hash(String),
    Height(u64),
}

impl FromStr for BlockId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_block_hash_invalid(s) {
            return Ok(Self::Hash(s.to_owned()));
        }
        s.parse::<u64>()
            .map(Self::Height)
            .map_err(|_| ValidationError::InvalidIdentifier(s.to_owned()))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(hash) => f.write_str(hash),
            Self::Height(height) => write!(f, "{height}"),
        }
    }
}

/// Turn a hash-or-height string into a block hash for hash-only methods.
///
/// A hash is returned unchanged without I/O; a height costs exactly one
/// `getblockhash` call.
pub async fn resolve_block_hash(rpc: &dyn RpcTransport, block: &str) -> Result<String, CoreError> {
    match block.parse::<BlockId>()? {
        BlockId::Hash(hash) => Ok(hash),
        BlockId::Height(height) => Ok(get_block_hash(rpc, height).await?.to_string()),
    }
}
