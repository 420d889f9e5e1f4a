pub mod blocks;
pub mod control;
pub mod error;
pub mod network;
pub mod rpc;
#[cfg(test)]
mod test_util;
pub mod types;

pub use error::{CoreError, RpcError, ValidationError};
