use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A ban on an IP or subnet (`192.168.0.6`, `192.168.0.0/24`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ban {
    pub subnet: String,
    /// Ban duration in seconds, or a unix timestamp when `absolute` is set.
    /// Zero lets the node apply its default (24h).
    pub time: u64,
    pub absolute: bool,
}

impl Ban {
    pub fn new(subnet: impl Into<String>) -> Self {
        Self {
            subnet: subnet.into(),
            time: 0,
            absolute: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subnet.trim().is_empty() {
            return Err(ValidationError::EmptySubnet);
        }
        Ok(())
    }
}

/// A connected peer, addressed either by `host:port` or by node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Address(String),
    Id(u64),
}

impl FromStr for NodeRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Address(s.to_owned()),
        })
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => f.write_str(address),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// `addnode` sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AddNodeCommand {
    Add,
    Remove,
    OneTry,
}

impl AddNodeCommand {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::OneTry => "onetry",
        }
    }
}
