use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// bitclient: query and control a Bitcoin Core node over JSON-RPC.
#[derive(Debug, Parser)]
#[command(version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Bitcoin Core RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:8332", env = "RPC_URL")]
    pub rpc_url: String,

    /// Authentication type: `api-key` or `user:password`.
    #[arg(long, default_value = "user:password", env = "RPC_AUTH_TYPE")]
    pub rpc_auth_type: String,

    /// Bearer token for `api-key`, or `username:password`.
    #[arg(long, env = "RPC_AUTH_LABEL", hide_env_values = true)]
    pub rpc_auth_label: Option<String>,

    /// Read credentials from bitcoind's `.cookie` file instead of a label.
    #[arg(long, env = "RPC_COOKIE_FILE", conflicts_with = "rpc_auth_label")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Deadline for each RPC exchange, in seconds.
    #[arg(long, default_value = "30", env = "RPC_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Log every RPC call and response.
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    // Blockchain
    /// State of the active chain (`getblockchaininfo`).
    BlockchainInfo,
    /// Height of the most-work chain.
    BlockCount,
    BestBlockHash,
    /// Hash of the block at HEIGHT.
    BlockHash { height: u64 },
    /// A block by hash or height.
    Block {
        block: String,
        /// 0 = hex, 1 = basic, 2 = with transactions, 3 = with prevouts.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        verbosity: i64,
    },
    /// A block header by hash or height.
    BlockHeader {
        block: String,
        /// Print the serialized header instead of the decoded object.
        #[arg(long)]
        hex: bool,
    },
    /// BIP 157 compact block filter.
    BlockFilter {
        block: String,
        #[arg(long)]
        filter_type: Option<String>,
    },
    /// Per-block statistics.
    BlockStats {
        block: String,
        /// Only return this statistic (repeatable).
        #[arg(long = "stat")]
        stats: Vec<String>,
    },

    // Network
    /// Add a node to the addnode list.
    AddNode { node: String },
    RemoveNode { node: String },
    /// Try a single connection to a node.
    ConnectNode { node: String },
    /// Disconnect a peer by `host:port` or node id.
    DisconnectNode { node: String },
    AddedNodes { node: Option<String> },
    ConnectionCount,
    /// Network traffic totals.
    NetTotals,
    NetworkInfo,
    /// Known peer addresses.
    NodeAddresses {
        /// Number of addresses; 0 returns all of them.
        #[arg(long)]
        count: Option<u64>,
    },
    Peers,
    ListBanned,
    Ping,
    /// Exit status reports whether the node answers `ping`.
    Health,
    /// Ban an IP or subnet.
    Ban {
        subnet: String,
        /// Seconds, or a unix timestamp with --absolute. 0 uses the node default.
        #[arg(long, default_value_t = 0)]
        time: u64,
        #[arg(long)]
        absolute: bool,
    },
    Unban { subnet: String },
    ClearBanned,
    SetNetworkActive {
        #[arg(action = ArgAction::Set)]
        active: bool,
    },

    // Control
    /// Locked memory pool usage.
    MemoryInfo,
    /// glibc malloc statistics (XML).
    MallocInfo,
    RpcInfo,
    /// Help for COMMAND, or the list of commands.
    Help { command: Option<String> },
    /// Show logging categories, or toggle them with --include/--exclude.
    Logging {
        #[arg(long)]
        include: Vec<String>,
        #[arg(long)]
        exclude: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["bitclient", "block-count"]).expect("must parse");
        assert_eq!(cli.rpc_url, "http://127.0.0.1:8332");
        assert_eq!(cli.rpc_auth_type, "user:password");
        assert_eq!(cli.timeout_secs, 30);
        assert!(!cli.debug);
        assert!(matches!(cli.command, Command::BlockCount));
    }

    #[test]
    fn block_accepts_verbosity() {
        let cli = Cli::try_parse_from(["bitclient", "block", "1000", "--verbosity", "3"])
            .expect("must parse");
        match cli.command {
            Command::Block { block, verbosity } => {
                assert_eq!(block, "1000");
                assert_eq!(verbosity, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cookie_file_conflicts_with_label() {
        let err = Cli::try_parse_from([
            "bitclient",
            "--rpc-auth-label",
            "alice:secret",
            "--rpc-cookie-file",
            "/tmp/.cookie",
            "ping",
        ])
        .expect_err("must conflict");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn logging_collects_repeated_categories() {
        let cli = Cli::try_parse_from([
            "bitclient",
            "logging",
            "--exclude",
            "net",
            "--exclude",
            "tor",
        ])
        .expect("must parse");
        match cli.command {
            Command::Logging { include, exclude } => {
                assert!(include.is_empty());
                assert_eq!(exclude, vec!["net", "tor"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn set_network_active_takes_explicit_bool() {
        let cli = Cli::try_parse_from(["bitclient", "set-network-active", "false"])
            .expect("must parse");
        assert!(matches!(
            cli.command,
            Command::SetNetworkActive { active: false }
        ));
    }
}
