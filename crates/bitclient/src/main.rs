mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use tokio_util::sync::CancellationToken;

use bitclient_core::rpc::{Authentication, Cancellable, ClientConfig, HttpRpcClient};
use bitclient_core::{CoreError, RpcError};

use commands::Output;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    let args = cli::Cli::parse();

    let default_filter = if args.debug {
        "info,bitclient_core=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let auth = authentication(&args)?;
    let config = ClientConfig::new(&args.rpc_url, auth)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = HttpRpcClient::new(config).context("configure Bitcoin Core RPC client")?;

    // Ctrl-C aborts the in-flight request instead of killing the process.
    let token = CancellationToken::new();
    tokio::spawn({
        let token = token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, cancelling request");
                token.cancel();
            }
        }
    });
    let rpc = Cancellable::new(&client, token);

    let output = commands::run(&rpc, args.command)
        .await
        .map_err(|err| {
            let message = format_rpc_error(&args.rpc_url, &err);
            eyre!(message).wrap_err("while calling Bitcoin Core RPC")
        })?;

    match output {
        Output::Json(value) => {
            let text = serde_json::to_string_pretty(&value).context("format result")?;
            println!("{text}");
        }
        Output::Text(text) => println!("{text}"),
        Output::Done => tracing::debug!("command completed"),
        Output::Health(true) => println!("healthy"),
        Output::Health(false) => {
            println!("unreachable");
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn authentication(args: &cli::Cli) -> eyre::Result<Authentication> {
    if let Some(path) = &args.rpc_cookie_file {
        return Authentication::from_cookie_file(path).context("load RPC cookie file");
    }
    let label = args
        .rpc_auth_label
        .as_deref()
        .ok_or_else(|| eyre!("either --rpc-auth-label or --rpc-cookie-file must be provided"))?;
    Authentication::parse(&args.rpc_auth_type, label).context("invalid RPC authentication")
}

fn format_rpc_error(rpc_url: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("RPC endpoint: `{rpc_url}`"),
        format!("error: {err}"),
    ];

    let hint = match err {
        CoreError::Rpc(RpcError::Status {
            status: 401 | 403, ..
        }) => Some("authentication failed; verify --rpc-auth-type and --rpc-auth-label or the cookie file"),
        CoreError::Rpc(RpcError::Status { status: 404, .. }) => {
            Some("endpoint path is invalid; verify the full RPC URL including any wallet path")
        }
        CoreError::Rpc(RpcError::Send(e)) if e.is_connect() => {
            Some("connection refused; verify bitcoind is running with -server and the -rpcport")
        }
        CoreError::Rpc(RpcError::Timeout(_)) => {
            Some("the node did not answer in time; raise --timeout-secs for slow calls")
        }
        CoreError::Remote(n) if n.code == Some(-32601) => {
            Some("method not available; the node may be too old or the method disabled")
        }
        CoreError::Remote(n) if n.code == Some(-28) => {
            Some("node is still starting up; retry once it has loaded the block index")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        lines.push(format!("hint: {hint}"));
    }

    lines.join("\n")
}
