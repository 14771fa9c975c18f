//! Dev entry point: run a self-play game (default) or serve the framed
//! transport for external clients.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mafia_token_lib::Team;
use mafia_token_server_lib::NetServerConfig;
use mafia_token_server_lib::NetTokenServer;
use mafia_token_server_lib::ServerError;
use mafia_token_server_lib::selfplay::run_self_play;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mafia-token-server", version, about)]
struct Args {
    /// Role arrangement seed (0..=2519).
    #[arg(long, default_value_t = 0)]
    seed: u16,

    /// Seed for the built-in agents' action selection.
    #[arg(long, default_value_t = 0)]
    random_seed: u64,

    /// Root directory for training artifacts.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Serve the framed transport on this address instead of playing a
    /// local self-play game.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

fn run(args: Args) -> Result<Team, ServerError> {
    if let Some(addr) = args.listen {
        let server = NetTokenServer::bind(
            addr,
            NetServerConfig { seed: args.seed, log_dir: args.log_dir },
        )?;
        tracing::info!(addr = %server.local_addr()?, "waiting for ten clients");
        server.run()
    } else {
        let report = run_self_play(args.seed, args.random_seed, args.log_dir.as_deref())?;
        Ok(report.winner)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(winner) => {
            tracing::info!(?winner, "game finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "unrecoverable error");
            ExitCode::FAILURE
        }
    }
}
