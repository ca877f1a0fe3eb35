use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use portunus::console::Console;
use portunus::remote::RemoteClient;
use portunus::session::SessionStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "portunus")]
#[command(about = "Team / project / stage environment variable console", long_about = None)]
pub(crate) struct Cli {
    /// State directory (defaults to $PORTUNUS_HOME, then ~/.portunus)
    #[arg(long, global = true, value_name = "PATH")]
    home: Option<PathBuf>,

    /// Log level or filter directive (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let store = SessionStore::open_default(cli.home.as_deref())?;
    tracing::debug!(home = %store.root().display(), "using state directory");
    crate::cli_exec::handle_command(&store, cli.command)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub(crate) fn connect(store: &SessionStore) -> Result<RemoteClient> {
    let (remote, token) = store.require_remote_and_token()?;
    RemoteClient::new(remote, token)
}

/// Console with options already loaded.
pub(crate) fn open_console(store: &SessionStore) -> Result<Console<RemoteClient>> {
    let mut console = Console::new(connect(store)?);
    console.load_options().context("load teams, projects and stages")?;
    Ok(console)
}
