use super::*;

#[derive(Parser)]
#[command(name = "portunus-server")]
#[command(about = "Portunus console API (development)", long_about = None)]
pub(crate) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub(crate) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(crate) addr_file: Option<PathBuf>,

    /// Data directory (identity and console state)
    #[arg(long, default_value = "./portunus-data")]
    pub(crate) data_dir: PathBuf,

    /// Email of the admin created on first start
    #[arg(long, default_value = "dev@localhost")]
    pub(crate) dev_user: String,

    /// Bearer token of the admin created on first start
    #[arg(long, default_value = "dev")]
    pub(crate) dev_token: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub(crate) log_level: String,
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

pub(crate) fn load_or_bootstrap_identity(
    args: &Args,
) -> Result<(HashMap<String, User>, HashMap<String, AccessToken>)> {
    let (mut users, mut tokens) =
        load_identity_from_disk(&args.data_dir).context("load identity")?;

    if users.is_empty() || tokens.is_empty() {
        let (u, t) = bootstrap_identity(&args.dev_user, &args.dev_token);
        tracing::info!(email = %u.email, "bootstrapped admin identity");
        users.insert(u.id.clone(), u);
        tokens.insert(t.id.clone(), t);
        persist_identity_to_disk(&args.data_dir, &users, &tokens).context("persist identity")?;
    }

    Ok((users, tokens))
}

pub(crate) fn build_state(
    args: &Args,
    users: HashMap<String, User>,
    tokens: HashMap<String, AccessToken>,
    data: ConsoleData,
) -> Arc<AppState> {
    let token_hash_index: HashMap<String, String> = tokens
        .values()
        .map(|t| (t.token_hash.clone(), t.id.clone()))
        .collect();

    Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        data: Arc::new(RwLock::new(data)),
        users: Arc::new(RwLock::new(users)),
        tokens: Arc::new(RwLock::new(tokens)),
        token_hash_index: Arc::new(RwLock::new(token_hash_index)),
    })
}

pub(crate) async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let (users, tokens) = load_or_bootstrap_identity(&args)?;
    let data = load_data_from_disk(&args.data_dir).context("load console data")?;
    tracing::info!(
        teams = data.teams.len(),
        projects = data.projects.len(),
        stages = data.stages.len(),
        "console data loaded"
    );
    let state = build_state(&args, users, tokens, data);

    let app = build_app_router(state);
    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("portunus-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
#[path = "../../tests/bin/portunus_server/runtime_tests.rs"]
mod tests;
