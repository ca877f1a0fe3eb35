use clap::Args;

#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Case-insensitive text matched against keys, names and paths
    pub(crate) query: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct AuditArgs {
    /// Team key; omit for your own history
    #[arg(long)]
    pub(crate) team: Option<String>,
    /// Only show the newest N records
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
