use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) url: String,
    #[arg(long)]
    pub(crate) token: String,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
