use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum EnvCommands {
    /// Print a stage's variables
    Show {
        /// Stage key (`<team>::<project>::<stage>`)
        stage: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Set and/or unset variables in one save
    Set {
        /// Stage key (`<team>::<project>::<stage>`)
        stage: String,
        /// KEY=VALUE pairs to add or change
        #[arg(value_name = "KEY=VALUE")]
        pairs: Vec<String>,
        /// Keys to remove (repeatable)
        #[arg(long = "unset", value_name = "KEY")]
        unset: Vec<String>,
        /// Print the delta without saving
        #[arg(long)]
        dry_run: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace a stage's variables with a JSON object read from a file (`-` for stdin)
    Import {
        /// Stage key (`<team>::<project>::<stage>`)
        stage: String,
        #[arg(long)]
        file: PathBuf,
        /// Print the delta without saving
        #[arg(long)]
        dry_run: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}
