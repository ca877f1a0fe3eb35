use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// Show your profile
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage your public key
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Turn recording of your own requests on or off
    Audit {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
pub(crate) enum KeyCommands {
    /// Store a public key
    Set { public_key: String },
    /// Remove the stored public key
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub(crate) fn enabled(self) -> bool {
        self == Toggle::On
    }
}
