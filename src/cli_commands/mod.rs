use clap::Subcommand;

use crate::{EnvCommands, ProjectCommands, StageCommands, TeamCommands, UserCommands};

pub(crate) mod browse;
pub(crate) mod identity;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in to a remote (configure remote + store token)
    Login(identity::LoginArgs),

    /// Log out (clear stored token)
    Logout,

    /// Show the identity behind the stored token
    Whoami(identity::WhoamiArgs),

    /// Show teams, projects and stages as a tree
    Tree(browse::TreeArgs),

    /// Quick search across teams, projects and stages
    Search(browse::SearchArgs),

    /// Manage teams and their members
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Manage stages
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },

    /// Show or change a stage's variables
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Show audit history (yours, or a team's)
    Audit(browse::AuditArgs),

    /// Show or change your profile
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}
