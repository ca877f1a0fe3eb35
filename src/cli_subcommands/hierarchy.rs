use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum TeamCommands {
    /// Create a team (you become a member)
    Create {
        name: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a team (its key does not change)
    Rename {
        /// Team key
        team: String,
        name: String,
    },
    /// Delete a team with all of its projects and stages
    Delete {
        /// Team key
        team: String,
    },
    /// Manage team members
    Members {
        #[command(subcommand)]
        command: MembersCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum MembersCommands {
    /// List members
    List {
        /// Team key
        team: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a member by email
    Add {
        /// Team key
        team: String,
        email: String,
    },
    /// Remove a member by email
    Remove {
        /// Team key
        team: String,
        email: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProjectCommands {
    /// Create a project under a team
    Create {
        /// Team key
        team: String,
        name: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a project (its key does not change)
    Rename {
        /// Project key (`<team>::<project>`)
        project: String,
        name: String,
    },
    /// Delete a project with all of its stages
    Delete {
        /// Project key (`<team>::<project>`)
        project: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum StageCommands {
    /// Create a stage under a project
    Create {
        /// Project key (`<team>::<project>`)
        project: String,
        name: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a stage (its key does not change)
    Rename {
        /// Stage key (`<team>::<project>::<stage>`)
        stage: String,
        name: String,
    },
    /// Delete a stage and its variables
    Delete {
        /// Stage key (`<team>::<project>::<stage>`)
        stage: String,
    },
}
