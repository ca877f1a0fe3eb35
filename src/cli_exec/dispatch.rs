use super::browse::{handle_audit_command, handle_search_command, handle_tree_command};
use super::env::handle_env_command;
use super::hierarchy::{handle_project_command, handle_stage_command, handle_team_command};
use super::identity::{
    handle_login_command, handle_logout_command, handle_user_command, handle_whoami_command,
};
use super::*;

pub(super) fn handle_command(store: &SessionStore, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(store, args.url, args.token)?,
        Commands::Logout => handle_logout_command(store)?,
        Commands::Whoami(args) => handle_whoami_command(store, args.json)?,
        Commands::Tree(args) => handle_tree_command(store, args.json)?,
        Commands::Search(args) => handle_search_command(store, &args.query, args.json)?,
        Commands::Team { command } => handle_team_command(store, command)?,
        Commands::Project { command } => handle_project_command(store, command)?,
        Commands::Stage { command } => handle_stage_command(store, command)?,
        Commands::Env { command } => handle_env_command(store, command)?,
        Commands::Audit(args) => {
            handle_audit_command(store, args.team.as_deref(), args.limit, args.json)?
        }
        Commands::User { command } => handle_user_command(store, command)?,
    }
    Ok(())
}
