use anyhow::{Context, Result};

use portunus::session::SessionStore;

use crate::{
    Commands, EnvCommands, KeyCommands, MembersCommands, ProjectCommands, StageCommands,
    TeamCommands, UserCommands, connect, open_console,
};

mod browse;
mod dispatch;
mod env;
mod hierarchy;
mod identity;

pub(super) fn handle_command(store: &SessionStore, command: Commands) -> Result<()> {
    dispatch::handle_command(store, command)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
