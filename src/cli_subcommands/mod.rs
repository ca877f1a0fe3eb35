mod env;
mod hierarchy;
mod user;

pub(crate) use self::env::EnvCommands;
pub(crate) use self::hierarchy::{MembersCommands, ProjectCommands, StageCommands, TeamCommands};
pub(crate) use self::user::{KeyCommands, UserCommands};
