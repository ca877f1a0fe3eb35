//! Team → project → stage selection store.

mod command;
mod options;
mod state;
mod store;
mod transition;

pub use self::command::{EnvCommand, ProjectPatch, StagePatch, TeamPatch};
pub use self::options::{EnvOption, build_options, filter_options};
pub use self::state::EnvState;
pub use self::store::{EnvStore, Outcome};
pub use self::transition::{LookupMiss, reduce, transition};
