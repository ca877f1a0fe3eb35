use super::command::EnvCommand;
use super::options::{EnvOption, build_options};
use super::state::EnvState;
use super::transition::transition;

/// What [`EnvStore::dispatch`] did with a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
}

/// Owns the single [`EnvState`] of a console session.
#[derive(Debug, Default)]
pub struct EnvStore {
    state: EnvState,
}

impl EnvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EnvState {
        &self.state
    }

    pub fn dispatch(&mut self, command: EnvCommand) -> Outcome {
        match transition(&self.state, &command) {
            Ok(next) => {
                debug_assert!(next.is_consistent(), "{} broke the selection", command.name());
                self.state = next;
                tracing::trace!(command = command.name(), "applied");
                Outcome::Applied
            }
            Err(miss) => {
                tracing::debug!(command = command.name(), %miss, "command ignored");
                Outcome::Unchanged
            }
        }
    }

    pub fn options(&self) -> Vec<EnvOption> {
        build_options(&self.state)
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy/store_tests.rs"]
mod tests;
