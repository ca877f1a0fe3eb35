//! Application state of one console session.
//!
//! [`Console`] owns the selection store, the variable editor of the selected stage and the
//! request states, and routes remote results back into them. The UI layer (the CLI here)
//! only talks to this type.

use anyhow::{Context, Result};

use crate::hierarchy::{
    EnvCommand, EnvOption, EnvState, EnvStore, Outcome, ProjectPatch, StagePatch, TeamPatch,
};
use crate::kv::{Delta, KvEditor, KvMap, SaveBlocker, SaveError};
use crate::model::{EntityKind, Project, Stage, Team, keys};
use crate::request::{RequestState, Settled, Ticket};

mod backend;

pub use self::backend::Backend;

/// Editor bound to the stage it was loaded for.
#[derive(Debug)]
pub struct StageSession {
    stage_key: String,
    editor: KvEditor,
}

impl StageSession {
    pub fn stage_key(&self) -> &str {
        &self.stage_key
    }

    pub fn editor(&self) -> &KvEditor {
        &self.editor
    }
}

/// A stage load in flight. Hand it to [`Console::complete_stage_load`].
#[derive(Debug)]
#[must_use]
pub struct StageLoad {
    stage_key: String,
    ticket: Ticket,
}

impl StageLoad {
    pub fn stage_key(&self) -> &str {
        &self.stage_key
    }
}

pub struct Console<B> {
    backend: B,
    store: EnvStore,
    options: RequestState<()>,
    mutation: RequestState<()>,
    vars: RequestState<KvMap>,
    /// Stage the variable request state belongs to: the loaded session's or a pending load's.
    vars_stage: Option<String>,
    session: Option<StageSession>,
}

impl<B: Backend> Console<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: EnvStore::new(),
            options: RequestState::new(),
            mutation: RequestState::new(),
            vars: RequestState::new(),
            vars_stage: None,
            session: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &EnvState {
        self.store.state()
    }

    pub fn options(&self) -> Vec<EnvOption> {
        self.store.options()
    }

    pub fn session(&self) -> Option<&StageSession> {
        self.session.as_ref()
    }

    pub fn editor(&self) -> Option<&KvEditor> {
        self.session.as_ref().map(|s| &s.editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut KvEditor> {
        self.session.as_mut().map(|s| &mut s.editor)
    }

    /// Last failure message of any request kind, newest kind first.
    pub fn last_error(&self) -> Option<&str> {
        self.vars
            .error()
            .or(self.mutation.error())
            .or(self.options.error())
    }

    pub fn is_loading(&self) -> bool {
        self.options.loading() || self.mutation.loading() || self.vars.loading()
    }

    /// Fetches teams, projects and stages and replaces the option lists.
    pub fn load_options(&mut self) -> Result<()> {
        let ticket = self.options.begin();
        let result = self.backend.load_all();
        match result {
            Ok(hierarchy) => {
                self.options.settle(ticket, Ok(()));
                tracing::debug!(
                    teams = hierarchy.teams.len(),
                    projects = hierarchy.projects.len(),
                    stages = hierarchy.stages.len(),
                    "options loaded"
                );
                self.dispatch(EnvCommand::LoadOptions(hierarchy));
                Ok(())
            }
            Err(err) => {
                let message = format!("{:#}", err);
                self.options.settle(ticket, Err(err));
                anyhow::bail!("load options: {}", message)
            }
        }
    }

    pub fn choose(&mut self, level: EntityKind, key: &str) -> Outcome {
        self.dispatch(EnvCommand::choose(level, key))
    }

    pub fn create_team(&mut self, name: &str) -> Result<Team> {
        let team = self.mutate(|b| b.create_team(name))?;
        self.dispatch(EnvCommand::AddTeam(team.clone()));
        Ok(team)
    }

    pub fn rename_team(&mut self, key: &str, name: &str) -> Result<()> {
        self.mutate(|b| b.rename_team(key, name))?;
        self.dispatch(EnvCommand::EditTeam(TeamPatch::rename(key, name)));
        Ok(())
    }

    pub fn delete_team(&mut self, key: &str) -> Result<()> {
        self.mutate(|b| b.delete_team(key))?;
        self.dispatch(EnvCommand::DeleteTeam {
            key: key.to_string(),
        });
        Ok(())
    }

    pub fn create_project(&mut self, team_key: &str, name: &str) -> Result<Project> {
        ensure_segment("project", name)?;
        let project = self.mutate(|b| b.create_project(team_key, name))?;
        self.dispatch(EnvCommand::AddProject(project.clone()));
        Ok(project)
    }

    pub fn rename_project(&mut self, key: &str, name: &str) -> Result<()> {
        self.mutate(|b| b.rename_project(key, name))?;
        self.dispatch(EnvCommand::EditProject(ProjectPatch::rename(key, name)));
        Ok(())
    }

    pub fn delete_project(&mut self, key: &str) -> Result<()> {
        self.mutate(|b| b.delete_project(key))?;
        self.dispatch(EnvCommand::DeleteProject {
            key: key.to_string(),
        });
        Ok(())
    }

    pub fn create_stage(&mut self, project_key: &str, name: &str) -> Result<Stage> {
        ensure_segment("stage", name)?;
        let stage = self.mutate(|b| b.create_stage(project_key, name))?;
        self.dispatch(EnvCommand::AddStage(stage.clone()));
        Ok(stage)
    }

    pub fn rename_stage(&mut self, key: &str, name: &str) -> Result<()> {
        self.mutate(|b| b.rename_stage(key, name))?;
        self.dispatch(EnvCommand::EditStage(StagePatch::rename(key, name)));
        Ok(())
    }

    pub fn delete_stage(&mut self, key: &str) -> Result<()> {
        self.mutate(|b| b.delete_stage(key))?;
        self.dispatch(EnvCommand::DeleteStage {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Starts loading the selected stage's variables. Any earlier load becomes stale.
    pub fn begin_stage_load(&mut self) -> Result<StageLoad> {
        let stage_key = self
            .state()
            .selected_key(EntityKind::Stage)
            .context("no stage selected")?
            .to_string();
        let ticket = self.vars.begin();
        self.vars_stage = Some(stage_key.clone());
        Ok(StageLoad { stage_key, ticket })
    }

    /// Applies a finished load. Responses for superseded loads, or for a stage that is no
    /// longer selected, are dropped.
    pub fn complete_stage_load(&mut self, load: StageLoad, result: Result<KvMap>) -> Settled {
        let StageLoad { stage_key, ticket } = load;
        if self.state().selected_key(EntityKind::Stage) != Some(stage_key.as_str()) {
            tracing::debug!(stage = %stage_key, "dropping load for deselected stage");
            return Settled::Stale;
        }
        let settled = self.vars.settle(ticket, result);
        if settled == Settled::Applied
            && let Some(baseline) = self.vars.take()
        {
            tracing::debug!(stage = %stage_key, vars = baseline.len(), "stage loaded");
            self.session = Some(StageSession {
                stage_key,
                editor: KvEditor::new(baseline),
            });
        }
        settled
    }

    /// Loads the selected stage's variables into a fresh editor.
    pub fn load_stage(&mut self) -> Result<()> {
        let load = self.begin_stage_load()?;
        let result = self.backend.load_vars(load.stage_key());
        self.complete_stage_load(load, result);
        match self.vars.error() {
            Some(msg) => anyhow::bail!("{}", msg),
            None => Ok(()),
        }
    }

    pub fn save_blockers(&self) -> Vec<SaveBlocker> {
        let mut out = Vec::new();
        if self.vars.loading() {
            out.push(SaveBlocker::Loading);
        }
        if let Some(session) = &self.session {
            out.extend(session.editor.save_blockers());
        }
        out
    }

    /// Submits the editor's delta for the loaded stage.
    pub fn save_vars(&mut self) -> Result<Delta, SaveError> {
        if self.vars.loading() {
            return Err(SaveError::Blocked(self.save_blockers()));
        }
        let backend = &self.backend;
        let Some(StageSession { stage_key, editor }) = self.session.as_mut() else {
            return Err(SaveError::NoStage);
        };
        let key = stage_key.as_str();
        let sent = editor.save(|delta| backend.save_vars(key, delta))?;
        tracing::info!(stage = %key, changes = sent.change_count(), "variables saved");
        Ok(sent)
    }

    fn mutate<T>(&mut self, f: impl FnOnce(&B) -> Result<T>) -> Result<T> {
        let ticket = self.mutation.begin();
        match f(&self.backend) {
            Ok(out) => {
                self.mutation.settle(ticket, Ok(()));
                Ok(out)
            }
            Err(err) => {
                let message = format!("{:#}", err);
                self.mutation.settle(ticket, Err(err));
                Err(anyhow::anyhow!(message))
            }
        }
    }

    fn dispatch(&mut self, command: EnvCommand) -> Outcome {
        let outcome = self.store.dispatch(command);
        self.sync_session();
        outcome
    }

    /// Drops the editor, and forgets any load in flight, once their stage is no longer the
    /// selected one.
    fn sync_session(&mut self) {
        let selected = self.store.state().selected_key(EntityKind::Stage);
        let Some(current) = self.vars_stage.as_deref() else {
            return;
        };
        if selected == Some(current) {
            return;
        }
        if let Some(session) = self.session.take()
            && session.editor.has_unsaved_changes()
        {
            tracing::warn!(stage = %session.stage_key, "discarding unsaved variable edits");
        }
        self.vars.reset();
        self.vars_stage = None;
    }
}

/// Project and stage names become key segments.
fn ensure_segment(what: &str, name: &str) -> Result<()> {
    if !keys::is_valid_segment(name) {
        anyhow::bail!(
            "invalid {} name {:?} (must be non-blank and must not contain `{}`)",
            what,
            name,
            keys::KEY_SEPARATOR
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/console/console_tests.rs"]
mod tests;
