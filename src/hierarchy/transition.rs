use std::collections::HashSet;

use crate::model::{EntityKind, Project, Stage, Team, keys};

use super::command::{EnvCommand, ProjectPatch, StagePatch, TeamPatch};
use super::state::EnvState;

/// A command named an entity the state does not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no {level} with key `{key}`")]
pub struct LookupMiss {
    pub level: EntityKind,
    pub key: String,
}

impl LookupMiss {
    fn new(level: EntityKind, key: &str) -> Self {
        Self {
            level,
            key: key.to_string(),
        }
    }
}

/// Pure transition function. A miss leaves the caller's state as it was.
pub fn transition(state: &EnvState, command: &EnvCommand) -> Result<EnvState, LookupMiss> {
    match command {
        EnvCommand::LoadOptions(h) => Ok(EnvState::from_hierarchy(h.clone())),
        EnvCommand::ChooseOption { level, key } => choose(state, *level, key),

        EnvCommand::AddTeam(team) => Ok(add_team(state, team)),
        EnvCommand::EditTeam(patch) => edit_team(state, patch),
        EnvCommand::DeleteTeam { key } => delete_team(state, key),

        EnvCommand::AddProject(project) => Ok(add_project(state, project)),
        EnvCommand::EditProject(patch) => edit_project(state, patch),
        EnvCommand::DeleteProject { key } => delete_project(state, key),

        EnvCommand::AddStage(stage) => Ok(add_stage(state, stage)),
        EnvCommand::EditStage(patch) => edit_stage(state, patch),
        EnvCommand::DeleteStage { key } => delete_stage(state, key),
    }
}

/// Reducer form of [`transition`]: misses return the state unchanged.
pub fn reduce(state: EnvState, command: &EnvCommand) -> EnvState {
    match transition(&state, command) {
        Ok(next) => next,
        Err(_) => state,
    }
}

fn choose(state: &EnvState, level: EntityKind, key: &str) -> Result<EnvState, LookupMiss> {
    if !state.contains(level, key) {
        return Err(LookupMiss::new(level, key));
    }
    let mut next = state.clone();
    next.clear_below(level);
    select_with_ancestors(&mut next, level, key)?;
    Ok(next)
}

/// Sets `level` to the entity with `key` and re-selects every level above it.
///
/// Ancestors are the key's prefixes, and each entity's own parent field has to name the
/// ancestor found for it. Remote listings that break either rule are a miss.
fn select_with_ancestors(
    state: &mut EnvState,
    level: EntityKind,
    key: &str,
) -> Result<(), LookupMiss> {
    if keys::kind_of(key) != Some(level) {
        return Err(LookupMiss::new(level, key));
    }
    let mut chain = keys::ancestor_keys(key);
    chain.push(key.to_string());

    let team = state
        .find_team(&chain[0])
        .cloned()
        .ok_or_else(|| LookupMiss::new(EntityKind::Team, &chain[0]))?;

    let project = match chain.get(1) {
        Some(project_key) => {
            let project = state
                .find_project(project_key)
                .filter(|p| p.team == team.key)
                .cloned()
                .ok_or_else(|| LookupMiss::new(EntityKind::Project, project_key))?;
            Some(project)
        }
        None => None,
    };

    let stage = match (chain.get(2), &project) {
        (Some(stage_key), Some(project)) => {
            let stage = state
                .find_stage(stage_key)
                .filter(|s| s.project == project.key)
                .cloned()
                .ok_or_else(|| LookupMiss::new(EntityKind::Stage, stage_key))?;
            Some(stage)
        }
        _ => None,
    };

    state.team = Some(team);
    if level != EntityKind::Team {
        state.project = project;
    }
    if level == EntityKind::Stage {
        state.stage = stage;
    }
    Ok(())
}

fn upsert<T: Clone>(list: &mut Vec<T>, item: &T, same: impl Fn(&T) -> bool) {
    match list.iter().position(same) {
        Some(idx) => list[idx] = item.clone(),
        None => list.push(item.clone()),
    }
}

fn add_team(state: &EnvState, team: &Team) -> EnvState {
    let mut next = state.clone();
    upsert(&mut next.teams, team, |t| t.key == team.key);
    next.team = Some(team.clone());
    next.clear_below(EntityKind::Team);
    next
}

fn add_project(state: &EnvState, project: &Project) -> EnvState {
    let mut next = state.clone();
    upsert(&mut next.projects, project, |p| p.key == project.key);
    let mut selected = next.clone();
    selected.clear_below(EntityKind::Project);
    match select_with_ancestors(&mut selected, EntityKind::Project, &project.key) {
        Ok(()) => selected,
        Err(miss) => {
            tracing::debug!(%miss, project = %project.key, "added project without selecting it");
            next
        }
    }
}

fn add_stage(state: &EnvState, stage: &Stage) -> EnvState {
    let mut next = state.clone();
    upsert(&mut next.stages, stage, |s| s.key == stage.key);
    let mut selected = next.clone();
    match select_with_ancestors(&mut selected, EntityKind::Stage, &stage.key) {
        Ok(()) => selected,
        Err(miss) => {
            tracing::debug!(%miss, stage = %stage.key, "added stage without selecting it");
            next
        }
    }
}

fn edit_team(state: &EnvState, patch: &TeamPatch) -> Result<EnvState, LookupMiss> {
    let mut next = state.clone();
    let team = next
        .teams
        .iter_mut()
        .find(|t| t.key == patch.key)
        .ok_or_else(|| LookupMiss::new(EntityKind::Team, &patch.key))?;
    if let Some(name) = &patch.name {
        team.name = name.clone();
    }
    if let Some(audit) = &patch.audit {
        team.audit = Some(audit.clone());
    }
    let updated = team.clone();
    if next.team.as_ref().is_some_and(|t| t.key == patch.key) {
        next.team = Some(updated);
    }
    Ok(next)
}

fn edit_project(state: &EnvState, patch: &ProjectPatch) -> Result<EnvState, LookupMiss> {
    let mut next = state.clone();
    let project = next
        .projects
        .iter_mut()
        .find(|p| p.key == patch.key)
        .ok_or_else(|| LookupMiss::new(EntityKind::Project, &patch.key))?;
    if let Some(name) = &patch.name {
        project.project = name.clone();
    }
    let updated = project.clone();
    if next.project.as_ref().is_some_and(|p| p.key == patch.key) {
        next.project = Some(updated);
    }
    Ok(next)
}

fn edit_stage(state: &EnvState, patch: &StagePatch) -> Result<EnvState, LookupMiss> {
    let mut next = state.clone();
    let stage = next
        .stages
        .iter_mut()
        .find(|s| s.key == patch.key)
        .ok_or_else(|| LookupMiss::new(EntityKind::Stage, &patch.key))?;
    if let Some(name) = &patch.name {
        stage.stage = name.clone();
    }
    let updated = stage.clone();
    if next.stage.as_ref().is_some_and(|s| s.key == patch.key) {
        next.stage = Some(updated);
    }
    Ok(next)
}

fn delete_team(state: &EnvState, key: &str) -> Result<EnvState, LookupMiss> {
    let removed_projects: HashSet<&str> = state
        .projects_of(key)
        .map(|p| p.key.as_str())
        .collect();
    if state.find_team(key).is_none() && removed_projects.is_empty() {
        return Err(LookupMiss::new(EntityKind::Team, key));
    }

    let mut next = state.clone();
    next.teams.retain(|t| t.key != key);
    next.projects.retain(|p| p.team != key);
    next.stages
        .retain(|s| !removed_projects.contains(s.project.as_str()));

    if state.team.as_ref().is_some_and(|t| t.key == key) {
        next.team = None;
    }
    if state
        .project
        .as_ref()
        .is_some_and(|p| removed_projects.contains(p.key.as_str()))
    {
        next.project = None;
    }
    if state
        .stage
        .as_ref()
        .is_some_and(|s| removed_projects.contains(s.project.as_str()))
    {
        next.stage = None;
    }
    Ok(next)
}

fn delete_project(state: &EnvState, key: &str) -> Result<EnvState, LookupMiss> {
    if state.find_project(key).is_none() && state.stages_of(key).next().is_none() {
        return Err(LookupMiss::new(EntityKind::Project, key));
    }

    let mut next = state.clone();
    next.projects.retain(|p| p.key != key);
    next.stages.retain(|s| s.project != key);

    if state.project.as_ref().is_some_and(|p| p.key == key) {
        next.project = None;
    }
    if state.stage.as_ref().is_some_and(|s| s.project == key) {
        next.stage = None;
    }
    Ok(next)
}

fn delete_stage(state: &EnvState, key: &str) -> Result<EnvState, LookupMiss> {
    if state.find_stage(key).is_none() {
        return Err(LookupMiss::new(EntityKind::Stage, key));
    }

    let mut next = state.clone();
    next.stages.retain(|s| s.key != key);
    if state.stage.as_ref().is_some_and(|s| s.key == key) {
        next.stage = None;
    }
    Ok(next)
}

#[cfg(test)]
#[path = "../tests/hierarchy/transition_tests.rs"]
mod tests;
