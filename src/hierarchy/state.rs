use serde::{Deserialize, Serialize};

use crate::model::{EntityKind, Hierarchy, Project, Stage, Team};

/// Known entities plus the current selection.
///
/// A selected stage always belongs to the selected project, and a selected project to the
/// selected team. Only [`super::transition`] changes an `EnvState`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvState {
    pub team: Option<Team>,
    pub project: Option<Project>,
    pub stage: Option<Stage>,

    pub teams: Vec<Team>,
    pub projects: Vec<Project>,
    pub stages: Vec<Stage>,
}

impl EnvState {
    pub fn from_hierarchy(h: Hierarchy) -> Self {
        Self {
            teams: h.teams,
            projects: h.projects,
            stages: h.stages,
            ..Self::default()
        }
    }

    pub fn find_team(&self, key: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == key)
    }

    pub fn find_project(&self, key: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.key == key)
    }

    pub fn find_stage(&self, key: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.key == key)
    }

    pub fn contains(&self, level: EntityKind, key: &str) -> bool {
        match level {
            EntityKind::Team => self.find_team(key).is_some(),
            EntityKind::Project => self.find_project(key).is_some(),
            EntityKind::Stage => self.find_stage(key).is_some(),
        }
    }

    pub fn selected_key(&self, level: EntityKind) -> Option<&str> {
        match level {
            EntityKind::Team => self.team.as_ref().map(|t| t.key.as_str()),
            EntityKind::Project => self.project.as_ref().map(|p| p.key.as_str()),
            EntityKind::Stage => self.stage.as_ref().map(|s| s.key.as_str()),
        }
    }

    pub fn projects_of<'a>(&'a self, team_key: &'a str) -> impl Iterator<Item = &'a Project> {
        self.projects.iter().filter(move |p| p.team == team_key)
    }

    pub fn stages_of<'a>(&'a self, project_key: &'a str) -> impl Iterator<Item = &'a Stage> {
        self.stages.iter().filter(move |s| s.project == project_key)
    }

    /// Checks the ancestor/descendant selection invariant.
    pub fn is_consistent(&self) -> bool {
        let stage_ok = match (&self.stage, &self.project) {
            (Some(s), Some(p)) => s.project == p.key,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let project_ok = match (&self.project, &self.team) {
            (Some(p), Some(t)) => p.team == t.key,
            (Some(_), None) => false,
            (None, _) => true,
        };
        stage_ok && project_ok
    }

    pub(super) fn clear_below(&mut self, level: EntityKind) {
        match level {
            EntityKind::Team => {
                self.project = None;
                self.stage = None;
            }
            EntityKind::Project => self.stage = None,
            EntityKind::Stage => {}
        }
    }
}
