use crate::model::{AuditSetting, EntityKind, Hierarchy, Project, Stage, Team};

/// Fields of a team that an edit may change. `None` leaves the field alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamPatch {
    pub key: String,
    pub name: Option<String>,
    pub audit: Option<AuditSetting>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub key: String,
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagePatch {
    pub key: String,
    pub name: Option<String>,
}

impl TeamPatch {
    pub fn rename(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
            audit: None,
        }
    }
}

impl ProjectPatch {
    pub fn rename(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
        }
    }
}

impl StagePatch {
    pub fn rename(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
        }
    }
}

/// Every mutation the selection store accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvCommand {
    LoadOptions(Hierarchy),
    ChooseOption { level: EntityKind, key: String },

    AddTeam(Team),
    EditTeam(TeamPatch),
    DeleteTeam { key: String },

    AddProject(Project),
    EditProject(ProjectPatch),
    DeleteProject { key: String },

    AddStage(Stage),
    EditStage(StagePatch),
    DeleteStage { key: String },
}

impl EnvCommand {
    pub fn choose(level: EntityKind, key: impl Into<String>) -> Self {
        EnvCommand::ChooseOption {
            level,
            key: key.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnvCommand::LoadOptions(_) => "loadOptions",
            EnvCommand::ChooseOption { .. } => "chooseOption",
            EnvCommand::AddTeam(_) => "addTeam",
            EnvCommand::EditTeam(_) => "editTeam",
            EnvCommand::DeleteTeam { .. } => "deleteTeam",
            EnvCommand::AddProject(_) => "addProject",
            EnvCommand::EditProject(_) => "editProject",
            EnvCommand::DeleteProject { .. } => "deleteProject",
            EnvCommand::AddStage(_) => "addStage",
            EnvCommand::EditStage(_) => "editStage",
            EnvCommand::DeleteStage { .. } => "deleteStage",
        }
    }
}
