use serde::{Deserialize, Serialize};

/// Level in the team → project → stage hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Team,
    Project,
    Stage,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Team, EntityKind::Project, EntityKind::Stage];

    pub fn depth(self) -> usize {
        match self {
            EntityKind::Team => 0,
            EntityKind::Project => 1,
            EntityKind::Stage => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Team => "team",
            EntityKind::Project => "project",
            EntityKind::Stage => "stage",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team" => Ok(EntityKind::Team),
            "project" => Ok(EntityKind::Project),
            "stage" => Ok(EntityKind::Stage),
            other => anyhow::bail!("unknown entity kind: {} (expected team|project|stage)", other),
        }
    }
}

/// Team-level audit setting. Older records store it as a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditSetting {
    Enabled(bool),
    Label(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub key: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditSetting>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub project: String,
    pub team: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub key: String,
    pub stage: String,
    pub project: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vars: Option<StageVars>,
}

/// Listings carry either the variables themselves or just how many there are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageVars {
    Count(u64),
    List(Vec<Var>),
}

impl StageVars {
    pub fn len(&self) -> u64 {
        match self {
            StageVars::Count(n) => *n,
            StageVars::List(vars) => vars.len() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    pub key: String,
    pub value: String,

    #[serde(default)]
    pub secret: bool,
}

/// The three option arrays as one payload (`GET /all`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}
