use anyhow::Result;

use crate::kv::{Delta, KvMap};
use crate::model::{Hierarchy, Project, Stage, Team};
use crate::remote::RemoteClient;

/// Remote operations the console drives. [`RemoteClient`] is the production implementation.
pub trait Backend {
    fn load_all(&self) -> Result<Hierarchy>;
    fn load_vars(&self, stage_key: &str) -> Result<KvMap>;
    fn save_vars(&self, stage_key: &str, delta: &Delta) -> Result<()>;

    fn create_team(&self, name: &str) -> Result<Team>;
    fn rename_team(&self, key: &str, name: &str) -> Result<()>;
    fn delete_team(&self, key: &str) -> Result<()>;

    fn create_project(&self, team_key: &str, name: &str) -> Result<Project>;
    fn rename_project(&self, key: &str, name: &str) -> Result<()>;
    fn delete_project(&self, key: &str) -> Result<()>;

    fn create_stage(&self, project_key: &str, name: &str) -> Result<Stage>;
    fn rename_stage(&self, key: &str, name: &str) -> Result<()>;
    fn delete_stage(&self, key: &str) -> Result<()>;
}

impl Backend for RemoteClient {
    fn load_all(&self) -> Result<Hierarchy> {
        self.all()
    }

    fn load_vars(&self, stage_key: &str) -> Result<KvMap> {
        self.get_env(stage_key)
    }

    fn save_vars(&self, stage_key: &str, delta: &Delta) -> Result<()> {
        self.put_env(stage_key, delta)
    }

    fn create_team(&self, name: &str) -> Result<Team> {
        RemoteClient::create_team(self, name)
    }

    fn rename_team(&self, key: &str, name: &str) -> Result<()> {
        RemoteClient::rename_team(self, key, name)
    }

    fn delete_team(&self, key: &str) -> Result<()> {
        RemoteClient::delete_team(self, key)
    }

    fn create_project(&self, team_key: &str, name: &str) -> Result<Project> {
        RemoteClient::create_project(self, team_key, name)
    }

    fn rename_project(&self, key: &str, name: &str) -> Result<()> {
        RemoteClient::rename_project(self, key, name)
    }

    fn delete_project(&self, key: &str) -> Result<()> {
        RemoteClient::delete_project(self, key)
    }

    fn create_stage(&self, project_key: &str, name: &str) -> Result<Stage> {
        RemoteClient::create_stage(self, project_key, name)
    }

    fn rename_stage(&self, key: &str, name: &str) -> Result<()> {
        RemoteClient::rename_stage(self, key, name)
    }

    fn delete_stage(&self, key: &str) -> Result<()> {
        RemoteClient::delete_stage(self, key)
    }
}
