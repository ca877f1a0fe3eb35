//! Team, project and stage operations.

use super::*;
use crate::model::{Hierarchy, Project, Stage, Team, keys};

impl RemoteClient {
    pub fn all(&self) -> Result<Hierarchy> {
        with_retries("load hierarchy", || {
            let resp = self
                .client
                .get(self.url("/all"))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .send()
                .context("send")?;
            self.ensure_ok(resp, "load hierarchy")?
                .json()
                .context("parse hierarchy")
        })
    }

    pub fn create_team(&self, name: &str) -> Result<Team> {
        let resp = self
            .client
            .post(self.url("/team"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&CreateTeamRequest {
                name: name.to_string(),
            })
            .send()
            .context("create team")?;
        let team: Team = self
            .ensure_ok(resp, "create team")?
            .json()
            .context("parse created team")?;
        Ok(team)
    }

    pub fn rename_team(&self, key: &str, name: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/team"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"team": key, "name": name}))
            .send()
            .context("rename team")?;
        let _ = self.ensure_ok(resp, "rename team")?;
        Ok(())
    }

    pub fn delete_team(&self, key: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/team"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"team": key}))
            .send()
            .context("delete team")?;
        let _ = self.ensure_ok(resp, "delete team")?;
        Ok(())
    }

    pub fn create_project(&self, team_key: &str, name: &str) -> Result<Project> {
        let resp = self
            .client
            .post(self.url("/project"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&CreateProjectRequest {
                team: team_key.to_string(),
                name: name.to_string(),
            })
            .send()
            .context("create project")?;
        let project: Project = self
            .ensure_ok(resp, "create project")?
            .json()
            .context("parse created project")?;
        Ok(project)
    }

    pub fn rename_project(&self, key: &str, name: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/project"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"project": key, "name": name}))
            .send()
            .context("rename project")?;
        let _ = self.ensure_ok(resp, "rename project")?;
        Ok(())
    }

    pub fn delete_project(&self, key: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/project"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"project": key}))
            .send()
            .context("delete project")?;
        let _ = self.ensure_ok(resp, "delete project")?;
        Ok(())
    }

    /// Creates a stage under `project_key`. The server addresses the parent by team key and
    /// project segment.
    pub fn create_stage(&self, project_key: &str, name: &str) -> Result<Stage> {
        let team = keys::ancestor_at(project_key, crate::model::EntityKind::Team)
            .context("project key has no team segment")?;
        let resp = self
            .client
            .post(self.url("/stage"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&CreateStageRequest {
                team,
                project: keys::leaf(project_key).to_string(),
                name: name.to_string(),
            })
            .send()
            .context("create stage")?;
        let stage: Stage = self
            .ensure_ok(resp, "create stage")?
            .json()
            .context("parse created stage")?;
        Ok(stage)
    }

    pub fn rename_stage(&self, key: &str, name: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/stage"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"stage": key, "name": name}))
            .send()
            .context("rename stage")?;
        let _ = self.ensure_ok(resp, "rename stage")?;
        Ok(())
    }

    pub fn delete_stage(&self, key: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/stage"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"stage": key}))
            .send()
            .context("delete stage")?;
        let _ = self.ensure_ok(resp, "delete stage")?;
        Ok(())
    }
}
