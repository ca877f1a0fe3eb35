//! Identity, profile and team membership operations.

use super::*;
use crate::model::{TeamMember, UserProfile, WhoAmI};

impl RemoteClient {
    pub fn whoami(&self) -> Result<WhoAmI> {
        let resp = self
            .client
            .get(self.url("/whoami"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("whoami")?;
        let w: WhoAmI = self
            .ensure_ok(resp, "whoami")?
            .json()
            .context("parse whoami")?;
        Ok(w)
    }

    pub fn get_user(&self) -> Result<UserProfile> {
        let out: UserResponse = with_retries("load user", || {
            let resp = self
                .client
                .get(self.url("/user"))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .send()
                .context("send")?;
            self.ensure_ok(resp, "load user")?
                .json()
                .context("parse user")
        })?;
        Ok(out.user)
    }

    pub fn set_public_key(&self, public_key: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/user/key"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"public_key": public_key}))
            .send()
            .context("set public key")?;
        let _ = self.ensure_ok(resp, "set public key")?;
        Ok(())
    }

    pub fn delete_public_key(&self) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/user/key"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .send()
            .context("delete public key")?;
        let _ = self.ensure_ok(resp, "delete public key")?;
        Ok(())
    }

    pub fn set_audit_preference(&self, audit: bool) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/user/audit"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&serde_json::json!({"audit": audit}))
            .send()
            .context("set audit preference")?;
        let _ = self.ensure_ok(resp, "set audit preference")?;
        Ok(())
    }

    pub fn list_team_members(&self, team_key: &str) -> Result<Vec<TeamMember>> {
        let out: UsersResponse = with_retries("list team members", || {
            let resp = self
                .client
                .get(self.url("/users"))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .query(&[("team", team_key)])
                .send()
                .context("send")?;
            if resp.status() == reqwest::StatusCode::NOT_FOUND {
                anyhow::bail!("team {} not found", team_key);
            }
            self.ensure_ok(resp, "list team members")?
                .json()
                .context("parse team members")
        })?;
        Ok(out.users)
    }

    pub fn add_team_member(&self, team_key: &str, email: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/team/user"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&MembershipRequest {
                team: team_key.to_string(),
                email: email.to_string(),
            })
            .send()
            .context("add team member")?;
        let _ = self.ensure_ok(resp, "add team member")?;
        Ok(())
    }

    pub fn remove_team_member(&self, team_key: &str, email: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url("/team/user"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&MembershipRequest {
                team: team_key.to_string(),
                email: email.to_string(),
            })
            .send()
            .context("remove team member")?;
        let _ = self.ensure_ok(resp, "remove team member")?;
        Ok(())
    }
}
