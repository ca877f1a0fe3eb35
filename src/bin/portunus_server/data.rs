use super::*;

fn team_of(key: &str) -> Option<String> {
    keys::ancestor_at(key, EntityKind::Team)
}

impl ConsoleData {
    pub(crate) fn team(&self, key: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == key)
    }

    pub(crate) fn project(&self, key: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.key == key)
    }

    pub(crate) fn stage(&self, key: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.key == key)
    }

    pub(crate) fn is_member(&self, team_key: &str, email: &str) -> bool {
        self.members
            .get(team_key)
            .is_some_and(|m| m.iter().any(|e| e == email))
    }

    pub(crate) fn can_access(&self, team_key: &str, subject: &Subject) -> bool {
        subject.admin || self.is_member(team_key, &subject.email)
    }

    /// 404 for an unknown team, 403 when the subject may not touch it.
    pub(crate) fn ensure_team_access(
        &self,
        team_key: &str,
        subject: &Subject,
    ) -> Result<(), Response> {
        if self.team(team_key).is_none() {
            return Err(not_found("team", team_key));
        }
        if !self.can_access(team_key, subject) {
            return Err(forbidden());
        }
        Ok(())
    }

    /// Access check for a project or stage, through the team its key starts with.
    pub(crate) fn ensure_access_below_team(
        &self,
        key: &str,
        subject: &Subject,
    ) -> Result<(), Response> {
        match team_of(key) {
            Some(team) if self.can_access(&team, subject) => Ok(()),
            Some(_) => Err(forbidden()),
            None => Err(bad_request(anyhow::anyhow!("malformed key {}", key))),
        }
    }

    /// What `GET /all` shows the subject. Stages carry their variable count.
    pub(crate) fn visible_to(&self, subject: &Subject) -> Hierarchy {
        let teams: Vec<Team> = self
            .teams
            .iter()
            .filter(|t| self.can_access(&t.key, subject))
            .cloned()
            .collect();
        let visible = |key: &str| {
            team_of(key).is_some_and(|team| teams.iter().any(|t| t.key == team))
        };
        let projects = self
            .projects
            .iter()
            .filter(|p| visible(p.key.as_str()))
            .cloned()
            .collect();
        let stages = self
            .stages
            .iter()
            .filter(|s| visible(s.key.as_str()))
            .map(|s| Stage {
                vars: Some(StageVars::Count(
                    self.vars.get(&s.key).map_or(0, |v| v.len() as u64),
                )),
                ..s.clone()
            })
            .collect();
        Hierarchy {
            teams,
            projects,
            stages,
        }
    }

    pub(crate) fn add_member(&mut self, team_key: &str, email: &str) -> bool {
        if self.is_member(team_key, email) {
            return false;
        }
        self.members
            .entry(team_key.to_string())
            .or_default()
            .push(email.to_string());
        true
    }

    pub(crate) fn remove_member(&mut self, team_key: &str, email: &str) -> bool {
        let Some(members) = self.members.get_mut(team_key) else {
            return false;
        };
        let before = members.len();
        members.retain(|e| e != email);
        members.len() != before
    }

    /// Removes the team and everything under it.
    pub(crate) fn remove_team(&mut self, key: &str) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.key != key);
        if self.teams.len() == before {
            return false;
        }
        let under = |k: &str| team_of(k).as_deref() == Some(key);
        self.projects.retain(|p| !under(p.key.as_str()));
        self.stages.retain(|s| !under(s.key.as_str()));
        self.vars.retain(|k, _| !under(k.as_str()));
        self.members.shift_remove(key);
        true
    }

    /// Removes the project, its stages and their variables.
    pub(crate) fn remove_project(&mut self, key: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.key != key);
        if self.projects.len() == before {
            return false;
        }
        self.stages.retain(|s| !keys::is_child_of(&s.key, key));
        self.vars.retain(|k, _| !keys::is_child_of(k, key));
        true
    }

    pub(crate) fn remove_stage(&mut self, key: &str) -> bool {
        let before = self.stages.len();
        self.stages.retain(|s| s.key != key);
        if self.stages.len() == before {
            return false;
        }
        self.vars.shift_remove(key);
        true
    }

    /// Applies a delta to a stage's variables and returns the result.
    pub(crate) fn apply_delta(&mut self, stage_key: &str, delta: &Delta) -> &KvMap {
        let vars = self.vars.entry(stage_key.to_string()).or_default();
        delta.apply_to(vars);
        vars
    }

    pub(crate) fn record_audit(&mut self, team: Option<String>, record: AuditRecord) {
        self.audit.push(AuditEntry { team, record });
    }
}

#[cfg(test)]
#[path = "../../tests/bin/portunus_server/data_tests.rs"]
mod tests;
