use super::*;
use crate::model::{AuditRecord, sort_newest_first};

impl RemoteClient {
    /// Audit history for the caller or for one team, newest first.
    pub fn audit_history(&self, scope: AuditScope<'_>) -> Result<Vec<AuditRecord>> {
        let query: Vec<(&str, &str)> = match scope {
            AuditScope::User => vec![("type", "user")],
            AuditScope::Team(team) => vec![("type", "team"), ("team", team)],
        };
        let out: AuditResponse = with_retries("load audit history", || {
            let resp = self
                .client
                .get(self.url("/audit"))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .query(&query)
                .send()
                .context("send")?;
            self.ensure_ok(resp, "load audit history")?
                .json()
                .context("parse audit history")
        })?;
        let mut records = out.audit_history;
        sort_newest_first(&mut records);
        Ok(records)
    }
}
