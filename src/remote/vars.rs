//! Stage variables.

use super::*;
use crate::kv::{Delta, KvMap, scalar_map};
use crate::model::{EntityKind, keys};

impl RemoteClient {
    /// Loads the persisted variables of the stage with composite key `stage_key`.
    ///
    /// The query carries the key segments, so display-name renames do not break lookups.
    pub fn get_env(&self, stage_key: &str) -> Result<KvMap> {
        let team = keys::ancestor_at(stage_key, EntityKind::Team)
            .context("stage key has no team segment")?;
        let project = keys::ancestor_at(stage_key, EntityKind::Project)
            .context("stage key has no project segment")?;
        let query = [
            ("team", team.as_str()),
            ("project", keys::leaf(&project)),
            ("stage", keys::leaf(stage_key)),
        ];

        let body: EnvResponse = with_retries(&format!("load variables of {}", stage_key), || {
            let resp = self
                .client
                .get(self.url("/env"))
                .header(reqwest::header::AUTHORIZATION, self.auth())
                .query(&query)
                .send()
                .context("send")?;
            self.ensure_ok(resp, "load variables")?
                .json()
                .context("parse variables")
        })?;
        scalar_map(body.vars).context("variables returned by the server")
    }

    /// Submits one delta for the stage. Not retried: the server applies it as sent.
    pub fn put_env(&self, stage_key: &str, delta: &Delta) -> Result<()> {
        let resp = self
            .client
            .put(self.url("/env"))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .json(&PutEnvRequest {
                stage: stage_key.to_string(),
                updates: delta.clone(),
            })
            .send()
            .context("save variables")?;
        let _ = self.ensure_ok(resp, "save variables")?;
        Ok(())
    }
}
