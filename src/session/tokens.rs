use anyhow::Result;

use crate::model::RemoteConfig;

use super::SessionStore;

impl SessionStore {
    fn token_key(remote: &RemoteConfig) -> String {
        remote.base_url.trim_end_matches('/').to_string()
    }

    pub fn get_token(&self, remote: &RemoteConfig) -> Result<Option<String>> {
        let st = self.read_state()?;
        Ok(st.tokens.get(&Self::token_key(remote)).cloned())
    }

    pub fn set_token(&self, remote: &RemoteConfig, token: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.tokens.insert(Self::token_key(remote), token.to_string());
        self.write_state(&st)
    }

    pub fn clear_token(&self, remote: &RemoteConfig) -> Result<()> {
        let mut st = self.read_state()?;
        let key = Self::token_key(remote);
        st.tokens.remove(&key);
        st.identities.remove(&key);
        self.write_state(&st)
    }

    pub fn set_identity(&self, remote: &RemoteConfig, email: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.identities.insert(Self::token_key(remote), email.to_string());
        self.write_state(&st)
    }

    /// Email remembered from the last successful login against the configured remote.
    pub fn current_identity(&self) -> Result<Option<String>> {
        let Some(remote) = self.read_config()?.remote else {
            return Ok(None);
        };
        let st = self.read_state()?;
        Ok(st.identities.get(&Self::token_key(&remote)).cloned())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        match self.read_config()?.remote {
            Some(remote) => Ok(self.get_token(&remote)?.is_some()),
            None => Ok(false),
        }
    }

    /// Points the console at `remote` and stores its token.
    pub fn login(&self, remote: RemoteConfig, token: &str) -> Result<()> {
        let mut cfg = self.read_config()?;
        self.set_token(&remote, token)?;
        cfg.remote = Some(RemoteConfig {
            token: None,
            ..remote
        });
        self.write_config(&cfg)
    }

    /// Forgets the token for the configured remote. The remote itself stays configured.
    pub fn logout(&self) -> Result<bool> {
        let Some(remote) = self.read_config()?.remote else {
            return Ok(false);
        };
        let had = self.get_token(&remote)?.is_some();
        self.clear_token(&remote)?;
        Ok(had)
    }
}
