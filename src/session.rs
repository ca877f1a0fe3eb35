//! The console's on-disk state directory.
//!
//! `config.json` names the remote; `state.json` holds bearer tokens and the last known
//! identity per remote. Both are rewritten atomically.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ConsoleConfig, RemoteConfig, SessionState};

mod tokens;

pub const HOME_ENV: &str = "PORTUNUS_HOME";
const DEFAULT_DIR: &str = ".portunus";

#[derive(Clone, Debug)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Picks the state directory: explicit path, then `$PORTUNUS_HOME`, then `$HOME/.portunus`.
    pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(dir) = std::env::var_os(HOME_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| anyhow!("cannot locate state directory (set {} or pass --home)", HOME_ENV))?;
        Ok(PathBuf::from(home).join(DEFAULT_DIR))
    }

    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default(explicit: Option<&Path>) -> Result<Self> {
        Ok(Self::open(Self::resolve_home(explicit)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let mut cfg: ConsoleConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported console config version {}", cfg.version);
        }

        // A token written into config.json by hand is moved to state.json.
        if let Some(remote) = cfg.remote.as_mut()
            && let Some(token) = remote.token.take()
        {
            self.set_token(remote, &token)
                .context("migrate remote token to state")?;
            self.write_config(&cfg)
                .context("write config after token migration")?;
        }

        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<SessionState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(SessionState::default());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: SessionState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported session state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &SessionState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }

    pub fn require_remote(&self) -> Result<RemoteConfig> {
        let cfg = self.read_config()?;
        cfg.remote
            .context("no remote configured (run `portunus login --url ... --token ...`)")
    }

    pub fn require_remote_and_token(&self) -> Result<(RemoteConfig, String)> {
        let remote = self.require_remote()?;
        let token = self
            .get_token(&remote)?
            .context("not logged in (run `portunus login --url ... --token ...`)")?;
        Ok((remote, token))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/session/session_tests.rs"]
mod tests;
