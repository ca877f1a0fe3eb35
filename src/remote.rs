use anyhow::{Context, Result};

use crate::model::RemoteConfig;

mod http_client;
use self::http_client::with_retries;

mod types;
pub use self::types::*;
mod audit;
mod hierarchy;
mod identity;
mod vars;

/// Blocking client for the console API. Every request carries the bearer token.
pub struct RemoteClient {
    remote: RemoteConfig,
    token: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(remote: RemoteConfig, token: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("portunus")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            remote,
            token,
            client,
        })
    }

    pub fn remote(&self) -> &RemoteConfig {
        &self.remote
    }
}
