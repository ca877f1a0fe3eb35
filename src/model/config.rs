use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remote: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,

    // Token is stored in session state, not config.json.
    // Kept as an optional field so hand-written config files still parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,

    /// Bearer tokens keyed by remote base url.
    #[serde(default)]
    pub tokens: HashMap<String, String>,

    /// Last identity reported by the remote for each base url.
    #[serde(default)]
    pub identities: HashMap<String, String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: 1,
            tokens: HashMap::new(),
            identities: HashMap::new(),
        }
    }
}
