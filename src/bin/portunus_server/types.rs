use super::*;

/// Authenticated caller, attached to the request by `require_bearer`.
#[derive(Clone, Debug)]
pub(crate) struct Subject {
    pub(crate) user_id: String,
    pub(crate) email: String,
    pub(crate) admin: bool,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) data_dir: PathBuf,

    pub(crate) data: Arc<RwLock<ConsoleData>>,

    pub(crate) users: Arc<RwLock<HashMap<String, User>>>,
    pub(crate) tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
    pub(crate) token_hash_index: Arc<RwLock<HashMap<String, String>>>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) email: String,

    #[serde(default)]
    pub(crate) admin: bool,

    #[serde(default)]
    pub(crate) public_key: Option<String>,

    #[serde(default)]
    pub(crate) audit: bool,

    pub(crate) created_at: String,
}

impl User {
    pub(crate) fn profile(&self) -> UserProfile {
        UserProfile {
            key: self.id.clone(),
            email: self.email.clone(),
            public_key: self.public_key.clone(),
            preferences: UserPreferences { audit: self.audit },
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct AccessToken {
    pub(crate) id: String,
    pub(crate) user_id: String,

    // Stored hash of the bearer token secret.
    pub(crate) token_hash: String,

    #[serde(default)]
    pub(crate) label: Option<String>,

    pub(crate) created_at: String,

    #[serde(default)]
    pub(crate) last_used_at: Option<String>,
}

/// Hierarchy, variables, memberships and audit log, persisted as one document.
///
/// Stages are stored without their `vars`; variables live in `vars` keyed by stage key.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct ConsoleData {
    #[serde(default)]
    pub(crate) teams: Vec<Team>,
    #[serde(default)]
    pub(crate) projects: Vec<Project>,
    #[serde(default)]
    pub(crate) stages: Vec<Stage>,
    #[serde(default)]
    pub(crate) vars: IndexMap<String, KvMap>,

    // Team key -> member emails.
    #[serde(default)]
    pub(crate) members: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub(crate) audit: Vec<AuditEntry>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct AuditEntry {
    #[serde(default)]
    pub(crate) team: Option<String>,

    #[serde(flatten)]
    pub(crate) record: AuditRecord,
}

/// Response extension a handler sets so the audit log can attribute the request.
#[derive(Clone, Debug)]
pub(crate) struct AuditTag {
    pub(crate) team: Option<String>,
    pub(crate) note: String,
}

/// Handler output carrying an audit tag next to the JSON body.
pub(crate) type Tagged<T> = (Extension<AuditTag>, Json<T>);

pub(crate) fn tagged<T>(team: Option<&str>, note: impl Into<String>, body: T) -> Tagged<T> {
    (
        Extension(AuditTag {
            team: team.map(str::to_string),
            note: note.into(),
        }),
        Json(body),
    )
}
