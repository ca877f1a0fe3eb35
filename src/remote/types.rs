//! Wire payloads that have no home in `model`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::kv::Delta;
use crate::model::{AuditRecord, TeamMember, UserProfile};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /env` answer. Values are decoded loosely and narrowed by the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvResponse {
    #[serde(default)]
    pub vars: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutEnvRequest {
    pub stage: String,
    pub updates: Delta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub team: String,
    pub name: String,
}

/// `project` is the project's key segment, not its full key.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStageRequest {
    pub team: String,
    pub project: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<TeamMember>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub team: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    #[serde(rename = "auditHistory", default)]
    pub audit_history: Vec<AuditRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditScope<'a> {
    User,
    Team(&'a str),
}
