#![allow(clippy::result_large_err)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, Query, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use clap::Parser;
use indexmap::IndexMap;
use portunus::kv::{Delta, KvMap};
use portunus::model::{
    AuditRecord, EntityKind, Hierarchy, Project, Stage, StageVars, Team, TeamMember,
    UserPreferences, UserProfile, keys,
};
use portunus::remote::{
    AuditResponse, CreateProjectRequest, CreateStageRequest, CreateTeamRequest, DeletedResponse,
    EnvResponse, MembershipRequest, PutEnvRequest, UserResponse, UsersResponse,
};
use tokio::sync::RwLock;

#[path = "portunus_server/types.rs"]
mod types;
use self::types::*;
#[path = "portunus_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "portunus_server/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "portunus_server/identity_store.rs"]
mod identity_store;
use self::identity_store::*;
#[path = "portunus_server/validators.rs"]
mod validators;
use self::validators::*;
#[path = "portunus_server/data.rs"]
mod data;
#[path = "portunus_server/handlers_system.rs"]
mod handlers_system;
use self::handlers_system::*;
#[path = "portunus_server/handlers_hierarchy.rs"]
mod handlers_hierarchy;
use self::handlers_hierarchy::*;
#[path = "portunus_server/handlers_env.rs"]
mod handlers_env;
use self::handlers_env::*;
#[path = "portunus_server/handlers_identity.rs"]
mod handlers_identity;
use self::handlers_identity::*;
#[path = "portunus_server/handlers_audit.rs"]
mod handlers_audit;
use self::handlers_audit::*;
#[path = "portunus_server/routes.rs"]
mod routes;
use self::routes::*;
#[path = "portunus_server/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
