use super::*;

pub(crate) async fn whoami(Extension(subject): Extension<Subject>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "email": subject.email,
        "user_id": subject.user_id,
        "admin": subject.admin,
    }))
}

pub(crate) async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<UserResponse>, Response> {
    let users = state.users.read().await;
    let Some(user) = users.get(&subject.user_id) else {
        return Err(unauthorized());
    };
    Ok(Json(UserResponse {
        user: user.profile(),
    }))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct PublicKeyRequest {
    public_key: String,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct AuditPreferenceRequest {
    audit: bool,
}

/// Applies `f` to the caller's user record and persists the identity store.
async fn update_user(
    state: &AppState,
    subject: &Subject,
    f: impl FnOnce(&mut User),
) -> Result<UserResponse, Response> {
    let mut users = state.users.write().await;
    let Some(user) = users.get_mut(&subject.user_id) else {
        return Err(unauthorized());
    };
    f(user);
    let profile = user.profile();

    let tokens = state.tokens.read().await;
    persist_identity_to_disk(&state.data_dir, &users, &tokens).map_err(internal_error)?;
    Ok(UserResponse { user: profile })
}

pub(crate) async fn set_public_key(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<PublicKeyRequest>,
) -> Result<Tagged<UserResponse>, Response> {
    let key = payload.public_key.trim().to_string();
    if key.is_empty() {
        return Err(bad_request(anyhow::anyhow!("public key cannot be empty")));
    }
    let out = update_user(&state, &subject, |u| u.public_key = Some(key)).await?;
    Ok(tagged(None, "set public key", out))
}

pub(crate) async fn delete_public_key(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<Tagged<UserResponse>, Response> {
    let out = update_user(&state, &subject, |u| u.public_key = None).await?;
    Ok(tagged(None, "delete public key", out))
}

pub(crate) async fn set_audit_preference(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<AuditPreferenceRequest>,
) -> Result<Tagged<UserResponse>, Response> {
    let out = update_user(&state, &subject, |u| u.audit = payload.audit).await?;
    let note = if payload.audit {
        "enable audit"
    } else {
        "disable audit"
    };
    Ok(tagged(None, note, out))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct TeamQuery {
    team: String,
}

pub(crate) async fn list_team_members(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<TeamQuery>,
) -> Result<Json<UsersResponse>, Response> {
    let data = state.data.read().await;
    data.ensure_team_access(&query.team, &subject)?;
    let users = state.users.read().await;

    let members = data
        .members
        .get(&query.team)
        .map(|emails| {
            emails
                .iter()
                .map(|email| TeamMember {
                    email: email.clone(),
                    admin: users.values().any(|u| &u.email == email && u.admin),
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(UsersResponse { users: members }))
}

pub(crate) async fn add_team_member(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<MembershipRequest>,
) -> Result<Tagged<serde_json::Value>, Response> {
    let email = payload.email.trim();
    validate_email(email).map_err(bad_request)?;

    {
        let mut data = state.data.write().await;
        data.ensure_team_access(&payload.team, &subject)?;
        if !data.add_member(&payload.team, email) {
            return Err(conflict(format!(
                "{} is already a member of {}",
                email, payload.team
            )));
        }
        persist_data(&state.data_dir, &data).map_err(internal_error)?;
    }

    // Members without an account get a token-less user record.
    {
        let mut users = state.users.write().await;
        if !users.values().any(|u| u.email == email) {
            let user = new_user(email, false, &now_ts());
            users.insert(user.id.clone(), user);
            let tokens = state.tokens.read().await;
            persist_identity_to_disk(&state.data_dir, &users, &tokens).map_err(internal_error)?;
        }
    }

    Ok(tagged(
        Some(&payload.team),
        format!("add {} to team", email),
        serde_json::json!({"team": payload.team, "email": email}),
    ))
}

pub(crate) async fn remove_team_member(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<MembershipRequest>,
) -> Result<Tagged<serde_json::Value>, Response> {
    let email = payload.email.trim();

    let mut data = state.data.write().await;
    data.ensure_team_access(&payload.team, &subject)?;
    if !data.remove_member(&payload.team, email) {
        return Err(not_found("member", email));
    }
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&payload.team),
        format!("remove {} from team", email),
        serde_json::json!({"team": payload.team, "email": email}),
    ))
}
