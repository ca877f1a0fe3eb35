use super::*;

/// Typed so the variables keep their order on the wire.
fn env_response(vars: &KvMap) -> EnvResponse {
    EnvResponse {
        vars: vars
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect(),
    }
}

/// Stage address by key segments.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct EnvQuery {
    team: String,
    project: String,
    stage: String,
}

pub(crate) async fn get_env(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<EnvQuery>,
) -> Result<Tagged<EnvResponse>, Response> {
    let stage_key = keys::compose(&keys::compose(&query.team, &query.project), &query.stage);

    let data = state.data.read().await;
    data.ensure_team_access(&query.team, &subject)?;
    if data.stage(&stage_key).is_none() {
        return Err(not_found("stage", &stage_key));
    }
    let vars = data.vars.get(&stage_key).map(env_response).unwrap_or(EnvResponse {
        vars: IndexMap::new(),
    });

    Ok(tagged(
        Some(&query.team),
        format!("read variables of {}", stage_key),
        vars,
    ))
}

pub(crate) async fn put_env(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<PutEnvRequest>,
) -> Result<Tagged<EnvResponse>, Response> {
    let mut data = state.data.write().await;
    if data.stage(&payload.stage).is_none() {
        return Err(not_found("stage", &payload.stage));
    }
    data.ensure_access_below_team(&payload.stage, &subject)?;
    let vars = env_response(data.apply_delta(&payload.stage, &payload.updates));
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    tracing::info!(
        stage = %payload.stage,
        add = payload.updates.add.len(),
        edit = payload.updates.edit.len(),
        remove = payload.updates.remove.len(),
        "variables updated"
    );
    let team = keys::ancestor_at(&payload.stage, EntityKind::Team);
    Ok(tagged(
        team.as_deref(),
        format!(
            "update {} variable(s) of {}",
            payload.updates.change_count(),
            payload.stage
        ),
        vars,
    ))
}
