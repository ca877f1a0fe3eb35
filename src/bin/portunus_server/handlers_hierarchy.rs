use super::*;

#[derive(Debug, serde::Deserialize)]
pub(crate) struct TeamRef {
    team: String,

    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ProjectRef {
    project: String,

    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct StageRef {
    stage: String,

    #[serde(default)]
    name: Option<String>,
}

fn required_name(name: Option<String>) -> Result<String, Response> {
    name.map(|n| n.trim().to_string())
        .ok_or_else(|| bad_request(anyhow::anyhow!("missing name")))
}

pub(crate) async fn get_all(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Json<Hierarchy> {
    let data = state.data.read().await;
    Json(data.visible_to(&subject))
}

pub(crate) async fn create_team(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<Tagged<Team>, Response> {
    let name = payload.name.trim();
    validate_team_name(name).map_err(bad_request)?;
    let key = random_hex(8).map_err(internal_error)?;
    let team = Team {
        key: key.clone(),
        name: name.to_string(),
        audit: None,
    };

    let mut data = state.data.write().await;
    data.teams.push(team.clone());
    data.add_member(&key, &subject.email);
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    tracing::info!(team = %key, by = %subject.email, "team created");
    Ok(tagged(Some(&key), format!("create team {}", name), team))
}

pub(crate) async fn rename_team(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<TeamRef>,
) -> Result<Tagged<Team>, Response> {
    let name = required_name(payload.name)?;
    validate_team_name(&name).map_err(bad_request)?;

    let mut data = state.data.write().await;
    data.ensure_team_access(&payload.team, &subject)?;
    let Some(team) = data.teams.iter_mut().find(|t| t.key == payload.team) else {
        return Err(not_found("team", &payload.team));
    };
    team.name = name.clone();
    let team = team.clone();
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&team.key.clone()),
        format!("rename team {} to {}", team.key, name),
        team,
    ))
}

pub(crate) async fn delete_team(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<TeamRef>,
) -> Result<Tagged<DeletedResponse>, Response> {
    let mut data = state.data.write().await;
    data.ensure_team_access(&payload.team, &subject)?;
    data.remove_team(&payload.team);
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    tracing::info!(team = %payload.team, by = %subject.email, "team deleted");
    let key = payload.team;
    Ok(tagged(
        Some(&key),
        format!("delete team {}", key),
        DeletedResponse { key: key.clone() },
    ))
}

pub(crate) async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Tagged<Project>, Response> {
    let name = payload.name.trim();
    validate_segment_name(EntityKind::Project, name).map_err(bad_request)?;

    let mut data = state.data.write().await;
    data.ensure_team_access(&payload.team, &subject)?;
    let key = keys::compose(&payload.team, name);
    if data.project(&key).is_some() {
        return Err(conflict(format!("project {} already exists", key)));
    }
    let project = Project {
        key: key.clone(),
        project: name.to_string(),
        team: payload.team.clone(),
    };
    data.projects.push(project.clone());
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&payload.team),
        format!("create project {}", key),
        project,
    ))
}

pub(crate) async fn rename_project(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<ProjectRef>,
) -> Result<Tagged<Project>, Response> {
    let name = required_name(payload.name)?;
    validate_segment_name(EntityKind::Project, &name).map_err(bad_request)?;

    let mut data = state.data.write().await;
    if data.project(&payload.project).is_none() {
        return Err(not_found("project", &payload.project));
    }
    data.ensure_access_below_team(&payload.project, &subject)?;
    let Some(project) = data.projects.iter_mut().find(|p| p.key == payload.project) else {
        return Err(not_found("project", &payload.project));
    };
    project.project = name.clone();
    let project = project.clone();
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&project.team.clone()),
        format!("rename project {} to {}", project.key, name),
        project,
    ))
}

pub(crate) async fn delete_project(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<ProjectRef>,
) -> Result<Tagged<DeletedResponse>, Response> {
    let mut data = state.data.write().await;
    let Some(team) = data.project(&payload.project).map(|p| p.team.clone()) else {
        return Err(not_found("project", &payload.project));
    };
    data.ensure_access_below_team(&payload.project, &subject)?;
    data.remove_project(&payload.project);
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&team),
        format!("delete project {}", payload.project),
        DeletedResponse {
            key: payload.project,
        },
    ))
}

pub(crate) async fn create_stage(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<CreateStageRequest>,
) -> Result<Tagged<Stage>, Response> {
    let name = payload.name.trim();
    validate_segment_name(EntityKind::Stage, name).map_err(bad_request)?;

    let mut data = state.data.write().await;
    data.ensure_team_access(&payload.team, &subject)?;
    let project_key = keys::compose(&payload.team, &payload.project);
    if data.project(&project_key).is_none() {
        return Err(not_found("project", &project_key));
    }
    let key = keys::compose(&project_key, name);
    if data.stage(&key).is_some() {
        return Err(conflict(format!("stage {} already exists", key)));
    }
    let stage = Stage {
        key: key.clone(),
        stage: name.to_string(),
        project: project_key,
        team: Some(payload.team.clone()),
        vars: None,
    };
    data.stages.push(stage.clone());
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        Some(&payload.team),
        format!("create stage {}", key),
        stage,
    ))
}

pub(crate) async fn rename_stage(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<StageRef>,
) -> Result<Tagged<Stage>, Response> {
    let name = required_name(payload.name)?;
    validate_segment_name(EntityKind::Stage, &name).map_err(bad_request)?;

    let mut data = state.data.write().await;
    if data.stage(&payload.stage).is_none() {
        return Err(not_found("stage", &payload.stage));
    }
    data.ensure_access_below_team(&payload.stage, &subject)?;
    let Some(stage) = data.stages.iter_mut().find(|s| s.key == payload.stage) else {
        return Err(not_found("stage", &payload.stage));
    };
    stage.stage = name.clone();
    let stage = stage.clone();
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    Ok(tagged(
        stage.team.clone().as_deref(),
        format!("rename stage {} to {}", stage.key, name),
        stage,
    ))
}

pub(crate) async fn delete_stage(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(payload): Json<StageRef>,
) -> Result<Tagged<DeletedResponse>, Response> {
    let mut data = state.data.write().await;
    if data.stage(&payload.stage).is_none() {
        return Err(not_found("stage", &payload.stage));
    }
    data.ensure_access_below_team(&payload.stage, &subject)?;
    data.remove_stage(&payload.stage);
    persist_data(&state.data_dir, &data).map_err(internal_error)?;

    let team = keys::ancestor_at(&payload.stage, EntityKind::Team);
    Ok(tagged(
        team.as_deref(),
        format!("delete stage {}", payload.stage),
        DeletedResponse {
            key: payload.stage,
        },
    ))
}
