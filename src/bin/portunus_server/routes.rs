//! Authenticated HTTP route registration.

use super::*;

pub(crate) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/all", get(get_all))
        .route(
            "/team",
            post(create_team).put(rename_team).delete(delete_team),
        )
        .route(
            "/project",
            post(create_project)
                .put(rename_project)
                .delete(delete_project),
        )
        .route(
            "/stage",
            post(create_stage).put(rename_stage).delete(delete_stage),
        )
        .route("/env", get(get_env).put(put_env))
        .route("/users", get(list_team_members))
        .route(
            "/team/user",
            post(add_team_member).delete(remove_team_member),
        )
        .route("/user", get(get_user))
        .route(
            "/user/key",
            put(set_public_key).delete(delete_public_key),
        )
        .route("/user/audit", put(set_audit_preference))
        .route("/audit", get(get_audit))
        .layer(middleware::from_fn_with_state(state.clone(), record_audit))
        .layer(middleware::from_fn_with_state(state, require_bearer))
}

pub(crate) fn build_app_router(state: Arc<AppState>) -> Router {
    let authed = authed_router(state.clone());
    Router::new()
        .route("/healthz", get(healthz))
        .merge(authed)
        .with_state(state)
}
