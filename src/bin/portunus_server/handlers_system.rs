use super::*;

pub(crate) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(crate) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };

    let Ok(value) = value.to_str() else {
        return unauthorized();
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let token_hash = hash_token(token);

    let token_id = {
        let idx = state.token_hash_index.read().await;
        idx.get(&token_hash).cloned()
    };
    let Some(token_id) = token_id else {
        return unauthorized();
    };

    let user_id = {
        let tokens = state.tokens.read().await;
        let Some(t) = tokens.get(&token_id) else {
            return unauthorized();
        };
        t.user_id.clone()
    };

    let subject = {
        let users = state.users.read().await;
        let Some(u) = users.get(&user_id) else {
            return unauthorized();
        };
        Subject {
            user_id: u.id.clone(),
            email: u.email.clone(),
            admin: u.admin,
        }
    };

    // In-memory only.
    {
        let mut tokens = state.tokens.write().await;
        if let Some(t) = tokens.get_mut(&token_id) {
            t.last_used_at = Some(now_ts());
        }
    }

    let mut req = req;
    req.extensions_mut().insert(subject);
    next.run(req).await
}

/// Whether a request belongs in the audit log: every write, and every variable read.
pub(crate) fn is_audited(method: &Method, path: &str) -> bool {
    method != Method::GET || path == "/env"
}

/// Appends one audit record per audited request, after the handler ran.
///
/// Successful handlers attach an [`AuditTag`] naming the team and the action; failures are
/// logged with their status instead.
pub(crate) async fn record_audit(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    if !is_audited(req.method(), req.uri().path()) {
        return next.run(req).await;
    }
    let method = req.method().to_string();
    let url = req.uri().to_string();
    let start = now_ts();

    let resp = next.run(req).await;

    let (team, explanation) = match resp.extensions().get::<AuditTag>() {
        Some(tag) => (tag.team.clone(), tag.note.clone()),
        None => (None, format!("failed ({})", resp.status())),
    };
    let record = AuditRecord {
        email: subject.email,
        start,
        end: now_ts(),
        explanation,
        method,
        url,
    };

    let mut data = state.data.write().await;
    data.record_audit(team, record);
    if let Err(err) = persist_data(&state.data_dir, &data) {
        tracing::warn!(error = %format!("{:#}", err), "audit record not persisted");
    }
    resp
}
