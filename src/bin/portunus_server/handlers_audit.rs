use super::*;

#[derive(Debug, serde::Deserialize)]
pub(crate) struct AuditQuery {
    #[serde(rename = "type")]
    scope: String,

    #[serde(default)]
    team: Option<String>,
}

pub(crate) async fn get_audit(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<AuditResponse>, Response> {
    let data = state.data.read().await;
    let mut records: Vec<AuditRecord> = match query.scope.as_str() {
        "user" => data
            .audit
            .iter()
            .filter(|e| e.record.email == subject.email)
            .map(|e| e.record.clone())
            .collect(),
        "team" => {
            let Some(team) = query.team.as_deref() else {
                return Err(bad_request(anyhow::anyhow!("missing team")));
            };
            data.ensure_team_access(team, &subject)?;
            data.audit
                .iter()
                .filter(|e| e.team.as_deref() == Some(team))
                .map(|e| e.record.clone())
                .collect()
        }
        other => {
            return Err(bad_request(anyhow::anyhow!(
                "unknown audit type {} (expected user|team)",
                other
            )));
        }
    };
    portunus::model::sort_newest_first(&mut records);
    Ok(Json(AuditResponse {
        audit_history: records,
    }))
}
