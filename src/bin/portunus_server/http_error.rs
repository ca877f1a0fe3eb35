use super::*;

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({"error": msg.into()}))).into_response()
}

pub(crate) fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "unauthorized")
}

pub(crate) fn internal_error(err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

pub(crate) fn bad_request(err: anyhow::Error) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

pub(crate) fn forbidden() -> Response {
    error_response(StatusCode::FORBIDDEN, "not a member of this team")
}

pub(crate) fn not_found(kind: &str, key: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("{} {} not found", kind, key))
}

pub(crate) fn conflict(msg: impl Into<String>) -> Response {
    error_response(StatusCode::CONFLICT, msg)
}
