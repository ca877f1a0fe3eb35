use super::*;

/// Runs an idempotent request up to three times with exponential backoff.
pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) => {
                tracing::debug!(label, attempt = i + 1, error = %format!("{:#}", err), "request failed");
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

impl RemoteClient {
    /// Turns a non-2xx response into an error carrying the server's `{error}` message.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.json::<ErrorBody>().ok().map(|b| b.error);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            anyhow::bail!(
                "unauthorized (token invalid/expired; run `portunus login --url ... --token ...`)"
            );
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            anyhow::bail!(
                "forbidden ({})",
                message.as_deref().unwrap_or("insufficient permissions; check team membership")
            );
        }
        match message {
            Some(msg) => anyhow::bail!("{} failed ({}): {}", label, status, msg),
            None => anyhow::bail!("{} failed ({})", label, status),
        }
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url, path)
    }
}
