use super::*;

pub(crate) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(crate) fn hash_token(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

pub(crate) fn identity_users_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("users.json")
}

pub(crate) fn identity_tokens_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("tokens.json")
}

pub(crate) fn load_identity_from_disk(
    data_dir: &std::path::Path,
) -> Result<(HashMap<String, User>, HashMap<String, AccessToken>)> {
    let users: HashMap<String, User> = if identity_users_path(data_dir).exists() {
        let bytes = std::fs::read(identity_users_path(data_dir)).context("read users.json")?;
        let list: Vec<User> = serde_json::from_slice(&bytes).context("parse users.json")?;
        list.into_iter().map(|u| (u.id.clone(), u)).collect()
    } else {
        HashMap::new()
    };

    let tokens: HashMap<String, AccessToken> = if identity_tokens_path(data_dir).exists() {
        let bytes = std::fs::read(identity_tokens_path(data_dir)).context("read tokens.json")?;
        let list: Vec<AccessToken> = serde_json::from_slice(&bytes).context("parse tokens.json")?;
        list.into_iter().map(|t| (t.id.clone(), t)).collect()
    } else {
        HashMap::new()
    };

    Ok((users, tokens))
}

pub(crate) fn persist_identity_to_disk(
    data_dir: &std::path::Path,
    users: &HashMap<String, User>,
    tokens: &HashMap<String, AccessToken>,
) -> Result<()> {
    let mut user_list: Vec<User> = users.values().cloned().collect();
    user_list.sort_by(|a, b| a.email.cmp(&b.email));
    let users_bytes = serde_json::to_vec_pretty(&user_list).context("serialize users")?;
    write_atomic_overwrite(&identity_users_path(data_dir), &users_bytes)
        .context("write users.json")?;

    let mut token_list: Vec<AccessToken> = tokens.values().cloned().collect();
    token_list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    let tokens_bytes = serde_json::to_vec_pretty(&token_list).context("serialize tokens")?;
    write_atomic_overwrite(&identity_tokens_path(data_dir), &tokens_bytes)
        .context("write tokens.json")?;

    Ok(())
}

/// Admin user plus a token for `token_secret`. Ids are content hashes.
pub(crate) fn bootstrap_identity(email: &str, token_secret: &str) -> (User, AccessToken) {
    let created_at = now_ts();
    let user = new_user(email, true, &created_at);

    let token_hash = hash_token(token_secret);
    let token_id = {
        let mut h = blake3::Hasher::new();
        h.update(user.id.as_bytes());
        h.update(b"\n");
        h.update(token_hash.as_bytes());
        h.finalize().to_hex().to_string()
    };
    let token = AccessToken {
        id: token_id,
        user_id: user.id.clone(),
        token_hash,
        label: Some("bootstrap".to_string()),
        created_at,
        last_used_at: None,
    };

    (user, token)
}

/// User record without a token, as created when someone is added to a team.
pub(crate) fn new_user(email: &str, admin: bool, created_at: &str) -> User {
    let id = {
        let mut h = blake3::Hasher::new();
        h.update(email.as_bytes());
        h.update(b"\n");
        h.update(created_at.as_bytes());
        h.finalize().to_hex().to_string()
    };
    User {
        id,
        email: email.to_string(),
        admin,
        public_key: None,
        audit: false,
        created_at: created_at.to_string(),
    }
}

/// `n` random bytes, hex-encoded.
pub(crate) fn random_hex(n: usize) -> Result<String> {
    let mut bytes = vec![0u8; n];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(n * 2);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/bin/portunus_server/identity_store_tests.rs"]
mod tests;
