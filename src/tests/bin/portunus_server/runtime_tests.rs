use std::path::PathBuf;

use tempfile::tempdir;

use super::*;

fn args_with_data_dir(data_dir: PathBuf) -> Args {
    Args {
        addr: "127.0.0.1:0".parse().expect("parse socket addr"),
        addr_file: None,
        data_dir,
        dev_user: "dev@localhost".to_string(),
        dev_token: "dev-token".to_string(),
        log_level: "info".to_string(),
    }
}

#[test]
fn load_or_bootstrap_identity_seeds_admin_on_first_start() {
    let temp = tempdir().expect("create temp dir");
    let args = args_with_data_dir(temp.path().to_path_buf());

    let (users, tokens) = load_or_bootstrap_identity(&args).expect("load identity");

    assert_eq!(users.len(), 1);
    assert_eq!(tokens.len(), 1);
    let admin = users.values().next().expect("admin");
    assert_eq!(admin.email, "dev@localhost");
    assert!(admin.admin);
    assert!(
        tokens
            .values()
            .any(|t| t.token_hash == hash_token("dev-token"))
    );

    assert!(identity_users_path(temp.path()).exists());
    assert!(identity_tokens_path(temp.path()).exists());
}

#[test]
fn load_or_bootstrap_identity_reuses_persisted_identity() {
    let temp = tempdir().expect("create temp dir");
    let args = args_with_data_dir(temp.path().to_path_buf());
    let (first_users, _) = load_or_bootstrap_identity(&args).expect("first start");

    let mut args = args_with_data_dir(temp.path().to_path_buf());
    args.dev_token = "other-token".to_string();
    let (users, tokens) = load_or_bootstrap_identity(&args).expect("second start");

    assert_eq!(
        users.keys().collect::<Vec<_>>(),
        first_users.keys().collect::<Vec<_>>()
    );
    assert!(
        tokens
            .values()
            .all(|t| t.token_hash != hash_token("other-token"))
    );
}

#[test]
fn build_state_indexes_tokens_by_hash() {
    let temp = tempdir().expect("create temp dir");
    let args = args_with_data_dir(temp.path().to_path_buf());
    let (users, tokens) = load_or_bootstrap_identity(&args).expect("load identity");
    let token_id = tokens.keys().next().cloned().expect("token");

    let state = build_state(&args, users, tokens, ConsoleData::default());
    let index = state.token_hash_index.try_read().expect("unlocked");
    assert_eq!(index.get(&hash_token("dev-token")), Some(&token_id));
}
