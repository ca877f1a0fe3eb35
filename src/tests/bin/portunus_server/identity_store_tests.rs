use super::*;

#[test]
fn token_hash_is_stable_hex() {
    let a = hash_token("secret");
    assert_eq!(a, hash_token("secret"));
    assert_ne!(a, hash_token("other"));
    assert_eq!(a.len(), 64);
}

#[test]
fn bootstrap_identity_links_token_to_admin() {
    let (user, token) = bootstrap_identity("dev@localhost", "dev");
    assert!(user.admin);
    assert_eq!(user.email, "dev@localhost");
    assert_eq!(token.user_id, user.id);
    assert_eq!(token.token_hash, hash_token("dev"));
    assert_eq!(token.label.as_deref(), Some("bootstrap"));
}

#[test]
fn new_users_are_not_admins() {
    let user = new_user("ana@example.com", false, &now_ts());
    assert!(!user.admin);
    assert!(user.public_key.is_none());
    assert!(!user.audit);
}

#[test]
fn random_hex_has_requested_width() {
    let a = random_hex(8).expect("random");
    let b = random_hex(8).expect("random");
    assert_eq!(a.len(), 16);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}
