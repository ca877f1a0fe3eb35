use super::*;

#[test]
fn segment_names_reject_separator_and_blank() {
    assert!(validate_segment_name(EntityKind::Project, "Web").is_ok());
    assert!(validate_segment_name(EntityKind::Stage, "prod-eu").is_ok());

    let err = validate_segment_name(EntityKind::Stage, "a::b").unwrap_err();
    assert!(err.to_string().contains("stage name cannot contain"));
    let err = validate_segment_name(EntityKind::Project, "  ").unwrap_err();
    assert_eq!(err.to_string(), "project name cannot be empty");
}

#[test]
fn team_names_only_need_content() {
    assert!(validate_team_name("Acme::Ops").is_ok());
    assert!(validate_team_name("").is_err());
}

#[test]
fn emails_cannot_be_blank_or_spaced() {
    assert!(validate_email("ana@example.com").is_ok());
    assert!(validate_email("").is_err());
    assert!(validate_email("ana @example.com").is_err());
}
