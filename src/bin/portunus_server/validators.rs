use super::*;

pub(crate) fn validate_team_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow::anyhow!("team name cannot be empty"));
    }
    Ok(())
}

/// Project and stage names become key segments.
pub(crate) fn validate_segment_name(kind: EntityKind, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow::anyhow!("{} name cannot be empty", kind));
    }
    if !keys::is_valid_segment(name) {
        return Err(anyhow::anyhow!(
            "{} name cannot contain `{}`",
            kind,
            keys::KEY_SEPARATOR
        ));
    }
    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(anyhow::anyhow!("email cannot be empty"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(anyhow::anyhow!("email cannot contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/bin/portunus_server/validators_tests.rs"]
mod tests;
