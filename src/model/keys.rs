//! Composite entity keys.
//!
//! A project key is `<teamKey>::<projectName>` and a stage key is
//! `<projectKey>::<stageName>`. The hierarchy store and the remote client recover ancestors
//! from a key alone, so every key that enters the system has to keep this shape.

use super::EntityKind;

pub const KEY_SEPARATOR: &str = "::";

/// Joins a parent key and a child segment.
pub fn compose(parent: &str, segment: &str) -> String {
    format!("{}{}{}", parent, KEY_SEPARATOR, segment)
}

pub fn segments(key: &str) -> Vec<&str> {
    key.split(KEY_SEPARATOR).collect()
}

/// Key prefixes of `key`, outermost first, excluding `key` itself.
///
/// `"t1::p1::s1"` yields `["t1", "t1::p1"]`.
pub fn ancestor_keys(key: &str) -> Vec<String> {
    let parts = segments(key);
    (1..parts.len())
        .map(|n| parts[..n].join(KEY_SEPARATOR))
        .collect()
}

/// Ancestor key at the given level, if `key` is deep enough to have one.
pub fn ancestor_at(key: &str, level: EntityKind) -> Option<String> {
    let depth = level.depth();
    let parts = segments(key);
    if parts.len() <= depth {
        return None;
    }
    Some(parts[..=depth].join(KEY_SEPARATOR))
}

/// Last segment of a key: the display name a project/stage was created with.
pub fn leaf(key: &str) -> &str {
    key.rsplit(KEY_SEPARATOR).next().unwrap_or(key)
}

/// Hierarchy level implied by the number of segments.
pub fn kind_of(key: &str) -> Option<EntityKind> {
    match segments(key).len() {
        1 => Some(EntityKind::Team),
        2 => Some(EntityKind::Project),
        3 => Some(EntityKind::Stage),
        _ => None,
    }
}

pub fn is_child_of(key: &str, parent: &str) -> bool {
    key.strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR))
        .is_some_and(|rest| !rest.is_empty() && !rest.contains(KEY_SEPARATOR))
}

/// Whether a display name can become a key segment.
pub fn is_valid_segment(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(KEY_SEPARATOR)
}

#[cfg(test)]
#[path = "../tests/model/keys_tests.rs"]
mod tests;
