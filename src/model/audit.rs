use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub email: String,
    pub start: String,
    pub end: String,
    pub explanation: String,
    pub method: String,
    pub url: String,
}

impl AuditRecord {
    pub fn started_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.start, &Rfc3339).ok()
    }
}

/// Orders records newest first by `start`. Unparseable timestamps sort last.
pub fn sort_newest_first(records: &mut [AuditRecord]) {
    records.sort_by(|a, b| match (a.started_at(), b.started_at()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.start.cmp(&a.start),
    });
}

#[cfg(test)]
#[path = "../tests/model/audit_tests.rs"]
mod tests;
