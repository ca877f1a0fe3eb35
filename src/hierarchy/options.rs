use serde::Serialize;

use crate::model::EntityKind;

use super::state::EnvState;

const PATH_SEPARATOR: &str = " > ";

/// One row of the flattened team → project → stage listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnvOption {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub key: String,
    pub label: String,
    /// Ancestor names, each followed by `" > "`. Empty for teams.
    pub path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl EnvOption {
    /// Path and label joined, e.g. `Acme > Web > prod`.
    pub fn breadcrumb(&self) -> String {
        format!("{}{}", self.path, self.label)
    }
}

/// Every reachable entity grouped under its parent, in list order.
///
/// Projects whose team is unknown and stages whose project is unknown are not reachable and
/// are left out.
pub fn build_options(state: &EnvState) -> Vec<EnvOption> {
    let mut out = Vec::new();
    for team in &state.teams {
        out.push(EnvOption {
            kind: EntityKind::Team,
            key: team.key.clone(),
            label: team.name.clone(),
            path: String::new(),
            team: None,
            project: None,
        });
        let team_path = format!("{}{}", team.name, PATH_SEPARATOR);
        for project in state.projects_of(&team.key) {
            out.push(EnvOption {
                kind: EntityKind::Project,
                key: project.key.clone(),
                label: project.project.clone(),
                path: team_path.clone(),
                team: Some(team.key.clone()),
                project: None,
            });
            let project_path = format!("{}{}{}", team_path, project.project, PATH_SEPARATOR);
            for stage in state.stages_of(&project.key) {
                out.push(EnvOption {
                    kind: EntityKind::Stage,
                    key: stage.key.clone(),
                    label: stage.stage.clone(),
                    path: project_path.clone(),
                    team: Some(team.key.clone()),
                    project: Some(project.key.clone()),
                });
            }
        }
    }
    out
}

/// Case-insensitive substring filter used by quick search. Order is kept.
pub fn filter_options<'a>(options: &'a [EnvOption], query: &str) -> Vec<&'a EnvOption> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    let hit = |s: &str| s.to_lowercase().contains(&needle);
    options
        .iter()
        .filter(|o| {
            hit(&o.key)
                || hit(&o.path)
                || hit(&o.label)
                || o.team.as_deref().is_some_and(hit)
                || o.project.as_deref().is_some_and(hit)
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/hierarchy/options_tests.rs"]
mod tests;
