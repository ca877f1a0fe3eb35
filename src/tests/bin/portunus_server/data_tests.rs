use super::*;

fn subject(email: &str, admin: bool) -> Subject {
    Subject {
        user_id: format!("id-{}", email),
        email: email.to_string(),
        admin,
    }
}

fn kv(pairs: &[(&str, &str)]) -> KvMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn seeded() -> ConsoleData {
    let mut data = ConsoleData::default();
    for (key, name) in [("t1", "Acme"), ("t2", "Globex")] {
        data.teams.push(Team {
            key: key.to_string(),
            name: name.to_string(),
            audit: None,
        });
    }
    for (team, project) in [("t1", "Web"), ("t1", "Api"), ("t2", "Web")] {
        data.projects.push(Project {
            key: keys::compose(team, project),
            project: project.to_string(),
            team: team.to_string(),
        });
    }
    for (project, stage) in [("t1::Web", "prod"), ("t1::Web", "dev"), ("t1::Api", "prod")] {
        let key = keys::compose(project, stage);
        data.stages.push(Stage {
            key: key.clone(),
            stage: stage.to_string(),
            project: project.to_string(),
            team: keys::ancestor_at(project, EntityKind::Team),
            vars: None,
        });
        data.vars.insert(key, kv(&[("A", "1")]));
    }
    data.add_member("t1", "ana@example.com");
    data
}

#[test]
fn members_see_only_their_teams() {
    let data = seeded();
    let view = data.visible_to(&subject("ana@example.com", false));
    assert_eq!(view.teams.len(), 1);
    assert_eq!(view.teams[0].key, "t1");
    assert_eq!(view.projects.len(), 2);
    assert_eq!(view.stages.len(), 3);
    assert!(
        view.stages
            .iter()
            .all(|s| s.vars == Some(StageVars::Count(1)))
    );

    let outsider = data.visible_to(&subject("bob@example.com", false));
    assert!(outsider.teams.is_empty());
    assert!(outsider.stages.is_empty());

    let admin = data.visible_to(&subject("root@example.com", true));
    assert_eq!(admin.teams.len(), 2);
}

#[test]
fn team_access_distinguishes_missing_from_forbidden() {
    let data = seeded();
    let ana = subject("ana@example.com", false);
    assert!(data.ensure_team_access("t1", &ana).is_ok());

    let resp = data.ensure_team_access("t2", &ana).unwrap_err();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let resp = data.ensure_team_access("nope", &ana).unwrap_err();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(data.ensure_access_below_team("t1::Web::prod", &ana).is_ok());
    assert!(data.ensure_access_below_team("t2::Web", &ana).is_err());
}

#[test]
fn removing_a_team_cascades() {
    let mut data = seeded();
    assert!(data.remove_team("t1"));
    assert_eq!(data.teams.len(), 1);
    assert_eq!(data.projects.len(), 1);
    assert!(data.stages.is_empty());
    assert!(data.vars.is_empty());
    assert!(!data.is_member("t1", "ana@example.com"));
    assert!(!data.remove_team("t1"));
}

#[test]
fn removing_a_project_keeps_siblings() {
    let mut data = seeded();
    assert!(data.remove_project("t1::Web"));
    let stages: Vec<&str> = data.stages.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(stages, vec!["t1::Api::prod"]);
    assert_eq!(data.vars.len(), 1);
    assert!(data.project("t2::Web").is_some());
}

#[test]
fn removing_a_stage_drops_its_vars() {
    let mut data = seeded();
    assert!(data.remove_stage("t1::Web::dev"));
    assert!(!data.vars.contains_key("t1::Web::dev"));
    assert!(!data.remove_stage("t1::Web::dev"));
}

#[test]
fn delta_applies_in_place() {
    let mut data = seeded();
    data.vars
        .insert("t1::Web::prod".to_string(), kv(&[("A", "1"), ("B", "2")]));
    let delta = Delta {
        add: kv(&[("C", "4")]),
        edit: kv(&[("B", "3")]),
        remove: vec!["A".to_string()],
    };
    let vars = data.apply_delta("t1::Web::prod", &delta).clone();
    assert_eq!(vars, kv(&[("B", "3"), ("C", "4")]));
    assert_eq!(
        vars.keys().collect::<Vec<_>>(),
        vec![&"B".to_string(), &"C".to_string()]
    );
}

#[test]
fn duplicate_members_are_refused() {
    let mut data = seeded();
    assert!(!data.add_member("t1", "ana@example.com"));
    assert!(data.add_member("t1", "bob@example.com"));
    assert!(data.remove_member("t1", "bob@example.com"));
    assert!(!data.remove_member("t1", "bob@example.com"));
    assert!(!data.remove_member("t9", "ana@example.com"));
}
