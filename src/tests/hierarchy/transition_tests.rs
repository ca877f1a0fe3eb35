    use super::*;
    use crate::model::Hierarchy;

    fn team(key: &str, name: &str) -> Team {
        Team {
            key: key.to_string(),
            name: name.to_string(),
            audit: None,
        }
    }

    fn project(team: &str, name: &str) -> Project {
        Project {
            key: keys::compose(team, name),
            project: name.to_string(),
            team: team.to_string(),
        }
    }

    fn stage(project: &str, name: &str) -> Stage {
        Stage {
            key: keys::compose(project, name),
            stage: name.to_string(),
            project: project.to_string(),
            team: keys::ancestor_at(project, EntityKind::Team),
            vars: None,
        }
    }

    fn loaded() -> EnvState {
        EnvState::from_hierarchy(Hierarchy {
            teams: vec![team("t1", "Acme"), team("t2", "Beta")],
            projects: vec![project("t1", "p1"), project("t1", "p2"), project("t2", "p3")],
            stages: vec![
                stage("t1::p1", "s1"),
                stage("t1::p1", "s2"),
                stage("t1::p2", "s3"),
                stage("t2::p3", "s4"),
            ],
        })
    }

    fn selected(state: &EnvState) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            state.selected_key(EntityKind::Team),
            state.selected_key(EntityKind::Project),
            state.selected_key(EntityKind::Stage),
        )
    }

    #[test]
    fn load_options_replaces_lists_and_clears_selection() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let next = reduce(
            state,
            &EnvCommand::LoadOptions(Hierarchy {
                teams: vec![team("t9", "Other")],
                ..Hierarchy::default()
            }),
        );
        assert_eq!(next.teams.len(), 1);
        assert!(next.projects.is_empty());
        assert_eq!(selected(&next), (None, None, None));
    }

    #[test]
    fn choosing_a_stage_derives_project_and_team_from_its_key() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        assert_eq!(
            selected(&state),
            (Some("t1"), Some("t1::p1"), Some("t1::p1::s1"))
        );
        assert!(state.is_consistent());
    }

    #[test]
    fn choosing_a_team_clears_lower_levels() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let state = reduce(state, &EnvCommand::choose(EntityKind::Team, "t2"));
        assert_eq!(selected(&state), (Some("t2"), None, None));
    }

    #[test]
    fn choosing_a_project_from_another_team_switches_team() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let state = reduce(state, &EnvCommand::choose(EntityKind::Project, "t2::p3"));
        assert_eq!(selected(&state), (Some("t2"), Some("t2::p3"), None));
    }

    #[test]
    fn unknown_key_is_a_miss_and_a_no_op() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Team, "t1"));
        let miss = transition(&state, &EnvCommand::choose(EntityKind::Stage, "t1::p1::nope"))
            .unwrap_err();
        assert_eq!(miss.level, EntityKind::Stage);
        assert_eq!(miss.key, "t1::p1::nope");

        let after = reduce(state.clone(), &EnvCommand::choose(EntityKind::Project, "zz::p"));
        assert_eq!(after, state);
    }

    #[test]
    fn stage_with_unresolvable_ancestor_is_not_selected() {
        let mut state = loaded();
        state.stages.push(stage("gone::p", "s"));
        let miss = transition(&state, &EnvCommand::choose(EntityKind::Stage, "gone::p::s"))
            .unwrap_err();
        assert_eq!(miss.level, EntityKind::Team);
        assert_eq!(miss.key, "gone");
    }

    /// Listings where a key prefix and the parent field name different entities.
    fn mislabeled() -> EnvState {
        let mut state = loaded();
        state.projects.push(Project {
            key: "t1::web".to_string(),
            project: "web".to_string(),
            team: "t2".to_string(),
        });
        state.stages.push(Stage {
            project: "t2::p3".to_string(),
            ..stage("t1::p1", "odd")
        });
        state
    }

    #[test]
    fn project_whose_team_field_disagrees_with_its_key_is_not_selected() {
        let state = reduce(mislabeled(), &EnvCommand::choose(EntityKind::Team, "t1"));
        let miss = transition(&state, &EnvCommand::choose(EntityKind::Project, "t1::web"))
            .unwrap_err();
        assert_eq!(miss.level, EntityKind::Project);
        assert_eq!(miss.key, "t1::web");
        assert_eq!(selected(&state), (Some("t1"), None, None));
    }

    #[test]
    fn stage_whose_project_field_disagrees_with_its_key_is_not_selected() {
        let state = mislabeled();
        let miss = transition(&state, &EnvCommand::choose(EntityKind::Stage, "t1::p1::odd"))
            .unwrap_err();
        assert_eq!(miss.level, EntityKind::Stage);

        let next = reduce(state.clone(), &EnvCommand::AddStage(Stage {
            project: "t2::p3".to_string(),
            ..stage("t1::p2", "odd")
        }));
        assert_eq!(next.stages.len(), state.stages.len() + 1);
        assert_eq!(selected(&next), (None, None, None));
    }

    #[test]
    fn key_with_the_wrong_depth_is_a_miss() {
        let mut state = loaded();
        state.stages.push(stage("t1::p1::extra", "s"));
        let miss = transition(&state, &EnvCommand::choose(EntityKind::Stage, "t1::p1::extra::s"))
            .unwrap_err();
        assert_eq!(miss.level, EntityKind::Stage);
        assert_eq!(selected(&state), (None, None, None));
    }

    #[test]
    fn adding_a_team_then_project_selects_each() {
        let state = reduce(EnvState::default(), &EnvCommand::AddTeam(team("t1", "Acme")));
        assert_eq!(selected(&state), (Some("t1"), None, None));

        let state = reduce(state, &EnvCommand::AddProject(project("t1", "Web")));
        assert_eq!(selected(&state), (Some("t1"), Some("t1::Web"), None));
        assert_eq!(state.teams.len(), 1);
        assert_eq!(state.projects.len(), 1);
        assert!(state.is_consistent());
    }

    #[test]
    fn adding_a_stage_selects_it_under_its_ancestors() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Team, "t2"));
        let state = reduce(state, &EnvCommand::AddStage(stage("t1::p2", "qa")));
        assert_eq!(
            selected(&state),
            (Some("t1"), Some("t1::p2"), Some("t1::p2::qa"))
        );
        assert_eq!(state.stages.len(), 5);
    }

    #[test]
    fn adding_an_orphan_appends_without_moving_selection() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Team, "t1"));
        let next = reduce(state.clone(), &EnvCommand::AddProject(project("nobody", "x")));
        assert_eq!(next.projects.len(), state.projects.len() + 1);
        assert_eq!(selected(&next), (Some("t1"), None, None));
    }

    #[test]
    fn re_adding_an_existing_key_replaces_it() {
        let state = reduce(loaded(), &EnvCommand::AddTeam(team("t1", "Acme Corp")));
        assert_eq!(state.teams.len(), 2);
        assert_eq!(state.find_team("t1").map(|t| t.name.as_str()), Some("Acme Corp"));
    }

    #[test]
    fn edit_renames_in_place_and_refreshes_selection() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let state = reduce(state, &EnvCommand::EditProject(ProjectPatch::rename("t1::p1", "Website")));
        assert_eq!(state.projects[0].project, "Website");
        assert_eq!(state.projects[0].key, "t1::p1");
        assert_eq!(state.project.as_ref().map(|p| p.project.as_str()), Some("Website"));
        assert_eq!(selected(&state).2, Some("t1::p1::s1"));

        let state = reduce(state, &EnvCommand::EditTeam(TeamPatch::rename("t2", "Gamma")));
        assert_eq!(state.teams[1].name, "Gamma");
        assert_eq!(state.team.as_ref().map(|t| t.name.as_str()), Some("Acme"));
    }

    #[test]
    fn edit_team_patch_keeps_unset_fields() {
        let state = reduce(loaded(), &EnvCommand::EditTeam(TeamPatch {
            key: "t1".to_string(),
            name: None,
            audit: Some(crate::model::AuditSetting::Enabled(true)),
        }));
        let t1 = state.find_team("t1").expect("team kept");
        assert_eq!(t1.name, "Acme");
        assert_eq!(t1.audit, Some(crate::model::AuditSetting::Enabled(true)));
    }

    #[test]
    fn edit_of_unknown_entity_misses() {
        let err = transition(&loaded(), &EnvCommand::EditStage(StagePatch::rename("t1::p1::x", "y")))
            .unwrap_err();
        assert_eq!(err.level, EntityKind::Stage);
    }

    #[test]
    fn deleting_a_team_cascades_to_projects_and_stages() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let state = reduce(state, &EnvCommand::DeleteTeam { key: "t1".to_string() });

        assert_eq!(state.teams.len(), 1);
        assert!(state.projects.iter().all(|p| p.team != "t1"));
        assert_eq!(state.stages.len(), 1);
        assert_eq!(state.stages[0].key, "t2::p3::s4");
        assert_eq!(selected(&state), (None, None, None));
    }

    #[test]
    fn deleting_an_unselected_project_keeps_selection() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s1"));
        let state = reduce(state, &EnvCommand::DeleteProject { key: "t1::p2".to_string() });
        assert!(state.find_stage("t1::p2::s3").is_none());
        assert_eq!(
            selected(&state),
            (Some("t1"), Some("t1::p1"), Some("t1::p1::s1"))
        );
    }

    #[test]
    fn deleting_the_selected_project_clears_project_and_stage() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s2"));
        let state = reduce(state, &EnvCommand::DeleteProject { key: "t1::p1".to_string() });
        assert_eq!(selected(&state), (Some("t1"), None, None));
        assert!(state.stages_of("t1::p1").next().is_none());
    }

    #[test]
    fn deleting_the_selected_stage_keeps_upper_levels() {
        let state = reduce(loaded(), &EnvCommand::choose(EntityKind::Stage, "t1::p1::s2"));
        let state = reduce(state, &EnvCommand::DeleteStage { key: "t1::p1::s2".to_string() });
        assert_eq!(selected(&state), (Some("t1"), Some("t1::p1"), None));
    }

    #[test]
    fn deleting_unknown_keys_misses() {
        let state = loaded();
        assert!(transition(&state, &EnvCommand::DeleteTeam { key: "zz".to_string() }).is_err());
        assert!(transition(&state, &EnvCommand::DeleteProject { key: "t1::zz".to_string() }).is_err());
        assert!(transition(&state, &EnvCommand::DeleteStage { key: "t1::p1::zz".to_string() }).is_err());
    }

    #[test]
    fn acme_web_walkthrough() {
        let mut state = EnvState::default();
        state = reduce(state, &EnvCommand::AddTeam(team("acme", "Acme")));
        state = reduce(state, &EnvCommand::AddProject(project("acme", "Web")));
        state = reduce(state, &EnvCommand::AddStage(stage("acme::Web", "prod")));
        assert_eq!(
            selected(&state),
            (Some("acme"), Some("acme::Web"), Some("acme::Web::prod"))
        );

        state = reduce(state, &EnvCommand::EditStage(StagePatch::rename("acme::Web::prod", "production")));
        assert_eq!(state.stage.as_ref().map(|s| s.stage.as_str()), Some("production"));

        state = reduce(state, &EnvCommand::DeleteProject { key: "acme::Web".to_string() });
        assert_eq!(selected(&state), (Some("acme"), None, None));
        assert!(state.stages.is_empty());
    }

    /// Small deterministic generator so the sequence test is reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: usize) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) as usize) % bound
        }
    }

    fn random_command(rng: &mut Lcg) -> EnvCommand {
        let teams = ["t1", "t2", "t3"];
        let projects = ["t1::p1", "t1::p2", "t2::p3", "t3::p9", "t1::web"];
        let stages = [
            "t1::p1::s1",
            "t1::p1::s2",
            "t1::p2::s3",
            "t2::p3::s4",
            "t3::p9::s9",
            "t1::p1::odd",
        ];
        let team_key = teams[rng.next(teams.len())];
        let project_key = projects[rng.next(projects.len())];
        let stage_key = stages[rng.next(stages.len())];
        let project_of_stage = keys::ancestor_at(stage_key, EntityKind::Project).unwrap_or_default();
        match rng.next(13) {
            0 => EnvCommand::LoadOptions(Hierarchy {
                teams: loaded().teams,
                projects: loaded().projects,
                stages: loaded().stages,
            }),
            11 => EnvCommand::LoadOptions(Hierarchy {
                teams: mislabeled().teams,
                projects: mislabeled().projects,
                stages: mislabeled().stages,
            }),
            12 => EnvCommand::AddProject(Project {
                team: teams[rng.next(teams.len())].to_string(),
                ..project("t1", "web")
            }),
            1 => EnvCommand::choose(EntityKind::Team, team_key),
            2 => EnvCommand::choose(EntityKind::Project, project_key),
            3 => EnvCommand::choose(EntityKind::Stage, stage_key),
            4 => EnvCommand::AddTeam(team(team_key, "n")),
            5 => EnvCommand::AddProject(project(
                &keys::ancestor_at(project_key, EntityKind::Team).unwrap_or_default(),
                keys::leaf(project_key),
            )),
            6 => EnvCommand::AddStage(stage(&project_of_stage, keys::leaf(stage_key))),
            7 => EnvCommand::EditProject(ProjectPatch::rename(project_key, "renamed")),
            8 => EnvCommand::DeleteTeam { key: team_key.to_string() },
            9 => EnvCommand::DeleteProject { key: project_key.to_string() },
            _ => EnvCommand::DeleteStage { key: stage_key.to_string() },
        }
    }

    #[test]
    fn selection_stays_consistent_over_command_sequences() {
        for seed in 0..32u64 {
            let mut rng = Lcg(seed);
            let mut state = loaded();
            for step in 0..200 {
                let command = random_command(&mut rng);
                state = reduce(state, &command);
                assert!(
                    state.is_consistent(),
                    "seed {seed} step {step} after {}: {:?}",
                    command.name(),
                    selected(&state)
                );
                for level in EntityKind::ALL {
                    if let Some(key) = state.selected_key(level) {
                        assert!(state.contains(level, key), "selected {level} {key} not listed");
                    }
                }
            }
        }
    }
