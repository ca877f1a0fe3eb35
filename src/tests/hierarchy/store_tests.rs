    use super::*;
    use crate::model::{EntityKind, Hierarchy, Project, Team};

    fn acme() -> Team {
        Team {
            key: "acme".to_string(),
            name: "Acme".to_string(),
            audit: None,
        }
    }

    #[test]
    fn dispatch_reports_applied_and_unchanged() {
        let mut store = EnvStore::new();
        assert_eq!(
            store.dispatch(EnvCommand::LoadOptions(Hierarchy {
                teams: vec![acme()],
                ..Hierarchy::default()
            })),
            Outcome::Applied
        );
        assert_eq!(
            store.dispatch(EnvCommand::choose(EntityKind::Team, "acme")),
            Outcome::Applied
        );
        assert_eq!(store.state().selected_key(EntityKind::Team), Some("acme"));

        let before = store.state().clone();
        assert_eq!(
            store.dispatch(EnvCommand::choose(EntityKind::Project, "acme::missing")),
            Outcome::Unchanged
        );
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn options_follow_state() {
        let mut store = EnvStore::new();
        assert!(store.options().is_empty());
        store.dispatch(EnvCommand::AddTeam(acme()));
        let options = store.options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Acme");
    }

    #[test]
    fn mislabeled_remote_project_is_ignored() {
        let mut store = EnvStore::new();
        store.dispatch(EnvCommand::LoadOptions(Hierarchy {
            teams: vec![acme()],
            projects: vec![Project {
                key: "acme::web".to_string(),
                project: "web".to_string(),
                team: "other".to_string(),
            }],
            ..Hierarchy::default()
        }));
        assert_eq!(
            store.dispatch(EnvCommand::choose(EntityKind::Project, "acme::web")),
            Outcome::Unchanged
        );
        assert!(store.state().is_consistent());
        assert_eq!(store.state().selected_key(EntityKind::Team), None);
    }
