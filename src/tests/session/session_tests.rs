    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::open(dir.path().join("home"));
        (dir, store)
    }

    #[test]
    fn empty_home_reads_defaults() {
        let (_dir, store) = store();
        let cfg = store.read_config().expect("config");
        assert_eq!(cfg.version, 1);
        assert!(cfg.remote.is_none());
        assert!(!store.is_authenticated().expect("auth"));
        assert!(store.require_remote_and_token().is_err());
    }

    #[test]
    fn login_logout_round_trip() {
        let (_dir, store) = store();
        store
            .login(RemoteConfig::new("http://127.0.0.1:8080/"), "secret")
            .expect("login");
        store
            .set_identity(&store.require_remote().expect("remote"), "dev@example.com")
            .expect("identity");

        let (remote, token) = store.require_remote_and_token().expect("logged in");
        assert_eq!(remote.base_url, "http://127.0.0.1:8080");
        assert_eq!(token, "secret");
        assert_eq!(
            store.current_identity().expect("identity").as_deref(),
            Some("dev@example.com")
        );

        let raw = std::fs::read_to_string(store.root().join("config.json")).expect("config");
        assert!(!raw.contains("secret"));

        assert!(store.logout().expect("logout"));
        assert!(!store.is_authenticated().expect("auth"));
        assert!(store.current_identity().expect("identity").is_none());
        assert!(store.require_remote().is_ok());
        assert!(!store.logout().expect("second logout"));
    }

    #[test]
    fn token_in_config_is_migrated_to_state() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).expect("mkdir");
        std::fs::write(
            store.root().join("config.json"),
            r#"{"version":1,"remote":{"base_url":"http://h","token":"tok"}}"#,
        )
        .expect("write");

        let cfg = store.read_config().expect("config");
        assert_eq!(cfg.remote.as_ref().and_then(|r| r.token.clone()), None);
        let (_, token) = store.require_remote_and_token().expect("token");
        assert_eq!(token, "tok");

        let raw = std::fs::read_to_string(store.root().join("config.json")).expect("config");
        assert!(!raw.contains("tok"));
    }

    #[test]
    fn unknown_state_version_is_rejected() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).expect("mkdir");
        std::fs::write(store.root().join("state.json"), r#"{"version":9}"#).expect("write");
        let err = store.read_state().unwrap_err();
        assert!(format!("{:#}", err).contains("version 9"));
    }

    #[test]
    fn explicit_home_wins() {
        let path = Path::new("/tmp/somewhere");
        assert_eq!(
            SessionStore::resolve_home(Some(path)).expect("home"),
            PathBuf::from("/tmp/somewhere")
        );
    }
