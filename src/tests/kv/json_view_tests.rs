    use super::*;

    #[test]
    fn parse_keeps_document_order() {
        let map = parse_json_object(r#"{"ZETA": "z", "ALPHA": "a", "MID": "m"}"#)
            .expect("parse object");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["ZETA", "ALPHA", "MID"]);
    }

    #[test]
    fn numbers_and_booleans_become_text() {
        let map = parse_json_object(r#"{"BANANAS": 10, "DEBUG": true, "RATIO": 0.5}"#)
            .expect("parse scalars");
        assert_eq!(map.get("BANANAS").map(String::as_str), Some("10"));
        assert_eq!(map.get("DEBUG").map(String::as_str), Some("true"));
        assert_eq!(map.get("RATIO").map(String::as_str), Some("0.5"));
    }

    #[test]
    fn syntax_errors_are_malformed() {
        let err = parse_json_object(r#"{"A": "1",,}"#).unwrap_err();
        assert!(matches!(err, KvError::MalformedJson(_)));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert_eq!(parse_json_object("[1, 2]").unwrap_err(), KvError::NotAnObject);
        assert_eq!(parse_json_object(r#""text""#).unwrap_err(), KvError::NotAnObject);
    }

    #[test]
    fn nested_values_are_rejected_with_their_key() {
        let err = parse_json_object(r#"{"A": "1", "NESTED": {"x": 1}}"#).unwrap_err();
        assert_eq!(
            err,
            KvError::NonScalarValue {
                key: "NESTED".to_string()
            }
        );
        let err = parse_json_object(r#"{"GONE": null}"#).unwrap_err();
        assert_eq!(
            err,
            KvError::NonScalarValue {
                key: "GONE".to_string()
            }
        );
    }

    #[test]
    fn render_then_parse_is_stable() {
        let map = parse_json_object(r#"{"B": "2", "A": "1"}"#).expect("parse");
        let text = render_json(&map);
        assert_eq!(parse_json_object(&text).expect("reparse"), map);
        assert!(text.find("\"B\"") < text.find("\"A\""));
    }
