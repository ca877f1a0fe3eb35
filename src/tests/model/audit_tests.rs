    use super::*;

    fn record(start: &str) -> AuditRecord {
        AuditRecord {
            email: "dev@localhost".to_string(),
            start: start.to_string(),
            end: start.to_string(),
            explanation: "200 OK".to_string(),
            method: "GET".to_string(),
            url: "/env".to_string(),
        }
    }

    #[test]
    fn newest_record_comes_first() {
        let mut records = vec![
            record("2024-01-01T10:00:00Z"),
            record("2024-03-01T10:00:00Z"),
            record("2024-02-01T10:00:00+02:00"),
        ];
        sort_newest_first(&mut records);
        let starts: Vec<&str> = records.iter().map(|r| r.start.as_str()).collect();
        assert_eq!(
            starts,
            vec![
                "2024-03-01T10:00:00Z",
                "2024-02-01T10:00:00+02:00",
                "2024-01-01T10:00:00Z"
            ]
        );
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut records = vec![record("yesterday"), record("2024-01-01T10:00:00Z")];
        sort_newest_first(&mut records);
        assert_eq!(records[0].start, "2024-01-01T10:00:00Z");
        assert_eq!(records[1].start, "yesterday");
    }
