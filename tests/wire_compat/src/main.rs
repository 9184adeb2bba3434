fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use messenger_notifier_protocol::{
        ErrorResponse, SetStatusRequest, SetStatusResponse, Status, StatusResponse,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture, re-serializes it and compares the JSON values
    /// (object key order is ignored).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Set-status endpoint ---

    #[test]
    fn fixture_set_status_read() {
        let parsed = roundtrip_test::<SetStatusResponse>("set_status_read.json");
        assert_eq!(parsed, SetStatusResponse::accepted(Status::Read));
    }

    #[test]
    fn fixture_set_status_unread() {
        let parsed = roundtrip_test::<SetStatusResponse>("set_status_unread.json");
        assert_eq!(parsed, SetStatusResponse::accepted(Status::Unread));
    }

    #[test]
    fn fixture_invalid_status() {
        let parsed = roundtrip_test::<ErrorResponse>("invalid_status.json");
        assert_eq!(parsed, ErrorResponse::invalid_status());
    }

    #[test]
    fn fixture_set_status_request() {
        let parsed = roundtrip_test::<SetStatusRequest>("set_status_request.json");
        assert_eq!(parsed, SetStatusRequest::new(Status::Unread));
    }

    // --- Status endpoint ---

    #[test]
    fn fixture_status_unread() {
        let parsed = roundtrip_test::<StatusResponse>("status_unread.json");
        assert_eq!(parsed.current_status, Some(Status::Unread));
        assert_eq!(parsed.port, 33333);
    }

    #[test]
    fn fixture_status_before_first_report() {
        let parsed = roundtrip_test::<StatusResponse>("status_before_first_report.json");
        assert_eq!(parsed.current_status, None);
    }

    // --- Built payloads match fixtures byte-for-byte in value ---

    #[test]
    fn built_payloads_match_fixtures() {
        let cases = [
            (
                "set_status_read.json",
                serde_json::to_value(SetStatusResponse::accepted(Status::Read)).unwrap(),
            ),
            (
                "invalid_status.json",
                serde_json::to_value(ErrorResponse::invalid_status()).unwrap(),
            ),
            (
                "status_before_first_report.json",
                serde_json::to_value(StatusResponse {
                    success: true,
                    current_status: None,
                    port: 33333,
                })
                .unwrap(),
            ),
        ];

        for (name, built) in cases {
            assert_eq!(load_fixture(name), built, "payload mismatch for {name}");
        }
    }

    #[test]
    fn extra_request_fields_are_ignored() {
        let req: SetStatusRequest =
            serde_json::from_str(r#"{"status":"read","source":"chats-icon-aria"}"#).unwrap();
        assert_eq!(req, SetStatusRequest::new(Status::Read));
    }
}
