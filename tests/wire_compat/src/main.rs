fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use buzzer_protocol::{
        CompleteRequest, CompleteResponse, CreateSessionRequest, CreateSessionResponse, PartResult,
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

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (key order is irrelevant to `Value` equality).
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
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  Rust: {reserialized}"
        );
        parsed
    }

    #[test]
    fn fixture_create_session_request() {
        let req: CreateSessionRequest = roundtrip_test("create_session_request.json");
        assert_eq!(req.name, "movie.mkv");
        // Sizes above 4 GiB must survive as exact integers.
        assert_eq!(req.size, 12 * 1024 * 1024 * 1024);
    }

    #[test]
    fn fixture_create_session_response() {
        let resp: CreateSessionResponse = roundtrip_test("create_session_response.json");
        assert_eq!(resp.upload_id, "upl_8c1f2e");
        assert_eq!(resp.upload_urls.len(), 3);
        assert!(resp.upload_urls[1].contains("partNumber=2"));
    }

    #[test]
    fn fixture_complete_request() {
        let req: CompleteRequest = roundtrip_test("complete_request.json");
        assert_eq!(req.directory_id, "abcdefghij12");
        let numbers: Vec<u32> = req.parts.iter().map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        // ETags travel verbatim, quotes included.
        assert_eq!(req.parts[0].etag, "\"9b2cf535f27731c974343645a3985328\"");
    }

    #[test]
    fn fixture_complete_response() {
        let resp: CompleteResponse = roundtrip_test("complete_response.json");
        assert_eq!(resp.id, "xyz789");
    }

    #[test]
    fn built_complete_request_matches_fixture() {
        let req = CompleteRequest {
            directory_id: "abcdefghij12".into(),
            parts: vec![
                PartResult::new(1, "\"9b2cf535f27731c974343645a3985328\""),
                PartResult::new(2, "\"6f5902ac237024bdd0c176cb93063dc4\""),
                PartResult::new(3, "\"d41d8cd98f00b204e9800998ecf8427e\""),
            ],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            load_fixture("complete_request.json")
        );
    }

    #[test]
    fn complete_response_ignores_extra_fields() {
        let resp: CompleteResponse =
            serde_json::from_str(r#"{"id":"xyz789","name":"movie.mkv","size":42}"#).unwrap();
        assert_eq!(resp.id, "xyz789");
    }
}
