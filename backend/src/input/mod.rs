//! Release bundle loading.
//!
//! Reads the JSON snapshot produced by the catalog database export. No ERN
//! logic here; presence of business-required fields is the exporter's job.

use std::fs;
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::ReleaseBundle;

/// Parse a release bundle from raw JSON bytes.
pub fn parse_bundle(bytes: &[u8]) -> InputResult<ReleaseBundle> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(InputError::EmptyInput);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse a release bundle from a JSON string.
pub fn parse_bundle_str(content: &str) -> InputResult<ReleaseBundle> {
    parse_bundle(content.as_bytes())
}

/// Load a release bundle from a JSON file.
pub fn load_bundle_file(path: &Path) -> InputResult<ReleaseBundle> {
    let bytes = fs::read(path)?;
    parse_bundle(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUNDLE: &str = r#"{
        "release": { "id": 1, "upc": "0602445790296", "releaseDate": "2024-03-15" },
        "tracks": [
            { "id": 10, "title": "One", "isrc": "FRZ012400001", "duration": "3:45" },
            { "id": 11, "title": "Two", "isrc": "FRZ012400002", "duration": "4:01" }
        ]
    }"#;

    #[test]
    fn test_parse_bundle_str() {
        let bundle = parse_bundle_str(BUNDLE).unwrap();
        assert_eq!(bundle.release.upc, "0602445790296");
        assert_eq!(bundle.tracks.len(), 2);
        assert_eq!(bundle.tracks[1].id, "11");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_bundle(b"  \n"), Err(InputError::EmptyInput)));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_bundle_str("{ \"release\": ").unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn test_missing_tracks_defaults_to_empty() {
        let bundle = parse_bundle_str(r#"{ "release": { "id": "r1" } }"#).unwrap();
        assert!(bundle.tracks.is_empty());
        assert_eq!(bundle.release.upc, "");
    }

    #[test]
    fn test_load_bundle_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLE.as_bytes()).unwrap();

        let bundle = load_bundle_file(file.path()).unwrap();
        assert_eq!(bundle.tracks[0].title, "One");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bundle_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }
}
