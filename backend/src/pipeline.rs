//! High-level generation API.
//!
//! Combines loading, compilation and reporting:
//!
//! ```rust,ignore
//! use ddexgen::pipeline::{generate_from_file, GenerateOptions};
//! use std::path::Path;
//!
//! let result = generate_from_file(Path::new("release.json"), &GenerateOptions::default())?;
//! std::fs::write("release.xml", &result.xml)?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::config::{DealProfile, ErnConfig};
use crate::error::PipelineResult;
use crate::ern::ErnCompiler;
use crate::input::{load_bundle_file, parse_bundle};
use crate::models::ReleaseBundle;

/// Options for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Overrides the configured deal profile.
    pub profile: Option<DealProfile>,
}

/// Generated document and what went into it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub xml: String,
    pub message_id: String,
    pub release_reference: String,
    pub track_count: usize,
    pub deal_count: usize,
    pub has_image: bool,
}

/// Compile one bundle, logging progress.
pub fn generate(
    compiler: &ErnCompiler,
    bundle: &ReleaseBundle,
    options: &GenerateOptions,
) -> PipelineResult<GenerationResult> {
    let release = &bundle.release;
    log_info(format!("Building ERN 3.8.2 for release {} (UPC {})", release.id, release.upc));
    log_info_indent(format!("{} track(s)", bundle.tracks.len()), 1);

    if bundle.has_unordered_sequence() {
        log_warning("Track sequence numbers are not ascending; input order is kept");
    }

    let profile = options.profile.unwrap_or(compiler.config().deal_profile);
    let document = compiler.build_with_profile(bundle, profile)?;
    let xml = document.to_xml()?;

    log_success(format!(
        "Message {}: {} resource(s), {} deal(s){}",
        document.stamp.message_id,
        document.resource_references.len(),
        document.deal_count,
        if document.has_image { ", cover image" } else { "" }
    ));

    Ok(GenerationResult {
        xml,
        message_id: document.stamp.message_id,
        release_reference: document.release_reference,
        track_count: document.track_count,
        deal_count: document.deal_count,
        has_image: document.has_image,
    })
}

/// Load a JSON bundle from disk and compile it with env configuration.
pub fn generate_from_file(path: &Path, options: &GenerateOptions) -> PipelineResult<GenerationResult> {
    log_info(format!("Reading release bundle: {}", path.display()));
    let bundle = load_bundle_file(path)?;
    let compiler = ErnCompiler::new(ErnConfig::from_env());
    generate(&compiler, &bundle, options)
}

/// Parse JSON bytes and compile with the given compiler.
pub fn generate_from_bytes(
    compiler: &ErnCompiler,
    bytes: &[u8],
    options: &GenerateOptions,
) -> PipelineResult<GenerationResult> {
    let bundle = parse_bundle(bytes)?;
    generate(compiler, &bundle, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::ern::ids::{FixedClock, FixedRandom};
    use chrono::{TimeZone, Utc};

    const BUNDLE: &str = r#"{
        "release": { "id": 5, "upc": "0602445790296", "releaseDate": "2024-03-15", "coverImageUrl": "https://cdn.example.com/5.jpg" },
        "tracks": [
            { "id": 1, "sequenceNumber": 1, "title": "One", "isrc": "FRZ012400001", "duration": "3:45" },
            { "id": 2, "sequenceNumber": 2, "title": "Two", "isrc": "FRZ012400002", "duration": "1:02:03" }
        ]
    }"#;

    fn compiler() -> ErnCompiler {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        ErnCompiler::with_sources(ErnConfig::default(), clock, FixedRandom("PIPELINE".into()))
    }

    #[test]
    fn test_generate_from_bytes() {
        let result = generate_from_bytes(&compiler(), BUNDLE.as_bytes(), &GenerateOptions::default()).unwrap();
        assert_eq!(result.message_id, "ERN20240301000000PIPELINE");
        assert_eq!(result.release_reference, "R5");
        assert_eq!(result.track_count, 2);
        assert_eq!(result.deal_count, 5);
        assert!(result.has_image);
        assert!(result.xml.contains("<Duration>PT1H2M3S</Duration>"));
    }

    #[test]
    fn test_profile_override() {
        let options = GenerateOptions { profile: Some(DealProfile::Reduced) };
        let result = generate_from_bytes(&compiler(), BUNDLE.as_bytes(), &options).unwrap();
        assert_eq!(result.deal_count, 2);
        assert_eq!(result.xml.matches("<Deal>").count(), 2);
    }

    #[test]
    fn test_invalid_input() {
        let err = generate_from_bytes(&compiler(), b"", &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Input(_)));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release.json");
        std::fs::write(&path, BUNDLE).unwrap();

        let result = generate_from_file(&path, &GenerateOptions::default()).unwrap();
        assert_eq!(result.track_count, 2);
        assert!(result.xml.contains("<ISRC>FRZ012400002</ISRC>"));
    }
}
