//! Domain models for release metadata.
//!
//! These are read-only snapshots handed to the compiler once per generation:
//!
//! - [`ReleaseBundle`] - A release with its ordered tracks
//! - [`Release`] - Release-level identifiers, titles, dates and copyright lines
//! - [`Track`] - One sound recording with its ordered artist credits
//! - [`ArtistCredit`] - A free-text role attached to a named party
//! - [`Label`] - Administrating label, optional

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Helpers
// =============================================================================

/// Treat `None`, `""` and whitespace-only strings alike.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Database ids arrive either as JSON numbers or strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// =============================================================================
// Label
// =============================================================================

/// Administrating label of a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(default)]
    pub name: Option<String>,
    /// Cover art dimension hint, `"WxH"` (e.g. `"1400x1400"`).
    #[serde(default)]
    pub image_dimensions: Option<String>,
}

// =============================================================================
// Release
// =============================================================================

/// A music release (album, EP, single).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Internal identifier, used to derive document-local references.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub upc: String,
    #[serde(default)]
    pub catalog_number: Option<String>,
    #[serde(default)]
    pub version_title: Option<String>,
    #[serde(default)]
    pub alternate_title: Option<String>,
    #[serde(default)]
    pub display_artist: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub label_name: Option<String>,
    #[serde(default)]
    pub label: Option<Label>,
    #[serde(default)]
    pub release_type: Option<String>,
    /// `YYYY-MM-DD`, possibly followed by a time component.
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub c_line: Option<String>,
    #[serde(default)]
    pub c_line_year: Option<i32>,
    #[serde(default)]
    pub p_line: Option<String>,
    #[serde(default)]
    pub p_line_year: Option<i32>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl Release {
    pub fn new(id: impl Into<String>, upc: impl Into<String>, release_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            upc: upc.into(),
            release_date: release_date.into(),
            ..Default::default()
        }
    }

    /// Cover art location, when one is set.
    pub fn cover_image(&self) -> Option<&str> {
        non_empty(&self.cover_image_url)
    }
}

// =============================================================================
// Artist Credit
// =============================================================================

/// A party credited on a track, with a free-text role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCredit {
    #[serde(default)]
    pub stage_name: Option<String>,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Role as typed by the label ("Main Artist", "Compositeur", ...).
    #[serde(default)]
    pub role: Option<String>,
}

impl ArtistCredit {
    /// Credit with a plain name and role.
    pub fn named(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }
}

// =============================================================================
// Track
// =============================================================================

/// One sound recording of a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub sequence_number: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isrc: String,
    /// `PT3M45S`, `3:45` or `1:02:03`.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub mix_version: Option<String>,
    #[serde(default)]
    pub explicit: Option<String>,
    #[serde(default)]
    pub primary_genre: Option<String>,
    #[serde(default)]
    pub secondary_genre: Option<String>,
    #[serde(default)]
    pub performance_language: Option<String>,
    #[serde(default)]
    pub lyrics_language: Option<String>,
    #[serde(default)]
    pub has_lyrics: Option<bool>,
    /// Codec hint such as `"flac"` or `"wav"`.
    #[serde(default)]
    pub audio_style: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistCredit>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, isrc: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            isrc: isrc.into(),
            ..Default::default()
        }
    }

    pub fn with_artist(mut self, credit: ArtistCredit) -> Self {
        self.artists.push(credit);
        self
    }
}

// =============================================================================
// Release Bundle
// =============================================================================

/// A release with its tracks, in the order the caller wants them sequenced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseBundle {
    pub release: Release,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl ReleaseBundle {
    pub fn new(release: Release, tracks: Vec<Track>) -> Self {
        Self { release, tracks }
    }

    /// True when the tracks carry sequence numbers that are not ascending.
    ///
    /// Input order is authoritative either way.
    pub fn has_unordered_sequence(&self) -> bool {
        let numbers: Vec<u32> = self.tracks.iter().filter_map(|t| t.sequence_number).collect();
        numbers.windows(2).any(|w| w[0] >= w[1])
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("  Daft Punk ".into())), Some("Daft Punk"));
        assert_eq!(non_empty(&Some("   ".into())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn test_bundle_deserialization() {
        let bundle: ReleaseBundle = serde_json::from_value(json!({
            "release": {
                "id": 42,
                "upc": "0602445790296",
                "releaseDate": "2024-03-15",
                "versionTitle": "Night Drive",
                "label": { "name": "Nocturne Records", "imageDimensions": "1400x1400" }
            },
            "tracks": [
                {
                    "id": "7",
                    "title": "Intro",
                    "isrc": "FRZ012400001",
                    "duration": "3:45",
                    "hasLyrics": false,
                    "artists": [{ "stageName": "Nox", "role": "Main Artist" }]
                }
            ]
        }))
        .unwrap();

        assert_eq!(bundle.release.id, "42");
        assert_eq!(bundle.release.label.as_ref().unwrap().image_dimensions.as_deref(), Some("1400x1400"));
        assert_eq!(bundle.tracks[0].id, "7");
        assert_eq!(bundle.tracks[0].has_lyrics, Some(false));
        assert_eq!(bundle.tracks[0].artists[0].stage_name.as_deref(), Some("Nox"));
    }

    #[test]
    fn test_unordered_sequence_detection() {
        let mut a = Track::new("1", "A", "X1");
        a.sequence_number = Some(2);
        let mut b = Track::new("2", "B", "X2");
        b.sequence_number = Some(1);
        let bundle = ReleaseBundle::new(Release::new("1", "123", "2024-01-01"), vec![a.clone(), b.clone()]);
        assert!(bundle.has_unordered_sequence());

        let ordered = ReleaseBundle::new(Release::new("1", "123", "2024-01-01"), vec![b, a]);
        assert!(!ordered.has_unordered_sequence());
    }

    #[test]
    fn test_cover_image() {
        let mut release = Release::new("1", "123", "2024-01-01");
        assert_eq!(release.cover_image(), None);
        release.cover_image_url = Some("   ".into());
        assert_eq!(release.cover_image(), None);
        release.cover_image_url = Some(" https://cdn.example.com/cover.jpg".into());
        assert_eq!(release.cover_image(), Some("https://cdn.example.com/cover.jpg"));
    }
}
