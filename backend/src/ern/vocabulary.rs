//! Free-text to DDEX controlled vocabulary.
//!
//! Three table-driven mappers (role, explicit status, mix version) plus the
//! name precedence chains. Tables are static and consulted on every call.

use crate::models::{non_empty, ArtistCredit, Release};

pub const CONTRIBUTOR_ROLE: &str = "Contributor";
pub const MAIN_ARTIST_ROLE: &str = "MainArtist";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const INDEPENDENT_LABEL: &str = "Independent Label";

// =============================================================================
// Roles
// =============================================================================

/// Role names as entered by labels, exact match.
pub const ROLE_TABLE: &[(&str, &str)] = &[
    // English
    ("Main Artist", "MainArtist"),
    ("Primary Artist", "MainArtist"),
    ("Featured Artist", "FeaturedArtist"),
    ("Featuring", "FeaturedArtist"),
    ("Artist", "Artist"),
    ("Composer", "Composer"),
    ("Lyricist", "Lyricist"),
    ("Songwriter", "ComposerLyricist"),
    ("Composer & Lyricist", "ComposerLyricist"),
    ("Producer", "Producer"),
    ("Arranger", "Arranger"),
    ("Remixer", "Remixer"),
    ("Mixing Engineer", "MixingEngineer"),
    ("Mastering Engineer", "MasteringEngineer"),
    ("Performer", "Performer"),
    // French
    ("Artiste principal", "MainArtist"),
    ("Artiste invité", "FeaturedArtist"),
    ("Artiste", "Artist"),
    ("Compositeur", "Composer"),
    ("Parolier", "Lyricist"),
    ("Auteur-compositeur", "ComposerLyricist"),
    ("Producteur", "Producer"),
    ("Arrangeur", "Arranger"),
    ("Ingénieur mixage", "MixingEngineer"),
    ("Ingénieur mastering", "MasteringEngineer"),
    ("Interprète", "Performer"),
    // Spanish
    ("Artista principal", "MainArtist"),
    ("Artista invitado", "FeaturedArtist"),
    ("Compositor", "Composer"),
    ("Letrista", "Lyricist"),
    ("Productor", "Producer"),
    ("Arreglista", "Arranger"),
];

/// Map a free-text role to its DDEX role. Unknown or empty yields `Contributor`.
pub fn map_role(role: Option<&str>) -> &'static str {
    let Some(role) = role else {
        return CONTRIBUTOR_ROLE;
    };
    ROLE_TABLE
        .iter()
        .find(|(key, _)| *key == role)
        .map(|(_, ddex)| *ddex)
        .unwrap_or(CONTRIBUTOR_ROLE)
}

/// DDEX role of a credit.
pub fn credit_role(credit: &ArtistCredit) -> &'static str {
    map_role(credit.role.as_deref())
}

// =============================================================================
// Explicit status
// =============================================================================

pub const EXPLICIT_TABLE: &[(&str, &str)] = &[
    ("explicit", "Explicit"),
    ("clean", "NotExplicit"),
    ("edited", "ExplicitContentEdited"),
    ("unspecified", "NoAdviceAvailable"),
];

/// Parental warning for an explicit-content flag, case-insensitive.
/// `None` means the field is left out.
pub fn map_explicit(flag: Option<&str>) -> Option<&'static str> {
    let key = flag?.trim().to_lowercase();
    EXPLICIT_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

// =============================================================================
// Mix version
// =============================================================================

/// Ordered: the first keyword contained in the label wins.
pub const MIX_VERSION_TABLE: &[(&str, &str)] = &[
    ("remix", "Remix"),
    ("live", "LiveVersion"),
    ("acoustic", "AcousticVersion"),
    ("instrumental", "InstrumentalVersion"),
    ("radio", "RadioEdit"),
    ("demo", "DemoVersion"),
    ("extended", "ExtendedVersion"),
    ("acapella", "ACappellaVersion"),
];

/// Version type for a mix-version label, by case-insensitive substring.
///
/// No word-boundary check: "Delivered" contains "live".
pub fn map_mix_version(label: Option<&str>) -> Option<&'static str> {
    let haystack = label?.to_lowercase();
    MIX_VERSION_TABLE
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, version)| *version)
}

// =============================================================================
// Names
// =============================================================================

/// Stage name, then legal name, then plain name, then `Unknown Artist`.
pub fn artist_display_name(credit: &ArtistCredit) -> &str {
    non_empty(&credit.stage_name)
        .or_else(|| non_empty(&credit.legal_name))
        .or_else(|| non_empty(&credit.name))
        .unwrap_or(UNKNOWN_ARTIST)
}

/// Release display artist, then artist name, then `Unknown Artist`.
pub fn release_artist_name(release: &Release) -> &str {
    non_empty(&release.display_artist)
        .or_else(|| non_empty(&release.artist_name))
        .unwrap_or(UNKNOWN_ARTIST)
}

/// Label entity name, then flat label name, then `Independent Label`.
pub fn label_name(release: &Release) -> &str {
    release
        .label
        .as_ref()
        .and_then(|label| non_empty(&label.name))
        .or_else(|| non_empty(&release.label_name))
        .unwrap_or(INDEPENDENT_LABEL)
}

// =============================================================================
// Release type
// =============================================================================

/// `LP` becomes `Album`; absent becomes `Album`; everything else passes through.
pub fn map_release_type(release_type: Option<&str>) -> &str {
    match release_type.map(str::trim) {
        None | Some("") | Some("LP") => "Album",
        Some(other) => other,
    }
}

// =============================================================================
// Tests
// =============================================================================
