//! Resource list: one `SoundRecording` per track, plus at most one cover `Image`.
//!
//! Two independent projections run over each track's credits:
//! [`primary_artists`] picks the display artists, [`contributors`] lists every
//! credit. A credit may appear in both.

use crate::error::ErnResult;
use crate::models::{non_empty, Release, Track};

use super::dates::copyright_year;
use super::duration::normalize_duration;
use super::vocabulary::{
    artist_display_name, credit_role, label_name, map_explicit, map_mix_version,
    release_artist_name, MAIN_ARTIST_ROLE,
};
use super::xml::XmlElement;
use super::WORLDWIDE;

pub const DEFAULT_AUDIO_CODEC: &str = "MP3";
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (3000, 3000);
pub const FRONT_COVER_IMAGE: &str = "FrontCoverImage";

// =============================================================================
// References
// =============================================================================

pub fn track_resource_reference(track: &Track) -> String {
    format!("A{}", track.id)
}

pub fn track_technical_reference(track: &Track) -> String {
    format!("T{}", track.id)
}

pub fn image_resource_reference(release: &Release) -> String {
    format!("AIMG{}", release.id)
}

pub fn image_technical_reference(release: &Release) -> String {
    format!("TIMG{}", release.id)
}

pub fn image_proprietary_id(release: &Release) -> String {
    format!("IMG{}", release.id)
}

// =============================================================================
// Credit projections
// =============================================================================

/// A named party with its DDEX role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtistEntry<'a> {
    pub name: &'a str,
    pub role: &'static str,
}

/// Display artists of a track.
///
/// `MainArtist` credits if any; else credits whose role mentions "artist";
/// else, for a track without credits, the release artist.
pub fn primary_artists<'a>(track: &'a Track, release: &'a Release) -> Vec<ArtistEntry<'a>> {
    if track.artists.is_empty() {
        return vec![ArtistEntry {
            name: release_artist_name(release),
            role: MAIN_ARTIST_ROLE,
        }];
    }

    let entries = contributors(track);
    let main: Vec<ArtistEntry<'a>> = entries
        .iter()
        .copied()
        .filter(|e| e.role == MAIN_ARTIST_ROLE)
        .collect();
    if !main.is_empty() {
        return main;
    }

    entries
        .into_iter()
        .filter(|e| e.role.to_lowercase().contains("artist"))
        .collect()
}

/// Every credit of a track, in input order.
pub fn contributors(track: &Track) -> Vec<ArtistEntry<'_>> {
    track
        .artists
        .iter()
        .map(|credit| ArtistEntry {
            name: artist_display_name(credit),
            role: credit_role(credit),
        })
        .collect()
}

// =============================================================================
// Shared nodes
// =============================================================================

pub(crate) fn party_name(name: &str) -> XmlElement {
    XmlElement::new("PartyName").text_child("FullName", name)
}

pub(crate) fn display_artist(sequence: usize, entry: &ArtistEntry<'_>) -> XmlElement {
    XmlElement::new("DisplayArtist")
        .attr("SequenceNumber", sequence.to_string())
        .child(party_name(entry.name))
        .text_child("ArtistRole", entry.role)
}

fn resource_contributor(sequence: usize, entry: &ArtistEntry<'_>) -> XmlElement {
    XmlElement::new("ResourceContributor")
        .attr("SequenceNumber", sequence.to_string())
        .child(party_name(entry.name))
        .text_child("ResourceContributorRole", entry.role)
}

/// `<Genre>` when either genre is present.
pub(crate) fn genre(primary: &Option<String>, secondary: &Option<String>) -> Option<XmlElement> {
    let primary = non_empty(primary);
    let secondary = non_empty(secondary);
    if primary.is_none() && secondary.is_none() {
        return None;
    }
    Some(
        XmlElement::new("Genre")
            .opt_text_child("GenreText", primary)
            .opt_text_child("SubGenre", secondary),
    )
}

/// `<PLine>` or `<CLine>` block, `None` without copyright text.
pub(crate) fn copyright_line(
    element: &str,
    text: &Option<String>,
    year: Option<i32>,
    release_date: &str,
) -> ErnResult<Option<XmlElement>> {
    let Some(text) = non_empty(text) else {
        return Ok(None);
    };
    let year = copyright_year(year, release_date)?;
    Ok(Some(
        XmlElement::new(element)
            .text_child("Year", year.to_string())
            .text_child(format!("{}Text", element), text),
    ))
}

// =============================================================================
// Sound recordings
// =============================================================================

fn audio_codec(track: &Track) -> String {
    non_empty(&track.audio_style)
        .map(str::to_uppercase)
        .unwrap_or_else(|| DEFAULT_AUDIO_CODEC.to_string())
}

fn titles(track: &Track) -> Vec<XmlElement> {
    let mut titles = vec![XmlElement::new("Title")
        .attr("TitleType", "DisplayTitle")
        .text_child("TitleText", track.title.as_str())];

    let label = non_empty(&track.mix_version);
    if let (Some(label), Some(version)) = (label, map_mix_version(label)) {
        titles.push(
            XmlElement::new("Title")
                .attr("TitleType", "VersionTitle")
                .attr("VersionType", version)
                .text_child("TitleText", label),
        );
    }
    titles
}

fn technical_details(track: &Track) -> XmlElement {
    XmlElement::new("TechnicalSoundRecordingDetails")
        .text_child("TechnicalResourceDetailsReference", track_technical_reference(track))
        .text_child("AudioCodecType", audio_codec(track))
        .opt_child(
            non_empty(&track.audio_url).map(|url| XmlElement::new("File").text_child("URL", url)),
        )
}

/// One `<SoundRecording>` node.
pub fn build_sound_recording(track: &Track, release: &Release) -> ErnResult<XmlElement> {
    let instrumental = track.has_lyrics == Some(false);
    let lyrics_language = if instrumental { None } else { non_empty(&track.lyrics_language) };

    let display_artists = primary_artists(track, release)
        .iter()
        .enumerate()
        .map(|(i, entry)| display_artist(i + 1, entry))
        .collect::<Vec<_>>();
    let contributor_nodes = contributors(track)
        .iter()
        .enumerate()
        .map(|(i, entry)| resource_contributor(i + 1, entry))
        .collect::<Vec<_>>();

    let p_line =
        copyright_line("PLine", &release.p_line, release.p_line_year, &release.release_date)?;

    let details = XmlElement::new("SoundRecordingDetailsByTerritory")
        .text_child("TerritoryCode", WORLDWIDE)
        .children(titles(track))
        .children(display_artists)
        .children(contributor_nodes)
        .text_child("LabelName", label_name(release))
        .opt_child(p_line)
        .opt_child(genre(&track.primary_genre, &track.secondary_genre))
        .opt_text_child("ParentalWarningType", map_explicit(track.explicit.as_deref()))
        .opt_text_child("LanguageOfLyrics", lyrics_language)
        .opt_text_child("IsInstrumental", instrumental.then_some("true"))
        .child(technical_details(track));

    Ok(XmlElement::new("SoundRecording")
        .text_child("SoundRecordingType", "MusicalWorkSoundRecording")
        .child(XmlElement::new("SoundRecordingId").text_child("ISRC", track.isrc.as_str()))
        .text_child("ResourceReference", track_resource_reference(track))
        .child(XmlElement::new("ReferenceTitle").text_child("TitleText", track.title.as_str()))
        .opt_text_child("LanguageOfPerformance", non_empty(&track.performance_language))
        .text_child("Duration", normalize_duration(&track.duration))
        .child(details))
}

// =============================================================================
// Cover image
// =============================================================================

/// Parse a `"WxH"` hint.
pub fn parse_dimensions(hint: &str) -> Option<(u32, u32)> {
    let (w, h) = hint.trim().split_once(|c: char| c == 'x' || c == 'X')?;
    let width = w.trim().parse().ok().filter(|v: &u32| *v > 0)?;
    let height = h.trim().parse().ok().filter(|v: &u32| *v > 0)?;
    Some((width, height))
}

fn image_dimensions(release: &Release) -> (u32, u32) {
    release
        .label
        .as_ref()
        .and_then(|label| non_empty(&label.image_dimensions))
        .and_then(parse_dimensions)
        .unwrap_or(DEFAULT_IMAGE_SIZE)
}

/// The release's single `<Image>` node, if it has cover art.
pub fn build_image(release: &Release, sender_party_id: &str) -> Option<XmlElement> {
    let url = release.cover_image()?;
    let (width, height) = image_dimensions(release);

    let technical = XmlElement::new("TechnicalImageDetails")
        .text_child("TechnicalResourceDetailsReference", image_technical_reference(release))
        .text_child("ImageHeight", height.to_string())
        .text_child("ImageWidth", width.to_string())
        .child(XmlElement::new("File").text_child("URL", url));

    Some(
        XmlElement::new("Image")
            .text_child("ImageType", FRONT_COVER_IMAGE)
            .child(
                XmlElement::new("ImageId").child(
                    XmlElement::with_text("ProprietaryId", image_proprietary_id(release))
                        .attr("Namespace", format!("DPID:{}", sender_party_id)),
                ),
            )
            .text_child("ResourceReference", image_resource_reference(release))
            .child(
                XmlElement::new("ImageDetailsByTerritory")
                    .text_child("TerritoryCode", WORLDWIDE)
                    .child(technical),
            ),
    )
}

// =============================================================================
// Resource list
// =============================================================================

/// Output of the resource stage, consumed by the release and relationship builders.
#[derive(Debug, Clone)]
pub struct ResourceSet {
    pub element: XmlElement,
    /// Track references, in input order.
    pub track_references: Vec<String>,
    pub image_reference: Option<String>,
}

impl ResourceSet {
    /// Track references followed by the image reference.
    pub fn ordered_references(&self) -> Vec<String> {
        self.track_references
            .iter()
            .cloned()
            .chain(self.image_reference.clone())
            .collect()
    }
}

/// Build `<ResourceList>` for a release.
pub fn build_resource_list(
    release: &Release,
    tracks: &[Track],
    sender_party_id: &str,
) -> ErnResult<ResourceSet> {
    let mut element = XmlElement::new("ResourceList");
    let mut track_references = Vec::with_capacity(tracks.len());

    for track in tracks {
        element.push(build_sound_recording(track, release)?);
        track_references.push(track_resource_reference(track));
    }

    let image = build_image(release, sender_party_id);
    let image_reference = image.as_ref().map(|_| image_resource_reference(release));
    let element = element.opt_child(image);

    Ok(ResourceSet {
        element,
        track_references,
        image_reference,
    })
}

// =============================================================================
// Tests
// =============================================================================
