//! Release list: the single `<Release>` node.

use crate::error::ErnResult;
use crate::models::{non_empty, Release, Track};

use super::dates::format_release_date;
use super::resources::{copyright_line, display_artist, genre, ArtistEntry, ResourceSet};
use super::vocabulary::{label_name, map_release_type, release_artist_name, MAIN_ARTIST_ROLE};
use super::xml::XmlElement;
use super::WORLDWIDE;

pub fn release_reference(release: &Release) -> String {
    format!("R{}", release.id)
}

/// Version title, else alternate title.
pub fn display_title(release: &Release) -> &str {
    non_empty(&release.version_title)
        .or_else(|| non_empty(&release.alternate_title))
        .unwrap_or_default()
}

/// Alternate title, only when it differs from the display title.
pub fn alternative_title(release: &Release) -> Option<&str> {
    let alternate = non_empty(&release.alternate_title)?;
    (alternate != display_title(release)).then_some(alternate)
}

fn release_ids(release: &Release, sender_party_id: &str) -> Vec<XmlElement> {
    let mut ids = vec![XmlElement::new("ReleaseId").text_child("ICPN", release.upc.as_str())];
    if let Some(catalog_number) = non_empty(&release.catalog_number) {
        ids.push(
            XmlElement::new("ReleaseId").child(
                XmlElement::with_text("CatalogNumber", catalog_number)
                    .attr("Namespace", format!("DPID:{}", sender_party_id)),
            ),
        );
    }
    ids
}

fn resource_reference_list(resources: &ResourceSet) -> XmlElement {
    let tracks = resources.track_references.iter().map(|reference| {
        XmlElement::with_text("ReleaseResourceReference", reference.as_str())
            .attr("ReleaseResourceType", "PrimaryResource")
    });
    let image = resources.image_reference.iter().map(|reference| {
        XmlElement::with_text("ReleaseResourceReference", reference.as_str())
            .attr("ReleaseResourceType", "SecondaryResource")
    });
    XmlElement::new("ReleaseResourceReferenceList").children(tracks.chain(image))
}

fn titles(release: &Release) -> Vec<XmlElement> {
    let mut titles = vec![XmlElement::new("Title")
        .attr("TitleType", "DisplayTitle")
        .text_child("TitleText", display_title(release))];
    if let Some(alternate) = alternative_title(release) {
        titles.push(
            XmlElement::new("Title")
                .attr("TitleType", "AlternativeTitle")
                .text_child("TitleText", alternate),
        );
    }
    titles
}

/// Build `<ReleaseList>`.
///
/// Genre comes from the first track only.
pub fn build_release_list(
    release: &Release,
    tracks: &[Track],
    resources: &ResourceSet,
    sender_party_id: &str,
) -> ErnResult<XmlElement> {
    let artist = ArtistEntry {
        name: release_artist_name(release),
        role: MAIN_ARTIST_ROLE,
    };
    let release_genre = tracks
        .first()
        .and_then(|first| genre(&first.primary_genre, &first.secondary_genre));

    let details = XmlElement::new("ReleaseDetailsByTerritory")
        .text_child("TerritoryCode", WORLDWIDE)
        .text_child("DisplayArtistName", artist.name)
        .text_child("LabelName", label_name(release))
        .children(titles(release))
        .child(display_artist(1, &artist))
        .opt_child(release_genre)
        .text_child("OriginalReleaseDate", format_release_date(&release.release_date));

    let p_line =
        copyright_line("PLine", &release.p_line, release.p_line_year, &release.release_date)?;
    let c_line =
        copyright_line("CLine", &release.c_line, release.c_line_year, &release.release_date)?;

    let node = XmlElement::new("Release")
        .children(release_ids(release, sender_party_id))
        .text_child("ReleaseReference", release_reference(release))
        .child(XmlElement::new("ReferenceTitle").text_child("TitleText", display_title(release)))
        .child(resource_reference_list(resources))
        .text_child("ReleaseType", map_release_type(release.release_type.as_deref()))
        .child(details)
        .opt_child(p_line)
        .opt_child(c_line);

    Ok(XmlElement::new("ReleaseList").child(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ern::resources::build_resource_list;

    fn release() -> Release {
        let mut release = Release::new("42", "0602445790296", "2024-03-15");
        release.version_title = Some("Night Drive (Deluxe)".into());
        release.alternate_title = Some("Night Drive".into());
        release.artist_name = Some("Nox".into());
        release.release_type = Some("LP".into());
        release
    }

    fn build(release: &Release, tracks: &[Track]) -> XmlElement {
        let resources = build_resource_list(release, tracks, "DPID1").unwrap();
        let list = build_release_list(release, tracks, &resources, "DPID1").unwrap();
        list.find("Release").cloned().unwrap()
    }

    fn with_genre(id: &str, genre: &str) -> Track {
        let mut track = Track::new(id, id, format!("ISRC{id}"));
        track.primary_genre = Some(genre.into());
        track
    }

    #[test]
    fn test_titles() {
        let release = release();
        assert_eq!(display_title(&release), "Night Drive (Deluxe)");
        assert_eq!(alternative_title(&release), Some("Night Drive"));

        let mut same = release.clone();
        same.version_title = None;
        assert_eq!(display_title(&same), "Night Drive");
        assert_eq!(alternative_title(&same), None);

        let node = build(&release, &[]);
        let titles: Vec<_> = node
            .find("ReleaseDetailsByTerritory")
            .unwrap()
            .find_all("Title")
            .map(|t| t.attribute("TitleType").unwrap_or_default().to_string())
            .collect();
        assert_eq!(titles, vec!["DisplayTitle", "AlternativeTitle"]);
    }

    #[test]
    fn test_identifiers() {
        let mut release = release();
        let node = build(&release, &[]);
        assert_eq!(node.find_all("ReleaseId").count(), 1);
        assert_eq!(node.path_text("ReleaseId/ICPN"), Some("0602445790296"));

        release.catalog_number = Some("NOC-001".into());
        let node = build(&release, &[]);
        let ids: Vec<_> = node.find_all("ReleaseId").collect();
        assert_eq!(ids.len(), 2);
        let catalog = ids[1].find("CatalogNumber").unwrap();
        assert_eq!(catalog.text(), Some("NOC-001"));
        assert_eq!(catalog.attribute("Namespace"), Some("DPID:DPID1"));
    }

    #[test]
    fn test_reference_type_and_artist() {
        let node = build(&release(), &[]);
        assert_eq!(node.child_text("ReleaseReference"), Some("R42"));
        assert_eq!(node.child_text("ReleaseType"), Some("Album"));

        let details = node.find("ReleaseDetailsByTerritory").unwrap();
        assert_eq!(details.child_text("DisplayArtistName"), Some("Nox"));
        assert_eq!(details.child_text("LabelName"), Some("Independent Label"));
        assert_eq!(details.path_text("DisplayArtist/ArtistRole"), Some("MainArtist"));
        assert_eq!(details.child_text("OriginalReleaseDate"), Some("2024-03-15"));
    }

    #[test]
    fn test_copyright_lines() {
        let mut release = release();
        let node = build(&release, &[]);
        assert!(node.find("CLine").is_none());
        assert!(node.find("PLine").is_none());

        release.c_line = Some("Nocturne Records".into());
        release.p_line = Some("Nocturne Records".into());
        release.p_line_year = Some(2020);
        let node = build(&release, &[]);
        assert_eq!(node.path_text("CLine/Year"), Some("2024"));
        assert_eq!(node.path_text("CLine/CLineText"), Some("Nocturne Records"));
        assert_eq!(node.path_text("PLine/Year"), Some("2020"));
    }

    #[test]
    fn test_genre_from_first_track_only() {
        let tracks = vec![with_genre("1", "Jazz"), with_genre("2", "Rock"), with_genre("3", "Pop")];
        let node = build(&release(), &tracks);
        let genres = node.descendants("GenreText");
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].text(), Some("Jazz"));

        // First track without a genre: no release genre at all
        let tracks = vec![Track::new("1", "A", "X1"), with_genre("2", "Rock")];
        let node = build(&release(), &tracks);
        assert!(node.find_path("ReleaseDetailsByTerritory/Genre").is_none());
    }

    #[test]
    fn test_resource_reference_list_order() {
        let mut release = release();
        release.cover_image_url = Some("https://cdn.example.com/cover.jpg".into());
        let tracks = vec![
            Track::new("A", "A", "X1"),
            Track::new("B", "B", "X2"),
            Track::new("C", "C", "X3"),
        ];
        let node = build(&release, &tracks);

        let list = node.find("ReleaseResourceReferenceList").unwrap();
        let refs: Vec<_> = list.children.iter().filter_map(XmlElement::text).collect();
        assert_eq!(refs, vec!["AA", "AB", "AC", "AIMG42"]);
        assert_eq!(list.children[3].attribute("ReleaseResourceType"), Some("SecondaryResource"));
    }

    #[test]
    fn test_malformed_date_with_copyright_fails() {
        let mut release = release();
        release.c_line = Some("Nocturne Records".into());
        release.release_date = "soon".into();
        let resources = build_resource_list(&release, &[], "X").unwrap();
        let err = build_release_list(&release, &[], &resources, "X").unwrap_err();
        assert!(err.is_malformed_input());
    }
}
