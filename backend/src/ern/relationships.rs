//! Track sequencing for multi-track releases.

use super::xml::XmlElement;

/// Build `<ResourceGroup>`, one item per track reference.
///
/// Single-track releases get nothing. Sequence numbers start at 1 and follow
/// the order of `track_references`.
pub fn build_relationships(release_reference: &str, track_references: &[String]) -> Option<XmlElement> {
    if track_references.len() <= 1 {
        return None;
    }

    let items = track_references.iter().enumerate().map(|(i, reference)| {
        XmlElement::new("ResourceGroupContentItem")
            .text_child("SequenceNumber", (i + 1).to_string())
            .text_child("ReleaseReference", release_reference)
            .text_child("ResourceType", "SoundRecording")
            .text_child("ReleaseResourceReference", reference.as_str())
    });

    Some(XmlElement::new("ResourceGroup").children(items))
}
