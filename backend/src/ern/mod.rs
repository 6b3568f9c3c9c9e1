//! DDEX ERN 3.8.2 document compiler.
//!
//! A single pass over one release, leaves first:
//!
//! ```text
//! ┌─────────┐  ┌────────────┐  ┌──────────┐
//! │   ids   │  │ vocabulary │  │ duration │
//! └────┬────┘  └─────┬──────┘  └────┬─────┘
//!      │             ▼              ▼
//!      │       ┌──────────────────────────┐
//!      │       │        resources         │
//!      │       └────────────┬─────────────┘
//!      │                    ▼
//!      │       ┌──────────────────────────┐
//!      │       │         release          │
//!      │       └────────────┬─────────────┘
//!      │                    ▼
//!      │       ┌──────────────────────────┐
//!      │       │  deals / relationships   │
//!      │       └────────────┬─────────────┘
//!      ▼                    ▼
//! ┌────────────────────────────────────────┐
//! │      assembler (this module) → XML     │
//! └────────────────────────────────────────┘
//! ```
//!
//! Everything except [`ids`] is deterministic. The clock and random source
//! are injected through [`ErnCompiler::with_sources`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use ddexgen::{ErnCompiler, ErnConfig, parse_bundle_str};
//!
//! let bundle = parse_bundle_str(json)?;
//! let xml = ErnCompiler::new(ErnConfig::default()).compile(&bundle)?;
//! ```

pub mod dates;
pub mod deals;
pub mod duration;
pub mod ids;
pub mod relationships;
pub mod release;
pub mod resources;
pub mod vocabulary;
pub mod xml;

use crate::config::{DealProfile, ErnConfig};
use crate::error::ErnResult;
use crate::models::{non_empty, Release, ReleaseBundle};

use self::dates::format_release_date;
use self::deals::{build_deal_list, catalog};
use self::ids::{stamp, Clock, MessageStamp, RandomSource, SystemClock, UuidRandom};
use self::relationships::build_relationships;
use self::release::{build_release_list, release_reference};
use self::resources::{build_resource_list, party_name};
use self::vocabulary::label_name;
use self::xml::{to_xml_string, XmlElement};

pub const ERN_NAMESPACE: &str = "http://ddex.net/xml/ern/38";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const SCHEMA_LOCATION: &str =
    "http://ddex.net/xml/ern/38 http://ddex.net/xml/ern/38/release-notification.xsd";
pub const ERN_SCHEMA_VERSION: &str = "ern/382";
pub const ROOT_ELEMENT: &str = "ern:NewReleaseMessage";
pub const WORLDWIDE: &str = "Worldwide";

// =============================================================================
// Compiled document
// =============================================================================

/// A compiled message, before serialization.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    pub root: XmlElement,
    pub stamp: MessageStamp,
    pub release_reference: String,
    /// Track references then the image reference, as listed in the release.
    pub resource_references: Vec<String>,
    pub track_count: usize,
    pub deal_count: usize,
    pub has_image: bool,
}

impl CompiledDocument {
    pub fn to_xml(&self) -> ErnResult<String> {
        to_xml_string(&self.root)
    }
}

// =============================================================================
// Compiler
// =============================================================================

/// Turns release bundles into ERN messages.
///
/// Holds no per-release state; one instance can serve concurrent calls.
pub struct ErnCompiler {
    config: ErnConfig,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl ErnCompiler {
    /// Compiler reading the wall clock and UUID randomness.
    pub fn new(config: ErnConfig) -> Self {
        Self::with_sources(config, SystemClock, UuidRandom)
    }

    /// Compiler with injected time and randomness.
    pub fn with_sources(
        config: ErnConfig,
        clock: impl Clock + 'static,
        random: impl RandomSource + 'static,
    ) -> Self {
        Self {
            config,
            clock: Box::new(clock),
            random: Box::new(random),
        }
    }

    pub fn config(&self) -> &ErnConfig {
        &self.config
    }

    /// Build the document tree for one release.
    pub fn build(&self, bundle: &ReleaseBundle) -> ErnResult<CompiledDocument> {
        self.build_with_profile(bundle, self.config.deal_profile)
    }

    /// Same as [`build`](Self::build) with another deal catalog.
    pub fn build_with_profile(
        &self,
        bundle: &ReleaseBundle,
        profile: DealProfile,
    ) -> ErnResult<CompiledDocument> {
        let release = &bundle.release;
        let tracks = &bundle.tracks;
        let config = &self.config;

        let stamp = stamp(&config.message_id_prefix, self.clock.as_ref(), self.random.as_ref());
        let release_ref = release_reference(release);
        let release_date = format_release_date(&release.release_date);

        let resources = build_resource_list(release, tracks, &config.sender_party_id)?;
        let release_list = build_release_list(release, tracks, &resources, &config.sender_party_id)?;
        let deal_list = build_deal_list(&release_ref, &release_date, profile);
        let relationships = build_relationships(&release_ref, &resources.track_references);

        let root = XmlElement::new(ROOT_ELEMENT)
            .attr("xmlns:ern", ERN_NAMESPACE)
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xsi:schemaLocation", SCHEMA_LOCATION)
            .attr("MessageSchemaVersionId", ERN_SCHEMA_VERSION)
            .attr("LanguageAndScriptCode", config.language_code.as_str())
            .child(message_header(&stamp, release, config))
            .text_child("UpdateIndicator", "OriginalMessage")
            .child(resources.element.clone())
            .child(release_list)
            .child(deal_list)
            .opt_child(relationships);

        Ok(CompiledDocument {
            root,
            release_reference: release_ref,
            resource_references: resources.ordered_references(),
            track_count: tracks.len(),
            deal_count: catalog(profile).len(),
            has_image: resources.image_reference.is_some(),
            stamp,
        })
    }

    /// Build and serialize one release.
    pub fn compile(&self, bundle: &ReleaseBundle) -> ErnResult<String> {
        self.build(bundle)?.to_xml()
    }
}

fn message_party(element: &str, party_id: &str, name: &str) -> XmlElement {
    XmlElement::new(element)
        .text_child("PartyId", party_id)
        .child(party_name(name))
}

fn message_header(stamp: &MessageStamp, release: &Release, config: &ErnConfig) -> XmlElement {
    let sender_name = non_empty(&config.sender_party_name).unwrap_or_else(|| label_name(release));

    XmlElement::new("MessageHeader")
        .text_child("MessageThreadId", stamp.message_id.as_str())
        .text_child("MessageId", stamp.message_id.as_str())
        .child(message_party("MessageSender", &config.sender_party_id, sender_name))
        .child(message_party(
            "MessageRecipient",
            &config.recipient_party_id,
            &config.recipient_party_name,
        ))
        .text_child("MessageCreatedDateTime", stamp.created_at.as_str())
        .text_child("MessageControlType", "LiveMessage")
}

// =============================================================================
// Tests
// =============================================================================
