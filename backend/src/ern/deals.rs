//! Deal list: a fixed catalog of commercial terms.
//!
//! Nothing here depends on release content except the release reference
//! and the validity start date.

use crate::config::DealProfile;

use super::xml::XmlElement;
use super::WORLDWIDE;

/// One commercial-terms stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealTemplate {
    pub commercial_model: &'static str,
    pub use_types: &'static [&'static str],
    /// Wholesale price per unit, USD.
    pub unit_price: Option<&'static str>,
}

pub const PRICE_CURRENCY: &str = "USD";

pub const DEAL_CATALOG: &[DealTemplate] = &[
    DealTemplate {
        commercial_model: "SubscriptionModel",
        use_types: &["OnDemandStream"],
        unit_price: None,
    },
    DealTemplate {
        commercial_model: "PayAsYouGoModel",
        use_types: &["PermanentDownload"],
        unit_price: Some("0.99"),
    },
    DealTemplate {
        commercial_model: "AdvertisementSupportedModel",
        use_types: &["OnDemandStream"],
        unit_price: None,
    },
    DealTemplate {
        commercial_model: "SubscriptionModel",
        use_types: &["ConditionalDownload"],
        unit_price: None,
    },
    DealTemplate {
        commercial_model: "AdvertisementSupportedModel",
        use_types: &["UserMakeAvailableLabelProvided", "UserMakeAvailableUserProvided"],
        unit_price: None,
    },
];

/// Deals emitted for a profile.
pub fn catalog(profile: DealProfile) -> &'static [DealTemplate] {
    match profile {
        DealProfile::Full => DEAL_CATALOG,
        DealProfile::Reduced => &DEAL_CATALOG[..2],
    }
}

fn deal(template: &DealTemplate, start_date: &str) -> XmlElement {
    let usage = XmlElement::new("Usage").children(
        template
            .use_types
            .iter()
            .map(|use_type| XmlElement::with_text("UseType", *use_type)),
    );
    let price = template.unit_price.map(|price| {
        XmlElement::new("PriceInformation").child(
            XmlElement::with_text("WholesalePricePerUnit", price).attr("CurrencyCode", PRICE_CURRENCY),
        )
    });

    let terms = XmlElement::new("DealTerms")
        .text_child("CommercialModelType", template.commercial_model)
        .child(usage)
        .text_child("TerritoryCode", WORLDWIDE)
        .opt_child(price)
        .child(XmlElement::new("ValidityPeriod").text_child("StartDate", start_date));

    XmlElement::new("Deal").child(terms)
}

/// Build `<DealList>` for one release.
pub fn build_deal_list(release_reference: &str, start_date: &str, profile: DealProfile) -> XmlElement {
    let release_deal = XmlElement::new("ReleaseDeal")
        .text_child("DealReleaseReference", release_reference)
        .children(catalog(profile).iter().map(|template| deal(template, start_date)))
        .text_child("EffectiveDate", start_date);

    XmlElement::new("DealList").child(release_deal)
}

/// Human-readable catalog, for the CLI.
pub fn catalog_description(profile: DealProfile) -> String {
    catalog(profile)
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let price = t
                .unit_price
                .map(|p| format!(" @ {} {}", p, PRICE_CURRENCY))
                .unwrap_or_default();
            format!("{}. {} [{}]{} - {}", i + 1, t.commercial_model, t.use_types.join(", "), price, WORLDWIDE)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
