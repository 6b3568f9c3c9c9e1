//! Generation settings.
//!
//! Defaults match the fixed party identifiers used for production feeds.
//! [`ErnConfig::from_env`] lets a deployment override them without a rebuild.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_SENDER_DPID: &str = "PADPIDA2014120301I";
pub const DEFAULT_RECIPIENT_DPID: &str = "PADPIDA2015120100H";
pub const DEFAULT_RECIPIENT_NAME: &str = "Generic DSP";
pub const DEFAULT_MESSAGE_PREFIX: &str = "ERN";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Which deal catalog to emit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DealProfile {
    /// Streaming, download, ad-supported, conditional download, clips.
    #[default]
    Full,
    /// Subscription streaming and permanent download only.
    #[serde(alias = "simple")]
    Reduced,
}

impl FromStr for DealProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "reduced" | "simple" => Ok(Self::Reduced),
            other => Err(format!("Unknown deal profile: {}", other)),
        }
    }
}

/// Settings for one compiler instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErnConfig {
    pub sender_party_id: String,
    /// Overrides the label name in `MessageSender`.
    pub sender_party_name: Option<String>,
    pub recipient_party_id: String,
    pub recipient_party_name: String,
    pub message_id_prefix: String,
    pub deal_profile: DealProfile,
    pub language_code: String,
}

impl Default for ErnConfig {
    fn default() -> Self {
        Self {
            sender_party_id: DEFAULT_SENDER_DPID.to_string(),
            sender_party_name: None,
            recipient_party_id: DEFAULT_RECIPIENT_DPID.to_string(),
            recipient_party_name: DEFAULT_RECIPIENT_NAME.to_string(),
            message_id_prefix: DEFAULT_MESSAGE_PREFIX.to_string(),
            deal_profile: DealProfile::Full,
            language_code: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ErnConfig {
    /// Read overrides from `DDEX_*` environment variables.
    ///
    /// Absent or unparsable values keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            sender_party_id: get("DDEX_SENDER_DPID").unwrap_or(defaults.sender_party_id),
            sender_party_name: get("DDEX_SENDER_NAME"),
            recipient_party_id: get("DDEX_RECIPIENT_DPID").unwrap_or(defaults.recipient_party_id),
            recipient_party_name: get("DDEX_RECIPIENT_NAME").unwrap_or(defaults.recipient_party_name),
            message_id_prefix: get("DDEX_MESSAGE_PREFIX").unwrap_or(defaults.message_id_prefix),
            deal_profile: get("DDEX_DEAL_PROFILE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.deal_profile),
            language_code: defaults.language_code,
        }
    }

    pub fn with_profile(mut self, profile: DealProfile) -> Self {
        self.deal_profile = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ErnConfig::default();
        assert_eq!(config.sender_party_id, DEFAULT_SENDER_DPID);
        assert_eq!(config.deal_profile, DealProfile::Full);
        assert_eq!(config.language_code, "en");
        assert!(config.sender_party_name.is_none());
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DDEX_SENDER_DPID", "PADPIDA0000000001X"),
            ("DDEX_DEAL_PROFILE", "reduced"),
            ("DDEX_RECIPIENT_NAME", "  "),
        ]);
        let config = ErnConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.sender_party_id, "PADPIDA0000000001X");
        assert_eq!(config.deal_profile, DealProfile::Reduced);
        // Blank values fall back to the default
        assert_eq!(config.recipient_party_name, DEFAULT_RECIPIENT_NAME);
    }

    #[test]
    fn test_unparsable_profile_keeps_default() {
        let config = ErnConfig::from_lookup(|k| (k == "DDEX_DEAL_PROFILE").then(|| "premium".to_string()));
        assert_eq!(config.deal_profile, DealProfile::Full);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("FULL".parse::<DealProfile>(), Ok(DealProfile::Full));
        assert_eq!("simple".parse::<DealProfile>(), Ok(DealProfile::Reduced));
        assert!("gold".parse::<DealProfile>().is_err());
    }

    #[test]
    fn test_profile_serde_matches_from_str() {
        for name in ["full", "reduced", "simple"] {
            let from_serde: DealProfile = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(Ok(from_serde), name.parse::<DealProfile>());
        }
        assert_eq!(serde_json::to_value(DealProfile::Reduced).unwrap(), "reduced");
    }
}
