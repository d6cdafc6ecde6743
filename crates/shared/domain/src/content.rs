//! The editable site content document.
//!
//! Every attribute is optional and a partial document is valid. The raw JSON is
//! kept verbatim; typed sections are read leniently, so a section or list item
//! with an unexpected shape reads as absent rather than failing the load.

use crate::lenient;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The single structured record describing all editable site content.
///
/// Replaced wholesale on reload, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDocument {
    raw: Value,
    pub site: Option<SiteInfo>,
    pub hero: Option<Hero>,
    pub impact: Option<Impact>,
    pub programs: Option<Vec<Program>>,
    pub events: Option<Vec<EventListing>>,
    pub donate: Option<Donate>,
    pub governance: Option<Governance>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Sections {
    #[serde(deserialize_with = "lenient::opt")]
    site: Option<SiteInfo>,
    #[serde(deserialize_with = "lenient::opt")]
    hero: Option<Hero>,
    #[serde(deserialize_with = "lenient::opt")]
    impact: Option<Impact>,
    #[serde(deserialize_with = "lenient::items")]
    programs: Option<Vec<Program>>,
    #[serde(deserialize_with = "lenient::items")]
    events: Option<Vec<EventListing>>,
    #[serde(deserialize_with = "lenient::opt")]
    donate: Option<Donate>,
    #[serde(deserialize_with = "lenient::opt")]
    governance: Option<Governance>,
}

impl ContentDocument {
    /// Builds a document from an already parsed JSON value.
    ///
    /// Never fails: a non-object value yields a document with no typed sections.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let sections = if raw.is_object() {
            Sections::deserialize(&raw).unwrap_or_default()
        } else {
            Sections::default()
        };

        Self {
            raw,
            site: sections.site,
            hero: sections.hero,
            impact: sections.impact,
            programs: sections.programs,
            events: sections.events,
            donate: sections.donate,
            governance: sections.governance,
        }
    }

    /// Parses a response body.
    ///
    /// # Errors
    /// Fails only when `bytes` is not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Value>(bytes).map(Self::from_value)
    }

    /// The document exactly as it was received.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Looks up a raw value by JSON pointer, e.g. `/site/brandName`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.raw.pointer(pointer)
    }
}

impl<'de> Deserialize<'de> for ContentDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Organizational identity and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteInfo {
    #[serde(deserialize_with = "lenient::opt")]
    pub brand_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub tagline: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub socials: Option<Vec<SocialLink>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub platform: Option<String>,
    pub url: Option<String>,
}

/// Landing-page hero block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hero {
    #[serde(deserialize_with = "lenient::opt")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub subtitle: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub cta_label: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub cta_href: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Impact {
    #[serde(deserialize_with = "lenient::opt")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub metrics: Option<ImpactMetrics>,
}

/// Headline numbers shown in the impact band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImpactMetrics {
    #[serde(deserialize_with = "lenient::count")]
    pub children_supported: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub families_reached: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub volunteers: Option<u64>,
    #[serde(deserialize_with = "lenient::count")]
    pub communities: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Program {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventListing {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Free-form date as written by editors (usually ISO `YYYY-MM-DD`).
    pub date: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub registration_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Donate {
    #[serde(deserialize_with = "lenient::items")]
    pub methods: Option<Vec<DonationMethod>>,
    #[serde(deserialize_with = "lenient::opt")]
    pub bank: Option<BankDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DonationMethod {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Details for direct bank transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(deserialize_with = "lenient::opt")]
    pub bank_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub account_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub account_number: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub branch: Option<String>,
    #[serde(deserialize_with = "lenient::opt")]
    pub swift_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Governance {
    #[serde(deserialize_with = "lenient::items")]
    pub board: Option<Vec<BoardMember>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
}
