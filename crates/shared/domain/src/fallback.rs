//! Built-in fallback values and the accessors that apply them.
//!
//! A field counts as absent when it is missing, mis-shaped, or a blank string.
//! Resolution never fails and never yields a placeholder such as "undefined".

use crate::content::{ContentDocument, Hero, ImpactMetrics, SiteInfo};
use serde::Serialize;

pub const BRAND_NAME: &str = "Neema Foundation";
pub const TAGLINE: &str = "Hope, education and care for every child";
pub const CONTACT_EMAIL: &str = "info@neemafoundation.org";
pub const HERO_TITLE: &str = "Every child deserves a future";
pub const HERO_SUBTITLE: &str =
    "We walk with children and families through education, nutrition and health programs.";
pub const HERO_CTA_LABEL: &str = "Donate Now";
pub const HERO_CTA_HREF: &str = "/donate";
pub const IMPACT_HEADLINE: &str = "Our impact so far";

pub const CHILDREN_SUPPORTED: u64 = 650;
pub const FAMILIES_REACHED: u64 = 180;
pub const VOLUNTEERS: u64 = 45;
pub const COMMUNITIES: u64 = 12;

fn text<'a>(value: Option<&'a String>, fallback: &'a str) -> &'a str {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).unwrap_or(fallback)
}

impl ContentDocument {
    fn site_field(&self, field: impl Fn(&SiteInfo) -> Option<&String>) -> Option<&String> {
        self.site.as_ref().and_then(field)
    }

    fn hero_field(&self, field: impl Fn(&Hero) -> Option<&String>) -> Option<&String> {
        self.hero.as_ref().and_then(field)
    }

    fn metric(&self, field: impl Fn(&ImpactMetrics) -> Option<u64>) -> Option<u64> {
        self.impact.as_ref().and_then(|i| i.metrics.as_ref()).and_then(field)
    }

    #[must_use]
    pub fn brand_name(&self) -> &str {
        text(self.site_field(|s| s.brand_name.as_ref()), BRAND_NAME)
    }

    #[must_use]
    pub fn tagline(&self) -> &str {
        text(self.site_field(|s| s.tagline.as_ref()), TAGLINE)
    }

    #[must_use]
    pub fn contact_email(&self) -> &str {
        text(self.site_field(|s| s.email.as_ref()), CONTACT_EMAIL)
    }

    #[must_use]
    pub fn hero_title(&self) -> &str {
        text(self.hero_field(|h| h.title.as_ref()), HERO_TITLE)
    }

    #[must_use]
    pub fn hero_subtitle(&self) -> &str {
        text(self.hero_field(|h| h.subtitle.as_ref()), HERO_SUBTITLE)
    }

    #[must_use]
    pub fn hero_cta(&self) -> (&str, &str) {
        (
            text(self.hero_field(|h| h.cta_label.as_ref()), HERO_CTA_LABEL),
            text(self.hero_field(|h| h.cta_href.as_ref()), HERO_CTA_HREF),
        )
    }

    #[must_use]
    pub fn impact_headline(&self) -> &str {
        text(self.impact.as_ref().and_then(|i| i.headline.as_ref()), IMPACT_HEADLINE)
    }

    #[must_use]
    pub fn children_supported(&self) -> u64 {
        self.metric(|m| m.children_supported).unwrap_or(CHILDREN_SUPPORTED)
    }

    #[must_use]
    pub fn families_reached(&self) -> u64 {
        self.metric(|m| m.families_reached).unwrap_or(FAMILIES_REACHED)
    }

    #[must_use]
    pub fn volunteers(&self) -> u64 {
        self.metric(|m| m.volunteers).unwrap_or(VOLUNTEERS)
    }

    #[must_use]
    pub fn communities(&self) -> u64 {
        self.metric(|m| m.communities).unwrap_or(COMMUNITIES)
    }
}

/// Impact numbers with fallbacks applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetrics {
    pub children_supported: u64,
    pub families_reached: u64,
    pub volunteers: u64,
    pub communities: u64,
}

/// Everything the landing page renders, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub brand_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub cta_label: String,
    pub cta_href: String,
    pub impact_headline: String,
    pub metrics: ResolvedMetrics,
    pub programs: usize,
    pub events: usize,
    pub donation_methods: usize,
    pub board_members: usize,
}

impl SiteSummary {
    /// Resolves the summary from whatever content is available.
    ///
    /// `None` covers both "still loading" and "failed to load"; the result is then
    /// made of fallback values only.
    #[must_use]
    pub fn resolve(content: Option<&ContentDocument>) -> Self {
        let empty = ContentDocument::default();
        let doc = content.unwrap_or(&empty);
        let (cta_label, cta_href) = doc.hero_cta();
        let len = |items: Option<usize>| items.unwrap_or(0);

        Self {
            brand_name: doc.brand_name().to_owned(),
            tagline: doc.tagline().to_owned(),
            contact_email: doc.contact_email().to_owned(),
            hero_title: doc.hero_title().to_owned(),
            hero_subtitle: doc.hero_subtitle().to_owned(),
            cta_label: cta_label.to_owned(),
            cta_href: cta_href.to_owned(),
            impact_headline: doc.impact_headline().to_owned(),
            metrics: ResolvedMetrics {
                children_supported: doc.children_supported(),
                families_reached: doc.families_reached(),
                volunteers: doc.volunteers(),
                communities: doc.communities(),
            },
            programs: len(doc.programs.as_ref().map(Vec::len)),
            events: len(doc.events.as_ref().map(Vec::len)),
            donation_methods: len(
                doc.donate.as_ref().and_then(|d| d.methods.as_ref()).map(Vec::len),
            ),
            board_members: len(
                doc.governance.as_ref().and_then(|g| g.board.as_ref()).map(Vec::len),
            ),
        }
    }
}
