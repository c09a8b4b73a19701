//! Sitemap entry construction.
//!
//! Pure: takes the run date as input so output is reproducible.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pilot::PilotRecord;

/// Path of the per-pilot profile page; the record id goes in the query.
pub const PROFILE_PATH: &str = "/pilot.html";

/// Sitemap protocol `changefreq` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed, non-pilot site route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    pub changefreq: ChangeFreq,
    /// Emitted verbatim, e.g. `"1.0"`.
    pub priority: String,
}

impl StaticPage {
    pub fn new(path: &str, changefreq: ChangeFreq, priority: &str) -> Self {
        Self {
            path: path.to_string(),
            changefreq,
            priority: priority.to_string(),
        }
    }
}

/// Site routes listed ahead of pilot profiles.
pub fn default_static_pages() -> Vec<StaticPage> {
    vec![
        StaticPage::new("/", ChangeFreq::Daily, "1.0"),
        StaticPage::new("/directory.html", ChangeFreq::Daily, "0.9"),
        StaticPage::new("/privacy.html", ChangeFreq::Monthly, "0.3"),
        StaticPage::new("/terms.html", ChangeFreq::Monthly, "0.3"),
    ]
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: String,
}

/// Entry for a real pilot's profile page.
pub fn pilot_entry(domain: &str, pilot: &PilotRecord, today: NaiveDate) -> SitemapEntry {
    let (changefreq, priority) = if pilot.is_verified() {
        (ChangeFreq::Weekly, "0.8")
    } else {
        (ChangeFreq::Monthly, "0.5")
    };
    SitemapEntry {
        loc: format!("{domain}{PROFILE_PATH}?id={}", pilot.id_text()),
        lastmod: today,
        changefreq,
        priority: priority.to_string(),
    }
}

/// Static pages first (configured order), then pilots in input order.
///
/// `pilots` must already be free of honeypots.
pub fn build_entries(
    domain: &str,
    pages: &[StaticPage],
    pilots: &[PilotRecord],
    today: NaiveDate,
) -> Vec<SitemapEntry> {
    let statics = pages.iter().map(|page| SitemapEntry {
        loc: format!("{domain}{}", page.path),
        lastmod: today,
        changefreq: page.changefreq,
        priority: page.priority.clone(),
    });
    let profiles = pilots
        .iter()
        .map(|pilot| pilot_entry(domain, pilot, today));
    statics.chain(profiles).collect()
}
