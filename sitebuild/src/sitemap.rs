//! Sitemap builder: `pilots.json` + static pages -> `sitemap.xml`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::core::pilot::{real_pilots, verified_count};
use crate::core::sitemap::build_entries;
use crate::io::config::{SiteConfig, SitePaths, load_site_config};
use crate::io::dataset::load_pilots;
use crate::io::sitemap_xml::write_sitemap;

/// Operator-facing summary of one sitemap build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapReport {
    pub output: PathBuf,
    pub static_pages: usize,
    pub pilot_pages: usize,
    pub verified: usize,
}

impl fmt::Display for SitemapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sitemap: wrote {}", self.output.display())?;
        writeln!(f, "sitemap: static_pages={}", self.static_pages)?;
        writeln!(f, "sitemap: pilot_pages={}", self.pilot_pages)?;
        write!(f, "sitemap: verified_pilots={}", self.verified)
    }
}

/// Build the sitemap for an explicit config, stamping every entry with `today`.
pub fn build_sitemap(
    paths: &SitePaths,
    cfg: &SiteConfig,
    today: NaiveDate,
) -> Result<SitemapReport> {
    let pilots = real_pilots(load_pilots(&paths.input_path)?);
    let entries = build_entries(&cfg.domain, &cfg.static_pages, &pilots, today);
    write_sitemap(&paths.sitemap_path, &entries)
        .with_context(|| format!("write sitemap {}", paths.sitemap_path.display()))?;

    let report = SitemapReport {
        output: paths.sitemap_path.clone(),
        static_pages: cfg.static_pages.len(),
        pilot_pages: pilots.len(),
        verified: verified_count(&pilots),
    };
    info!(
        static_pages = report.static_pages,
        pilot_pages = report.pilot_pages,
        verified = report.verified,
        "sitemap built"
    );
    Ok(report)
}

/// Load `sitebuild.toml` (if any) from `root` and build the sitemap.
pub fn build_sitemap_at(root: &Path, today: NaiveDate) -> Result<SitemapReport> {
    let cfg = load_site_config(root)?;
    let paths = SitePaths::new(root, &cfg);
    build_sitemap(&paths, &cfg, today)
}
