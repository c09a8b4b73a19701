//! Test-only helpers: temporary site roots and a sitemap reader.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tempfile::TempDir;

/// Two real pilots (one verified in CA, one with an unknown region) and a
/// honeypot in CA.
pub const SCENARIO_DATASET: &str = r#"{"pilots":[
  {"id":1,"st":"ca","v":true},
  {"id":2,"st":"ZZ","v":false},
  {"id":3,"_honeypot":true,"st":"ca"}
]}"#;

/// A temporary site root that is removed on drop.
pub struct TestSite {
    temp: TempDir,
}

impl TestSite {
    /// Empty site root (no dataset).
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    /// Site root with `pilots.json` containing `dataset`.
    pub fn with_dataset(dataset: &str) -> Result<Self> {
        let site = Self::new()?;
        site.write("pilots.json", dataset)?;
        Ok(site)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.root().join(rel);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        let path = self.root().join(rel);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}

/// One `<url>` element read back from a sitemap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

/// Parse the `<url>` elements of a sitemap document, in order.
///
/// Panics on malformed XML.
pub fn parse_sitemap(xml: &str) -> Vec<SitemapUrl> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut urls = Vec::new();
    let mut current: Option<SitemapUrl> = None;
    let mut field: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "url" {
                    current = Some(SitemapUrl::default());
                } else if current.is_some() {
                    field = Some(name);
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().expect("unescape text").to_string();
                if let (Some(url), Some(name)) = (current.as_mut(), field.as_deref()) {
                    match name {
                        "loc" => url.loc = text,
                        "lastmod" => url.lastmod = text,
                        "changefreq" => url.changefreq = text,
                        "priority" => url.priority = text,
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "url" {
                    if let Some(url) = current.take() {
                        urls.push(url);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(err) => panic!("malformed sitemap: {err}"),
            _ => {}
        }
        buf.clear();
    }
    urls
}
