//! `sitemap.xml` rendering.

use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use super::write_atomic;
use crate::core::sitemap::SitemapEntry;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render a complete sitemap document with a trailing newline.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("write xml declaration")?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer
        .write_event(Event::Start(urlset))
        .context("open urlset")?;

    for entry in entries {
        write_url(&mut writer, entry).with_context(|| format!("write url {}", entry.loc))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .context("close urlset")?;

    let mut xml = String::from_utf8(writer.into_inner()).context("sitemap is not utf-8")?;
    xml.push('\n');
    Ok(xml)
}

/// Render and write the sitemap, replacing any previous file.
pub fn write_sitemap(path: &Path, entries: &[SitemapEntry]) -> Result<()> {
    let xml = render_sitemap(entries)?;
    debug!(path = %path.display(), entries = entries.len(), bytes = xml.len(), "writing sitemap");
    write_atomic(path, &xml)
}

fn write_url(writer: &mut Writer<Vec<u8>>, entry: &SitemapEntry) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;
    write_text_element(writer, "loc", &entry.loc)?;
    write_text_element(writer, "lastmod", &entry.lastmod.format("%Y-%m-%d").to_string())?;
    write_text_element(writer, "changefreq", entry.changefreq.as_str())?;
    write_text_element(writer, "priority", &entry.priority)?;
    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
