//! Sitemap and robots.txt generation.
//!
//! The flattened route table is the source of documentation URLs; HQ posts
//! come from the content directory. Every URL is listed once per locale
//! with `xhtml:link` alternates pointing at all locales.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use lisa_content::ContentStore;
use lisa_site::{Locale, RouteTable};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

/// Sitemap namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// XHTML namespace used for language alternates.
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Locale-less site sections listed in the sitemap.
const STATIC_PAGES: [(&str, ChangeFreq, f32); 4] = [
    ("/contact", ChangeFreq::Monthly, 0.8),
    ("/lab", ChangeFreq::Weekly, 0.7),
    ("/hq", ChangeFreq::Weekly, 0.8),
    ("/docs", ChangeFreq::Weekly, 0.9),
];

/// How often a URL is expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFreq {
    /// Weekly changes.
    Weekly,
    /// Monthly changes.
    Monthly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A sitemap `<url>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Last modification time.
    pub lastmod: DateTime<Utc>,
    /// Expected change frequency.
    pub changefreq: ChangeFreq,
    /// Relative priority (0.0-1.0).
    pub priority: f32,
    /// `(hreflang, absolute URL)` for every locale.
    pub alternates: Vec<(String, String)>,
}

/// Collect sitemap entries for every locale.
///
/// `now` is used for pages without a content file (home, static sections)
/// and for documentation pages whose file is missing.
#[must_use]
pub fn sitemap_entries(
    routes: &RouteTable,
    content: &ContentStore,
    base_url: &str,
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let mtime = |time: Option<SystemTime>| time.map_or(now, DateTime::<Utc>::from);
    let mut entries = Vec::new();

    for locale in Locale::ALL {
        let lang = locale.code();
        let entry = |path: &str, lastmod, changefreq, priority| SitemapEntry {
            loc: format!("{base_url}/{lang}{path}"),
            lastmod,
            changefreq,
            priority,
            alternates: alternates(base_url, path),
        };

        entries.push(entry("", now, ChangeFreq::Weekly, 1.0));

        for (path, changefreq, priority) in STATIC_PAGES {
            entries.push(entry(path, now, changefreq, priority));
        }

        for page in routes.pages() {
            let lastmod = mtime(content.doc_modified(lang, &page.href));
            entries.push(entry(
                &format!("/docs{}", page.href),
                lastmod,
                ChangeFreq::Weekly,
                0.8,
            ));
        }

        match content.blog_posts(lang) {
            Ok(posts) => {
                for post in posts {
                    let lastmod = mtime(content.blog_modified(lang, &post.slug));
                    entries.push(entry(
                        &format!("/hq/{}", post.slug),
                        lastmod,
                        ChangeFreq::Monthly,
                        0.6,
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(lang, error = %e, "Failed to list HQ posts for sitemap");
            }
        }
    }

    entries
}

fn alternates(base_url: &str, path: &str) -> Vec<(String, String)> {
    Locale::ALL
        .iter()
        .map(|locale| (locale.code().to_owned(), format!("{base_url}/{locale}{path}")))
        .collect()
}

/// Render entries as sitemap XML.
///
/// # Errors
///
/// Returns an error if writing to the in-memory buffer fails.
pub fn render_sitemap(entries: &[SitemapEntry]) -> std::io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .with_attribute(("xmlns:xhtml", XHTML_NS))
        .write_inner_content(|w| {
            for entry in entries {
                w.create_element("url").write_inner_content(|w| {
                    w.create_element("loc")
                        .write_text_content(BytesText::new(&entry.loc))?;
                    w.create_element("lastmod")
                        .write_text_content(BytesText::new(&entry.lastmod.to_rfc3339()))?;
                    w.create_element("changefreq")
                        .write_text_content(BytesText::new(entry.changefreq.as_str()))?;
                    w.create_element("priority")
                        .write_text_content(BytesText::new(&format!("{:.1}", entry.priority)))?;
                    for (hreflang, href) in &entry.alternates {
                        w.create_element("xhtml:link")
                            .with_attribute(("rel", "alternate"))
                            .with_attribute(("hreflang", hreflang.as_str()))
                            .with_attribute(("href", href.as_str()))
                            .write_empty()?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Render robots.txt.
#[must_use]
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /_next/\nDisallow: /api/\n\nHost: {base_url}\nSitemap: {base_url}/sitemap.xml\n"
    )
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::TimeZone;
    use lisa_site::RouteNode;

    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://hey-lisa.com";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![RouteNode::section(
            "moves",
            "/moves",
            vec![RouteNode::page("swap", "/swap"), RouteNode::page("send", "/send")],
        )])
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_sitemap_entries_cover_every_locale() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "hq/fr/lancement.mdx", "---\ntitle: L\ndate: 01-01-2025\n---\n");
        let content = ContentStore::new(dir.path());

        let entries = sitemap_entries(&table(), &content, BASE, now());
        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();

        // 1 home + 4 static + 2 docs per locale, 1 post in fr only
        assert_eq!(entries.len(), 15);
        assert!(locs.contains(&"https://hey-lisa.com/en/docs/moves/swap"));
        assert!(locs.contains(&"https://hey-lisa.com/fr/docs/moves/send"));
        assert!(locs.contains(&"https://hey-lisa.com/fr/hq/lancement"));
        assert!(!locs.contains(&"https://hey-lisa.com/en/hq/lancement"));
    }

    #[test]
    fn test_sitemap_entry_priorities() {
        let dir = tempfile::tempdir().unwrap();
        let content = ContentStore::new(dir.path());

        let entries = sitemap_entries(&table(), &content, BASE, now());

        let home = &entries[0];
        assert_eq!(home.loc, "https://hey-lisa.com/en");
        assert_eq!(home.priority, 1.0);
        let docs = entries
            .iter()
            .find(|e| e.loc == "https://hey-lisa.com/en/docs")
            .unwrap();
        assert_eq!(docs.priority, 0.9);
        let contact = entries
            .iter()
            .find(|e| e.loc == "https://hey-lisa.com/en/contact")
            .unwrap();
        assert_eq!(contact.changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn test_sitemap_doc_lastmod_uses_file_mtime() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docs/en/moves/swap/index.md", "---\ntitle: Swap\n---\n");
        let content = ContentStore::new(dir.path());

        let entries = sitemap_entries(&table(), &content, BASE, now());
        let swap = entries
            .iter()
            .find(|e| e.loc == "https://hey-lisa.com/en/docs/moves/swap")
            .unwrap();
        let send = entries
            .iter()
            .find(|e| e.loc == "https://hey-lisa.com/en/docs/moves/send")
            .unwrap();

        assert_ne!(swap.lastmod, now());
        assert_eq!(send.lastmod, now());
    }

    #[test]
    fn test_alternates() {
        assert_eq!(
            alternates(BASE, "/docs/moves/swap"),
            vec![
                ("en".to_owned(), "https://hey-lisa.com/en/docs/moves/swap".to_owned()),
                ("fr".to_owned(), "https://hey-lisa.com/fr/docs/moves/swap".to_owned()),
            ]
        );
    }

    #[test]
    fn test_render_sitemap() {
        let entries = vec![SitemapEntry {
            loc: "https://hey-lisa.com/en/docs?a=1&b=2".to_owned(),
            lastmod: now(),
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
            alternates: alternates(BASE, "/docs"),
        }];

        let xml = render_sitemap(&entries).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#));
        assert!(xml.contains("<loc>https://hey-lisa.com/en/docs?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2025-06-01T12:00:00+00:00</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="fr" href="https://hey-lisa.com/fr/docs"/>"#
        ));
    }

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt(BASE);

        assert!(robots.contains("Allow: /\n"));
        assert!(robots.contains("Disallow: /_next/\n"));
        assert!(robots.contains("Disallow: /api/\n"));
        assert!(robots.contains("Sitemap: https://hey-lisa.com/sitemap.xml"));
    }
}
