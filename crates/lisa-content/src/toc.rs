//! Table of contents extraction and heading slugs.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::markdown::heading_anchor;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s(.+)$").expect("valid heading regex"));

/// Characters dropped from slugs. `-` is kept.
const SLUG_PUNCTUATION: &str = "!\"#$%&'()*+,./:;<=>?@[\\]^_`{|}~";

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2-4).
    pub level: u8,
    /// Heading text as written.
    pub text: String,
    /// In-page anchor (`#slug`).
    pub href: String,
}

/// Convert heading text to an anchor slug.
///
/// Lowercases, trims, collapses whitespace runs into `-` and removes ASCII
/// punctuation other than `-`. Non-ASCII letters are kept.
///
/// ```
/// use lisa_content::slugify;
///
/// assert_eq!(slugify("What's next?"), "whats-next");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_space = false;

    for c in lowered.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if !SLUG_PUNCTUATION.contains(c) {
            slug.push(c);
        }
    }

    slug
}

/// Extract level 2-4 ATX headings from a Markdown body.
///
/// Lines inside fenced code blocks are skipped. Anchors match the ids
/// [`render_markdown`](crate::render_markdown) assigns to the same headings.
#[must_use]
pub fn extract_toc(markdown: &str) -> Vec<TocEntry> {
    let mut fence: Option<&str> = None;
    let mut entries = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        let marker = if trimmed.starts_with("```") {
            Some("```")
        } else if trimmed.starts_with("~~~") {
            Some("~~~")
        } else {
            None
        };

        match (fence, marker) {
            (None, Some(m)) => {
                fence = Some(m);
                continue;
            }
            (Some(open), Some(m)) if open == m => {
                fence = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, None) => {}
        }

        let Some(caps) = HEADING_RE.captures(line.trim_end_matches('\r')) else {
            continue;
        };
        let text = caps[2].trim();
        let anchor = heading_anchor(&caps[0]).unwrap_or_else(|| slugify(text));
        entries.push(TocEntry {
            level: u8::try_from(caps[1].len()).unwrap_or(2),
            text: text.to_owned(),
            href: format!("#{anchor}"),
        });
    }

    entries
}
