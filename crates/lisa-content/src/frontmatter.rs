//! YAML front matter for docs and HQ posts.
//!
//! Content files open with a `---` delimited YAML block followed by the
//! Markdown body:
//!
//! ```text
//! ---
//! title: Swap
//! description: Exchange one token for another
//! ---
//! ## Overview
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Front matter of a documentation page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFrontmatter {
    /// Page title.
    pub title: String,
    /// Short description for listings and meta tags.
    #[serde(default)]
    pub description: String,
}

/// Post author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Social handle.
    pub handle: String,
    /// Display name.
    pub username: String,
    /// Link to the author's profile.
    #[serde(alias = "handle_url")]
    pub handle_url: String,
}

/// Front matter of an HQ post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFrontmatter {
    /// Post title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Publication date. Authored as `dd-mm-yyyy`, serialized as ISO 8601.
    #[serde(deserialize_with = "deserialize_post_date")]
    pub date: NaiveDate,
    /// Post authors.
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Parse a post date, accepting `dd-mm-yyyy` and ISO `yyyy-mm-dd`.
pub fn parse_post_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

fn deserialize_post_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_post_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}', expected dd-mm-yyyy")))
}

/// Split a document into its front matter block and body.
///
/// Returns `None` for the block when the document does not open with a
/// `---` line or the block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let body = &rest[offset + line.len()..];
            return (Some(&rest[..offset]), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse the front matter block of a document into `T`.
///
/// Returns the parsed value and the remaining Markdown body.
///
/// # Errors
///
/// Returns a message if the block is missing or does not deserialize.
pub fn parse_front_matter<T: DeserializeOwned>(content: &str) -> Result<(T, &str), String> {
    let (block, body) = split_front_matter(content);
    let block = block.ok_or_else(|| "missing front matter block".to_owned())?;
    let value = serde_yaml::from_str(block).map_err(|e| format!("Invalid YAML: {e}"))?;
    Ok((value, body))
}
