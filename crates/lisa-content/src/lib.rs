//! Content loading for LiSA Docs.
//!
//! Documentation pages and HQ posts are Markdown files with YAML front
//! matter, stored per locale under a content root:
//!
//! ```text
//! contents/
//! ├── docs/
//! │   ├── en/
//! │   │   ├── index.md
//! │   │   └── moves/swap/index.mdx
//! │   └── fr/...
//! └── hq/
//!     ├── en/roadmap-q3.mdx
//!     └── fr/...
//! ```
//!
//! [`ContentStore`] reads these files on demand. Nothing is cached; every
//! call hits the filesystem.

mod docs;
mod frontmatter;
mod hq;
mod markdown;
mod toc;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use docs::SectionChild;
pub use frontmatter::{
    Author, BlogFrontmatter, DocFrontmatter, parse_front_matter, parse_post_date,
    split_front_matter,
};
pub use hq::BlogSummary;
pub use markdown::render_markdown;
pub use toc::{TocEntry, extract_toc, slugify};

/// File extensions tried for content files, in order.
const CONTENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Error type for content loading.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No content file exists for the requested page or post.
    #[error("Content not found: {0}")]
    NotFound(String),
    /// I/O error reading content.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File or directory path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Front matter is missing or malformed.
    #[error("Invalid front matter in {}: {message}", path.display())]
    FrontMatter {
        /// Content file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// A loaded and rendered content file.
#[derive(Clone, Debug, Serialize)]
pub struct Document<F> {
    /// Parsed front matter.
    pub frontmatter: F,
    /// Rendered HTML body.
    pub html: String,
    /// Level 2-4 headings of the body.
    pub toc: Vec<TocEntry>,
    /// Source file.
    #[serde(skip)]
    pub path: PathBuf,
}

impl<F: serde::de::DeserializeOwned> Document<F> {
    /// Read, parse and render a content file.
    fn load(path: PathBuf) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        let (frontmatter, body) =
            parse_front_matter(&raw).map_err(|message| ContentError::FrontMatter {
                path: path.clone(),
                message,
            })?;

        Ok(Self {
            frontmatter,
            html: render_markdown(body),
            toc: extract_toc(body),
            path,
        })
    }
}

/// Read-only access to the content tree.
#[derive(Clone, Debug)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check that a path component is safe to join onto the content root.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', '\0'])
        && !segment.starts_with('.')
}

/// Find the first existing `{stem}.{ext}` file.
fn find_with_extensions(dir: &Path, stem: &str) -> Option<PathBuf> {
    CONTENT_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}
