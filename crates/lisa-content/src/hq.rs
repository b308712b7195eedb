//! HQ posts: `hq/{lang}/{slug}.md(x)`.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::Serialize;

use crate::frontmatter::{BlogFrontmatter, parse_front_matter};
use crate::{
    CONTENT_EXTENSIONS, ContentError, ContentStore, Document, find_with_extensions,
    is_safe_segment,
};

/// Listing entry for an HQ post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogSummary {
    /// Post slug (file stem).
    pub slug: String,
    /// Parsed front matter.
    #[serde(flatten)]
    pub frontmatter: BlogFrontmatter,
}

impl ContentStore {
    fn hq_dir(&self, lang: &str) -> Option<PathBuf> {
        is_safe_segment(lang).then(|| self.root.join("hq").join(lang))
    }

    /// List every HQ post of a locale, newest first.
    ///
    /// A missing locale directory yields an empty list. Posts with invalid
    /// front matter are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the directory exists but cannot be read.
    pub fn blog_posts(&self, lang: &str) -> Result<Vec<BlogSummary>, ContentError> {
        let Some(dir) = self.hq_dir(lang).filter(|d| d.is_dir()) else {
            return Ok(Vec::new());
        };

        let entries = std::fs::read_dir(&dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut posts = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| ContentError::Io {
                    path: dir.clone(),
                    source,
                })?
                .path();

            let is_content = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext));
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_content || !path.is_file() || !is_safe_segment(slug) {
                continue;
            }
            // `.mdx` wins over a `.md` with the same stem, as in `blog_post`
            if path.extension().is_some_and(|e| e == "md") && path.with_extension("mdx").is_file() {
                continue;
            }

            let raw = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
                path: path.clone(),
                source,
            })?;
            match parse_front_matter::<BlogFrontmatter>(&raw) {
                Ok((frontmatter, _)) => posts.push(BlogSummary {
                    slug: slug.to_owned(),
                    frontmatter,
                }),
                Err(message) => {
                    tracing::warn!(path = %path.display(), %message, "Skipping HQ post");
                }
            }
        }

        posts.sort_by(|a, b| {
            b.frontmatter
                .date
                .cmp(&a.frontmatter.date)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        Ok(posts)
    }

    /// Last modification time of an HQ post's content file.
    #[must_use]
    pub fn blog_modified(&self, lang: &str, slug: &str) -> Option<SystemTime> {
        let dir = self.hq_dir(lang).filter(|_| is_safe_segment(slug))?;
        let path = find_with_extensions(&dir, slug)?;
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// Load and render one HQ post.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if the post does not exist, or an I/O
    /// or front matter error if it cannot be loaded.
    pub fn blog_post(
        &self,
        lang: &str,
        slug: &str,
    ) -> Result<Document<BlogFrontmatter>, ContentError> {
        let path = self
            .hq_dir(lang)
            .filter(|_| is_safe_segment(slug))
            .and_then(|dir| find_with_extensions(&dir, slug))
            .ok_or_else(|| ContentError::NotFound(format!("hq/{lang}/{slug}")))?;
        tracing::debug!(path = %path.display(), "Loading HQ post");
        Document::load(path)
    }
}
