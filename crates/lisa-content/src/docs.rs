//! Documentation pages: `docs/{lang}/{route}/index.md(x)`.

use std::path::PathBuf;
use std::time::SystemTime;

use lisa_site::{Page, humanize_key};
use serde::Serialize;

use crate::frontmatter::{DocFrontmatter, parse_front_matter};
use crate::{ContentError, ContentStore, Document, find_with_extensions, is_safe_segment};

/// Front matter summary of a section's child page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionChild {
    /// Page title (front matter, or the humanized route key).
    pub title: String,
    /// Page description (empty when unavailable).
    pub description: String,
    /// Fully-qualified route path.
    pub href: String,
}

impl ContentStore {
    /// Resolve the content file of a documentation route.
    ///
    /// `route` is a fully-qualified route path such as `/moves/swap`; an
    /// empty route (or `/`) addresses the documentation root.
    #[must_use]
    pub fn doc_path(&self, lang: &str, route: &str) -> Option<PathBuf> {
        if !is_safe_segment(lang) {
            return None;
        }
        let mut dir = self.root.join("docs").join(lang);
        for segment in route.split('/').filter(|s| !s.is_empty()) {
            if !is_safe_segment(segment) {
                return None;
            }
            dir.push(segment);
        }
        find_with_extensions(&dir, "index")
    }

    /// Load and render a documentation page.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NotFound` if no content file exists, or an I/O
    /// or front matter error if the file cannot be loaded.
    pub fn doc(&self, lang: &str, route: &str) -> Result<Document<DocFrontmatter>, ContentError> {
        let path = self
            .doc_path(lang, route)
            .ok_or_else(|| ContentError::NotFound(format!("docs/{lang}{route}")))?;
        tracing::debug!(path = %path.display(), "Loading doc");
        Document::load(path)
    }

    /// Read only the front matter of a documentation page.
    ///
    /// # Errors
    ///
    /// Same as [`doc`](Self::doc).
    pub fn doc_frontmatter(&self, lang: &str, route: &str) -> Result<DocFrontmatter, ContentError> {
        let path = self
            .doc_path(lang, route)
            .ok_or_else(|| ContentError::NotFound(format!("docs/{lang}{route}")))?;
        let raw = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        parse_front_matter(&raw)
            .map(|(frontmatter, _)| frontmatter)
            .map_err(|message| ContentError::FrontMatter { path, message })
    }

    /// Last modification time of a documentation page's content file.
    #[must_use]
    pub fn doc_modified(&self, lang: &str, route: &str) -> Option<SystemTime> {
        let path = self.doc_path(lang, route)?;
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// Summaries of a section's children, in route order.
    ///
    /// Children whose content is missing or malformed are still listed, with
    /// a title generated from their route key.
    #[must_use]
    pub fn section_children(&self, lang: &str, children: &[Page]) -> Vec<SectionChild> {
        children
            .iter()
            .map(|page| match self.doc_frontmatter(lang, &page.href) {
                Ok(fm) => SectionChild {
                    title: fm.title,
                    description: fm.description,
                    href: page.href.clone(),
                },
                Err(e) => {
                    tracing::warn!(lang, href = %page.href, error = %e, "Section child without content");
                    SectionChild {
                        title: humanize_key(&page.title),
                        description: String::new(),
                        href: page.href.clone(),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;

    fn write_doc(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_doc_loads_and_renders() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "docs/en/moves/swap/index.mdx",
            "---\ntitle: Swap\ndescription: Exchange tokens\n---\n## How it works\n\nText.\n",
        );
        let store = ContentStore::new(dir.path());

        let doc = store.doc("en", "/moves/swap").unwrap();

        assert_eq!(doc.frontmatter.title, "Swap");
        assert!(doc.html.contains(r#"<h2 id="how-it-works">How it works</h2>"#));
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].href, "#how-it-works");
    }

    #[test]
    fn test_doc_root() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "docs/fr/index.md", "---\ntitle: Documentation\n---\n");
        let store = ContentStore::new(dir.path());

        assert_eq!(store.doc("fr", "").unwrap().frontmatter.title, "Documentation");
        assert_eq!(store.doc("fr", "/").unwrap().frontmatter.title, "Documentation");
    }

    #[test]
    fn test_doc_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::new(dir.path());

        let err = store.doc("en", "/missing").unwrap_err();

        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_doc_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "docs/index.md", "---\ntitle: Outside\n---\n");
        let store = ContentStore::new(dir.path());

        assert!(store.doc_path("en", "/..").is_none());
        assert!(store.doc_path("..", "").is_none());
    }

    #[test]
    fn test_doc_invalid_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "docs/en/bad/index.md", "no front matter");
        let store = ContentStore::new(dir.path());

        let err = store.doc("en", "/bad").unwrap_err();

        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_doc_modified() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "docs/en/a/index.md", "---\ntitle: A\n---\n");
        let store = ContentStore::new(dir.path());

        assert!(store.doc_modified("en", "/a").is_some());
        assert!(store.doc_modified("en", "/b").is_none());
    }

    #[test]
    fn test_section_children() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "docs/en/project-updates/roadmap/index.md",
            "---\ntitle: Roadmap\ndescription: What ships next\n---\n",
        );
        let store = ContentStore::new(dir.path());
        let pages = vec![
            Page {
                title: "roadmap".to_owned(),
                href: "/project-updates/roadmap".to_owned(),
            },
            Page {
                title: "state_of_play".to_owned(),
                href: "/project-updates/state-of-play".to_owned(),
            },
        ];

        let children = store.section_children("en", &pages);

        assert_eq!(
            children,
            vec![
                SectionChild {
                    title: "Roadmap".to_owned(),
                    description: "What ships next".to_owned(),
                    href: "/project-updates/roadmap".to_owned(),
                },
                SectionChild {
                    title: "State Of Play".to_owned(),
                    description: String::new(),
                    href: "/project-updates/state-of-play".to_owned(),
                },
            ]
        );
    }
}
