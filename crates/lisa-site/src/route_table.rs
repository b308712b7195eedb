//! Flattened route table derived from the route tree.
//!
//! # Architecture
//!
//! The tree is kept as-is (for section lookups and the sidebar) next to a
//! flat `Vec<Page>` in depth-first pre-order. An href index gives O(1)
//! lookups for pagination. When hrefs collide the first page wins, so
//! lookups behave like a linear scan; [`RouteTable::validate`] reports the
//! collision instead.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::dictionary::Dictionary;
use crate::route::{Page, RouteError, RouteNode};

/// Previous and next pages around a documentation page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination<'a> {
    /// Preceding page in reading order.
    pub prev: Option<&'a Page>,
    /// Following page in reading order.
    pub next: Option<&'a Page>,
}

/// Localized navigation item for the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Machine key of the title.
    pub key: String,
    /// Fully-qualified href.
    pub href: String,
    /// True for section headings without a page.
    #[serde(rename = "noLink", skip_serializing_if = "std::ops::Not::not")]
    pub no_link: bool,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Authoring problem found by [`RouteTable::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteIssue {
    /// Two pages resolve to the same fully-qualified href.
    DuplicateHref {
        /// The colliding href.
        href: String,
        /// Title key of the first page using it.
        first: String,
        /// Title key of the later page using it.
        second: String,
    },
    /// A node href that does not start with `/`.
    MissingLeadingSlash {
        /// Title key of the node.
        title: String,
        /// The offending href segment.
        href: String,
    },
}

impl fmt::Display for RouteIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateHref {
                href,
                first,
                second,
            } => write!(f, "duplicate href {href} ({first} and {second})"),
            Self::MissingLeadingSlash { title, href } => {
                write!(f, "href {href:?} of {title} must start with '/'")
            }
        }
    }
}

/// Flatten a route tree into navigable pages.
///
/// Each node emits itself (unless `no_link`) before its children; child
/// hrefs are prefixed with the parent's fully-qualified href.
#[must_use]
pub fn flatten(routes: &[RouteNode]) -> Vec<Page> {
    fn collect(node: &RouteNode, prefix: &str, pages: &mut Vec<Page>) {
        let href = format!("{prefix}{}", node.href);
        if !node.no_link {
            pages.push(Page {
                title: node.title.clone(),
                href: href.clone(),
            });
        }
        for child in &node.items {
            collect(child, &href, pages);
        }
    }

    let mut pages = Vec::new();
    for node in routes {
        collect(node, "", &mut pages);
    }
    pages
}

/// Route tree plus the page list derived from it.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteNode>,
    pages: Vec<Page>,
    href_index: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a route table from the root-level nodes.
    #[must_use]
    pub fn new(routes: Vec<RouteNode>) -> Self {
        let pages = flatten(&routes);
        let mut href_index = HashMap::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            href_index.entry(page.href.clone()).or_insert(i);
        }

        Self {
            routes,
            pages,
            href_index,
        }
    }

    /// Root-level route nodes.
    #[must_use]
    pub fn routes(&self) -> &[RouteNode] {
        &self.routes
    }

    /// All navigable pages in reading order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get a page by its fully-qualified href.
    #[must_use]
    pub fn get(&self, href: &str) -> Option<&Page> {
        self.href_index.get(href).map(|&i| &self.pages[i])
    }

    /// Resolve previous/next pages for an exact href.
    ///
    /// Unknown hrefs have no pagination.
    #[must_use]
    pub fn pagination(&self, href: &str) -> Pagination<'_> {
        let Some(&idx) = self.href_index.get(href) else {
            return Pagination::default();
        };

        Pagination {
            prev: idx.checked_sub(1).map(|i| &self.pages[i]),
            next: self.pages.get(idx + 1),
        }
    }

    /// List the children of the node addressed by `path`.
    ///
    /// The path is walked one segment at a time against sibling hrefs.
    /// Walking stops at the first segment without a match; the children of
    /// the deepest matched node are returned with fully-qualified hrefs.
    /// Returns an empty list when not even the first segment matches.
    #[must_use]
    pub fn children_of(&self, path: &str) -> Vec<Page> {
        let mut level: &[RouteNode] = &self.routes;
        let mut prefix = String::new();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let wanted = format!("/{segment}");
            let Some(found) = level.iter().find(|node| node.href == wanted) else {
                break;
            };
            prefix.push_str(&found.href);
            level = &found.items;
        }

        if prefix.is_empty() {
            return Vec::new();
        }

        level
            .iter()
            .map(|node| Page {
                title: node.title.clone(),
                href: format!("{prefix}{}", node.href),
            })
            .collect()
    }

    /// Build the localized sidebar tree.
    #[must_use]
    pub fn navigation(&self, dictionary: &Dictionary) -> Vec<NavItem> {
        fn build(node: &RouteNode, prefix: &str, dictionary: &Dictionary) -> NavItem {
            let href = format!("{prefix}{}", node.href);
            let children = node
                .items
                .iter()
                .map(|child| build(child, &href, dictionary))
                .collect();

            NavItem {
                title: dictionary.page_title(&node.title),
                key: node.title.clone(),
                href,
                no_link: node.no_link,
                children,
            }
        }

        self.routes
            .iter()
            .map(|node| build(node, "", dictionary))
            .collect()
    }

    /// Collect authoring problems in the tree.
    #[must_use]
    pub fn issues(&self) -> Vec<RouteIssue> {
        fn check_slashes(nodes: &[RouteNode], issues: &mut Vec<RouteIssue>) {
            for node in nodes {
                if !node.href.starts_with('/') {
                    issues.push(RouteIssue::MissingLeadingSlash {
                        title: node.title.clone(),
                        href: node.href.clone(),
                    });
                }
                check_slashes(&node.items, issues);
            }
        }

        let mut issues = Vec::new();
        check_slashes(&self.routes, &mut issues);

        for (i, page) in self.pages.iter().enumerate() {
            let first = self.href_index[&page.href];
            if first != i {
                issues.push(RouteIssue::DuplicateHref {
                    href: page.href.clone(),
                    first: self.pages[first].title.clone(),
                    second: page.title.clone(),
                });
            }
        }

        issues
    }

    /// Validate the tree.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::Validation` listing every issue found.
    pub fn validate(&self) -> Result<(), RouteError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(RouteError::Validation(issues))
        }
    }
}
