//! Documentation API endpoint.
//!
//! Renders a documentation page and returns it with everything the page
//! template needs: breadcrumbs, pagination, section children, table of
//! contents, head metadata and structured data.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use chrono::{DateTime, Utc};
use lisa_content::{DocFrontmatter, TocEntry};
use lisa_site::{BreadcrumbItem, Dictionary, Page, build_breadcrumbs};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::{HeadMeta, PageLink, cached_json, docs_href};
use crate::state::AppState;
use crate::structured_data::{self, Article};

/// Response for GET /api/docs/{lang}/{slug}.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocResponse {
    /// Locale code.
    lang: &'static str,
    /// Route path without locale (`/moves/swap`, empty for the root).
    route: String,
    /// Page front matter.
    frontmatter: DocFrontmatter,
    /// Rendered HTML body.
    html: String,
    /// Table of contents entries.
    toc: Vec<TocEntry>,
    /// Breadcrumb trail (empty at the root).
    breadcrumbs: Vec<BreadcrumbItem>,
    /// Neighbouring pages in reading order.
    pagination: PaginationResponse,
    /// Children of this route in the tree.
    children: Vec<ChildLink>,
    /// Last modification time (ISO 8601).
    last_modified: Option<String>,
    /// Head metadata.
    meta: HeadMeta,
    /// schema.org documents.
    json_ld: Vec<serde_json::Value>,
}

/// Previous and next links.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
struct PaginationResponse {
    prev: Option<PageLink>,
    next: Option<PageLink>,
}

/// Section child link with its description.
#[derive(Serialize)]
struct ChildLink {
    title: String,
    description: String,
    href: String,
}

/// Handle GET /api/docs/{lang} (documentation root).
pub(crate) async fn get_docs_root(
    Path(lang): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_doc_impl(&lang, "", &state, &headers)
}

/// Handle GET /api/docs/{lang}/{*slug}.
pub(crate) async fn get_doc(
    Path((lang, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_doc_impl(&lang, &slug, &state, &headers)
}

/// Shared implementation for documentation pages.
fn get_doc_impl(
    lang: &str,
    slug: &str,
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let locale = AppState::locale(lang)?;
    let lang = locale.code();
    let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();
    let route: String = segments.iter().map(|s| format!("/{s}")).collect();
    let dict = state.dictionaries.get(locale);

    let doc = state.content.doc(lang, &route)?;
    let last_modified = state
        .content
        .doc_modified(lang, &route)
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

    let breadcrumbs = build_breadcrumbs(
        &docs_href(lang, ""),
        dict.docs_label(),
        &segments,
        dict,
    );

    let pages = state.routes.pagination(&route);
    let pagination = PaginationResponse {
        prev: pages.prev.map(|p| page_link(lang, p, dict)),
        next: pages.next.map(|p| page_link(lang, p, dict)),
    };

    let children = state
        .content
        .section_children(lang, &state.routes.children_of(&route))
        .into_iter()
        .map(|child| ChildLink {
            title: child.title,
            description: child.description,
            href: docs_href(lang, &child.href),
        })
        .collect();

    let canonical = state.url(&docs_href(lang, &route));
    let modified = last_modified.clone().unwrap_or_default();
    let article = Article {
        headline: &doc.frontmatter.title,
        description: &doc.frontmatter.description,
        url: &canonical,
        date_published: &modified,
        date_modified: &modified,
    };

    let mut trail = vec![
        (state.site_name.clone(), state.url(&format!("/{lang}"))),
        (dict.docs_label().to_owned(), state.url(&docs_href(lang, ""))),
    ];
    trail.extend(
        breadcrumbs
            .iter()
            .skip(1)
            .map(|item| (item.title.clone(), state.url(&item.path))),
    );

    let json_ld = vec![
        structured_data::tech_article(&article, &state.site_name, &state.base_url),
        structured_data::breadcrumb_list(&trail),
    ];

    let meta = HeadMeta {
        title: format!(
            "{} | {} | {}",
            doc.frontmatter.title,
            dict.get("metadata.docs_title").unwrap_or("Documentation"),
            state.site_name
        ),
        description: doc.frontmatter.description.clone(),
        canonical,
        alternates: state.alternates(&format!("/docs{route}")),
        og_locale: locale.og_locale(),
        og_type: "article",
    };

    let response = DocResponse {
        lang,
        route,
        frontmatter: doc.frontmatter,
        html: doc.html,
        toc: doc.toc,
        breadcrumbs,
        pagination,
        children,
        last_modified,
        meta,
        json_ld,
    };

    cached_json(state, headers, &response)
}

/// Localized link to a documentation page.
fn page_link(lang: &str, page: &Page, dict: &Dictionary) -> PageLink {
    PageLink {
        title: dict.page_title(&page.title),
        href: docs_href(lang, &page.href),
    }
}
