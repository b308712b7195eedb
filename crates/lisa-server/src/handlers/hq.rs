//! HQ (blog) API endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use lisa_content::{BlogFrontmatter, BlogSummary, TocEntry};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::{HeadMeta, cached_json};
use crate::state::AppState;
use crate::structured_data::{self, Article};

/// Response for GET /api/hq/{lang}.
#[derive(Serialize)]
struct BlogListResponse {
    lang: &'static str,
    posts: Vec<BlogSummary>,
    meta: HeadMeta,
}

/// Response for GET /api/hq/{lang}/{slug}.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogPostResponse {
    lang: &'static str,
    slug: String,
    frontmatter: BlogFrontmatter,
    html: String,
    toc: Vec<TocEntry>,
    meta: HeadMeta,
    json_ld: Vec<serde_json::Value>,
}

/// Handle GET /api/hq/{lang}.
pub(crate) async fn list_posts(
    Path(lang): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = AppState::locale(&lang)?;
    let dict = state.dictionaries.get(locale);
    let posts = state.content.blog_posts(locale.code())?;

    let meta = HeadMeta {
        title: format!("{} | {}", dict.get("hq.title").unwrap_or("HQ"), state.site_name),
        description: dict.get("hq.description").unwrap_or_default().to_owned(),
        canonical: state.url(&format!("/{locale}/hq")),
        alternates: state.alternates("/hq"),
        og_locale: locale.og_locale(),
        og_type: "website",
    };

    let response = BlogListResponse {
        lang: locale.code(),
        posts,
        meta,
    };
    cached_json(&state, &headers, &response)
}

/// Handle GET /api/hq/{lang}/{slug}.
pub(crate) async fn get_post(
    Path((lang, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = AppState::locale(&lang)?;
    let lang = locale.code();
    let dict = state.dictionaries.get(locale);
    let post = state.content.blog_post(lang, &slug)?;
    let fm = &post.frontmatter;

    let canonical = state.url(&format!("/{lang}/hq/{slug}"));
    let published = fm.date.format("%Y-%m-%d").to_string();
    let cover = fm.cover.as_deref().map_or_else(
        || state.url("/logo_open_graph.jpg"),
        |cover| absolute_url(&state, cover),
    );
    let authors: Vec<(String, Option<String>)> = fm
        .authors
        .iter()
        .map(|a| (a.username.clone(), Some(a.handle_url.clone())))
        .collect();

    let article = Article {
        headline: &fm.title,
        description: &fm.description,
        url: &canonical,
        date_published: &published,
        date_modified: &published,
    };
    let trail = vec![
        (state.site_name.clone(), state.url(&format!("/{lang}"))),
        (
            dict.get("hq.title").unwrap_or("HQ").to_owned(),
            state.url(&format!("/{lang}/hq")),
        ),
        (fm.title.clone(), canonical.clone()),
    ];
    let json_ld = vec![
        structured_data::news_article(
            &article,
            &authors,
            &cover,
            &state.site_name,
            &state.base_url,
            lang,
        ),
        structured_data::breadcrumb_list(&trail),
    ];

    let meta = HeadMeta {
        title: format!("{} | {}", fm.title, state.site_name),
        description: fm.description.clone(),
        canonical,
        alternates: state.alternates(&format!("/hq/{slug}")),
        og_locale: locale.og_locale(),
        og_type: "article",
    };

    let response = BlogPostResponse {
        lang,
        slug,
        frontmatter: post.frontmatter,
        html: post.html,
        toc: post.toc,
        meta,
        json_ld,
    };
    cached_json(&state, &headers, &response)
}

/// Make a possibly site-relative URL absolute.
fn absolute_url(state: &AppState, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else if url.starts_with('/') {
        state.url(url)
    } else {
        state.url(&format!("/{url}"))
    }
}
