//! schema.org JSON-LD documents.

use serde_json::{Value, json};

/// Path of the `OpenGraph` and publisher logo image.
const LOGO_PATH: &str = "/logo_open_graph.jpg";

/// Social profiles of the organization.
const SAME_AS: [&str; 2] = ["https://x.com/HeyLisaAi", "https://github.com/hey-lisa"];

/// Fields shared by article documents.
pub(crate) struct Article<'a> {
    pub(crate) headline: &'a str,
    pub(crate) description: &'a str,
    pub(crate) url: &'a str,
    pub(crate) date_published: &'a str,
    pub(crate) date_modified: &'a str,
}

fn publisher(site_name: &str, base_url: &str) -> Value {
    json!({
        "@type": "Organization",
        "name": site_name,
        "logo": {
            "@type": "ImageObject",
            "url": format!("{base_url}{LOGO_PATH}"),
        },
    })
}

/// `Organization` document for the site owner.
pub(crate) fn organization(site_name: &str, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site_name,
        "alternateName": "LiSA",
        "url": base_url,
        "logo": {
            "@type": "ImageObject",
            "url": format!("{base_url}{LOGO_PATH}"),
        },
        "sameAs": SAME_AS,
    })
}

/// `WebSite` document for a localized home page.
pub(crate) fn website(site_name: &str, base_url: &str, lang: &str, in_language: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site_name,
        "url": format!("{base_url}/{lang}"),
        "inLanguage": in_language,
        "publisher": { "@type": "Organization", "name": site_name },
    })
}

/// `TechArticle` document for a documentation page.
pub(crate) fn tech_article(article: &Article<'_>, site_name: &str, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "TechArticle",
        "headline": article.headline,
        "description": article.description,
        "url": article.url,
        "datePublished": article.date_published,
        "dateModified": article.date_modified,
        "author": { "@type": "Organization", "name": format!("{site_name} Team") },
        "publisher": publisher(site_name, base_url),
        "mainEntityOfPage": { "@type": "WebPage", "@id": article.url },
    })
}

/// `NewsArticle` document for an HQ post.
pub(crate) fn news_article(
    article: &Article<'_>,
    authors: &[(String, Option<String>)],
    image_url: &str,
    site_name: &str,
    base_url: &str,
    lang: &str,
) -> Value {
    let authors: Vec<Value> = authors
        .iter()
        .map(|(name, url)| json!({ "@type": "Person", "name": name, "url": url }))
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": article.headline,
        "description": article.description,
        "url": article.url,
        "datePublished": article.date_published,
        "dateModified": article.date_modified,
        "author": authors,
        "publisher": publisher(site_name, base_url),
        "image": {
            "@type": "ImageObject",
            "url": image_url,
            "width": 1200,
            "height": 630,
        },
        "mainEntityOfPage": { "@type": "WebPage", "@id": article.url },
        "articleSection": "Blog",
        "isPartOf": {
            "@type": "WebSite",
            "name": "LiSA HQ",
            "url": format!("{base_url}/{lang}/hq"),
        },
    })
}

/// `BreadcrumbList` document from `(name, absolute url)` pairs.
pub(crate) fn breadcrumb_list(items: &[(String, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .zip(1_u32..)
        .map(|((name, url), position)| {
            json!({
                "@type": "ListItem",
                "position": position,
                "name": name,
                "item": url,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}
