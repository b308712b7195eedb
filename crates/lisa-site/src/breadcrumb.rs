//! Breadcrumb trails for documentation slugs.

use serde::Serialize;

use crate::dictionary::Dictionary;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
    /// True for the final entry (current page, rendered without a link).
    pub current: bool,
}

/// Build the breadcrumb trail for a documentation slug.
///
/// The trail starts with a root entry (`root_title` at `base_path`),
/// followed by one entry per slug segment with cumulative paths. Segment
/// titles come from the dictionary's `leftbar` section (hyphens mapped to
/// underscores), falling back to [`humanize_segment`].
///
/// An empty slug yields an empty trail: the docs root carries no crumb.
#[must_use]
pub fn build_breadcrumbs<S: AsRef<str>>(
    base_path: &str,
    root_title: &str,
    slug: &[S],
    dictionary: &Dictionary,
) -> Vec<BreadcrumbItem> {
    if slug.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::with_capacity(slug.len() + 1);
    items.push(BreadcrumbItem {
        title: root_title.to_owned(),
        path: base_path.to_owned(),
        current: false,
    });

    let mut path = base_path.to_owned();
    for (i, segment) in slug.iter().enumerate() {
        let segment = segment.as_ref();
        path.push('/');
        path.push_str(segment);

        let title = dictionary
            .leftbar(&segment.replace('-', "_"))
            .map_or_else(|| humanize_segment(segment), str::to_owned);

        items.push(BreadcrumbItem {
            title,
            path: path.clone(),
            current: i == slug.len() - 1,
        });
    }

    items
}

/// Generate a label from a hyphenated path segment.
///
/// ```
/// use lisa_site::humanize_segment;
///
/// assert_eq!(humanize_segment("project-updates"), "Project Updates");
/// ```
#[must_use]
pub fn humanize_segment(segment: &str) -> String {
    segment
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a label from an underscored dictionary key.
#[must_use]
pub fn humanize_key(key: &str) -> String {
    humanize_segment(&key.replace('_', "-"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dict() -> Dictionary {
        Dictionary::from_value(serde_json::json!({
            "leftbar": {
                "project_updates": "Project Updates",
                "empty": ""
            }
        }))
    }

    fn crumb(title: &str, path: &str, current: bool) -> BreadcrumbItem {
        BreadcrumbItem {
            title: title.to_owned(),
            path: path.to_owned(),
            current,
        }
    }

    #[test]
    fn test_build_breadcrumbs_translation_and_fallback() {
        let trail = build_breadcrumbs("/en/docs", "Docs", &["project-updates", "roadmap"], &dict());

        assert_eq!(
            trail,
            vec![
                crumb("Docs", "/en/docs", false),
                crumb("Project Updates", "/en/docs/project-updates", false),
                crumb("Roadmap", "/en/docs/project-updates/roadmap", true),
            ]
        );
    }

    #[test]
    fn test_build_breadcrumbs_empty_slug() {
        let slug: [&str; 0] = [];

        assert!(build_breadcrumbs("/en/docs", "Docs", &slug, &dict()).is_empty());
    }

    #[test]
    fn test_build_breadcrumbs_single_segment_is_current() {
        let trail = build_breadcrumbs("/fr/docs", "Docs", &["moves".to_owned()], &dict());

        assert_eq!(trail.len(), 2);
        assert!(!trail[0].current);
        assert!(trail[1].current);
        assert_eq!(trail[1].title, "Moves");
    }

    #[test]
    fn test_build_breadcrumbs_empty_translation_falls_back() {
        let trail = build_breadcrumbs("/en/docs", "Docs", &["empty"], &dict());

        assert_eq!(trail[1].title, "Empty");
    }

    #[test]
    fn test_humanize_segment() {
        assert_eq!(humanize_segment("roadmap"), "Roadmap");
        assert_eq!(humanize_segment("what-you-can-do"), "What You Can Do");
        assert_eq!(humanize_segment("état-des-lieux"), "État Des Lieux");
        assert_eq!(humanize_segment(""), "");
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("lisa_token_overview"), "Lisa Token Overview");
    }
}
