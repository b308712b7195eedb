//! Markdown to HTML rendering.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::toc::slugify;

/// Parser options: GFM tables, strikethrough, task lists and `{#id}` heading attributes.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a Markdown body to HTML.
///
/// Headings without an explicit id get one derived with [`slugify`] from
/// their plain text, so they line up with table of contents anchors.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, parser_options()).collect();
    assign_heading_ids(&mut events);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut i = 0;
    while i < events.len() {
        let needs_id = matches!(&events[i], Event::Start(Tag::Heading { id: None, .. }));
        if !needs_id {
            i += 1;
            continue;
        }

        let (text, end) = heading_text(events, i + 1);
        let slug = slugify(&text);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i]
            && !slug.is_empty()
        {
            *id = Some(CowStr::from(slug));
        }
        i = end + 1;
    }
}

/// Plain text of a heading starting at `start`, and the index of its end event.
fn heading_text(events: &[Event<'_>], start: usize) -> (String, usize) {
    let mut text = String::new();
    let mut end = start;
    while end < events.len() {
        match &events[end] {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
        end += 1;
    }
    (text, end)
}

/// Anchor id the renderer gives a single heading line.
///
/// An explicit `{#id}` wins; otherwise the rendered text is slugged, so
/// link targets and emphasis markers never leak into the anchor.
pub(crate) fn heading_anchor(line: &str) -> Option<String> {
    let events: Vec<Event<'_>> = Parser::new_ext(line, parser_options()).collect();
    let start = events
        .iter()
        .position(|event| matches!(event, Event::Start(Tag::Heading { .. })))?;
    if let Event::Start(Tag::Heading { id: Some(id), .. }) = &events[start] {
        return Some(id.to_string());
    }
    let (text, _) = heading_text(&events, start + 1);
    Some(slugify(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph() {
        assert_eq!(render_markdown("Hello **world**"), "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn test_heading_ids_match_toc_slugs() {
        let html = render_markdown("## Fees & Penalties\n\n### Using `swap`\n");

        assert!(html.contains(r#"<h2 id="fees--penalties">"#), "{html}");
        assert!(html.contains(r#"<h3 id="using-swap">"#), "{html}");
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = render_markdown("## Overview {#custom}\n");

        assert!(html.contains(r#"id="custom""#), "{html}");
    }

    #[test]
    fn test_heading_anchor() {
        assert_eq!(heading_anchor("## [Swap](/moves/swap)").as_deref(), Some("swap"));
        assert_eq!(heading_anchor("## Using *`swap`* safely").as_deref(), Some("using-swap-safely"));
        assert_eq!(heading_anchor("## Overview {#custom}").as_deref(), Some("custom"));
        assert_eq!(heading_anchor("plain paragraph"), None);
    }

    #[test]
    fn test_gfm_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_strikethrough_and_tasklist() {
        let html = render_markdown("~~old~~\n\n- [x] done\n- [ ] open\n");

        assert!(html.contains("<del>old</del>"));
        assert!(html.contains(r#"type="checkbox""#));
    }
}
