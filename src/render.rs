//! Markdown rendering for definition bodies

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Turns a markdown body into HTML
pub trait Renderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Options for [`MarkdownRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Pass raw HTML through instead of escaping it
    #[serde(default)]
    pub allow_html: bool,

    /// Give headings an `id` derived from their text
    #[serde(default)]
    pub heading_anchors: bool,
}

/// CommonMark renderer with tables and strikethrough
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn parser_options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let allow_html = self.options.allow_html;
        let mut events: Vec<Event> = Parser::new_ext(markdown, Self::parser_options())
            .map(|event| match event {
                Event::Html(raw) | Event::InlineHtml(raw) if !allow_html => Event::Text(raw),
                other => other,
            })
            .collect();

        if self.options.heading_anchors {
            add_heading_ids(&mut events);
        }

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Assign slugified ids to headings that do not already carry one
fn add_heading_ids(events: &mut [Event]) {
    let mut issued: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    for start in 0..events.len() {
        let needs_id = matches!(&events[start], Event::Start(Tag::Heading { id: None, .. }));
        if !needs_id {
            continue;
        }

        let mut text = String::new();
        for event in &events[start + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let slug = unique_slug(&slugify(&text), &mut issued);

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
            *id = Some(CowStr::from(slug));
        }
    }
}

/// First of `base`, `base-1`, `base-2`, ... not yet issued
fn unique_slug(base: &str, issued: &mut HashSet<String>) -> String {
    let mut slug = base.to_string();
    let mut n = 1;
    while issued.contains(&slug) {
        slug = format!("{}-{}", base, n);
        n += 1;
    }
    issued.insert(slug.clone());
    slug
}

/// Heading text to anchor id: trimmed, lowercased, whitespace runs to `-`
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
