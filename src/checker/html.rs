// src/checker/html.rs
// =============================================================================
// This module extracts the facts every SEO rule needs from one HTML page.
//
// We use the `html5ever` tokenizer (the same parser `scraper` is built on)
// rather than a full DOM:
// - Every start tag in the file is seen, including ones the tree builder
//   would throw away (an <img> inside <select>, anything in <noscript>)
// - The tokenizer never fails, so broken or unbalanced markup still gives
//   best-effort facts
//
// Only start tags matter here. End tags, text and comments are ignored.
//
// Rust concepts:
// - Traits: we implement html5ever's TokenSink to receive tokens
// - Option<String>: "attribute missing" is None, which is different from
//   an attribute that is present but empty (Some(""))
// =============================================================================

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::collections::HashMap;

// Substrings that suggest a utility-first CSS framework's breakpoints
const RESPONSIVE_MARKERS: [&str; 5] = ["sm:", "md:", "lg:", "xl:", "2xl:"];

/// An <a href> found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub href: String,
    pub title: Option<String>,
}

/// An <img> found on the page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRef {
    /// Empty string when the src attribute is missing
    pub src: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub alt: Option<String>,
    pub loading: Option<String>,
}

/// A <link> element (canonical, stylesheet, icon, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: Option<String>,
    pub href: Option<String>,
}

/// Everything we learned about one document
#[derive(Debug, Clone, Default)]
pub struct ExtractedFacts {
    pub links: Vec<LinkRef>,
    pub images: Vec<ImageRef>,
    /// name= and property= share one namespace; a repeated key keeps the last value
    pub meta: HashMap<String, Option<String>>,
    pub link_tags: Vec<LinkTag>,
    /// "h1".."h6" in document order, duplicates kept
    pub headings: Vec<String>,
    pub has_title: bool,
    pub has_responsive_classes: bool,
}

impl ExtractedFacts {
    pub fn has_meta(&self, key: &str) -> bool {
        self.meta.contains_key(key)
    }

    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.as_str() == "h1").count()
    }

    pub fn has_canonical(&self) -> bool {
        self.canonical().is_some()
    }

    /// The first <link rel="canonical">, if any
    pub fn canonical(&self) -> Option<&LinkTag> {
        self.link_tags
            .iter()
            .find(|tag| tag.rel.as_deref() == Some("canonical"))
    }

    /// Links without a title attribute
    pub fn untitled_links(&self) -> usize {
        self.links.iter().filter(|link| link.title.is_none()).count()
    }
}

// Extracts facts from HTML content
//
// Parameters:
//   html: the raw page markup (borrowed as &str)
//
// Returns: ExtractedFacts - never fails, malformed markup gives best-effort facts
//
// Example:
//   html = "<title>Hi</title><h1>Hi</h1><a href='/docs.html'>Docs</a>"
//   result.has_title = true, result.headings = ["h1"], result.links[0].href = "/docs.html"
pub fn extract_facts(html: &str) -> ExtractedFacts {
    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(FactSink::default(), TokenizerOpts::default());
    // Our sink never asks to run scripts, so feed() always finishes the input
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.facts
}

// Receives tokens from the tokenizer and records start tags
#[derive(Default)]
struct FactSink {
    facts: ExtractedFacts,
}

impl TokenSink for FactSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                record_start_tag(&mut self.facts, &tag);
                raw_text_mode(&tag.name)
            }
            _ => TokenSinkResult::Continue,
        }
    }
}

// Without a tree builder nobody tells the tokenizer that <script> or
// <title> content is text, so we do it here. Otherwise "<img" inside a
// script string would be counted as an image.
fn raw_text_mode(name: &str) -> TokenSinkResult<()> {
    match name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        _ => TokenSinkResult::Continue,
    }
}

// Records one start tag into the facts
fn record_start_tag(facts: &mut ExtractedFacts, tag: &Tag) {
    // The tokenizer keeps the first of any duplicated attribute
    let attr = |name: &str| {
        tag.attrs
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string())
    };

    match &*tag.name {
        "a" => {
            if let Some(href) = attr("href") {
                facts.links.push(LinkRef {
                    href,
                    title: attr("title"),
                });
            }
        }
        "img" => facts.images.push(ImageRef {
            src: attr("src").unwrap_or_default(),
            width: attr("width"),
            height: attr("height"),
            alt: attr("alt"),
            loading: attr("loading"),
        }),
        "meta" => {
            let content = attr("content");
            // A tag carrying both name= and property= fills both keys
            if let Some(name) = attr("name").filter(|n| !n.is_empty()) {
                facts.meta.insert(name, content.clone());
            }
            if let Some(property) = attr("property").filter(|p| !p.is_empty()) {
                facts.meta.insert(property, content);
            }
        }
        "link" => facts.link_tags.push(LinkTag {
            rel: attr("rel"),
            href: attr("href"),
        }),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => facts.headings.push(tag.name.to_string()),
        "title" => facts.has_title = true,
        _ => {}
    }

    // Heuristic: any attribute on any tag that looks like "md:flex"
    if !facts.has_responsive_classes
        && tag
            .attrs
            .iter()
            .any(|a| RESPONSIVE_MARKERS.iter().any(|m| a.value.contains(m)))
    {
        facts.has_responsive_classes = true;
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a tokenizer instead of a DOM?
//    - A DOM builder "fixes" the page: it drops an <img> inside <select>
//      and may treat <noscript> content as plain text
//    - The rules want every tag the author actually wrote
//    - A tokenizer just reports tags in the order they appear
//
// 2. What is a TokenSink?
//    - A trait (like an interface) with one required method, process_token
//    - The tokenizer calls it for every tag, text run, comment, ...
//    - The return value can switch the tokenizer into "raw text" mode
//
// 3. Does the tokenizer lowercase names?
//    - Yes, <IMG SRC=...> arrives as tag "img" with attribute "src"
//    - Character references like &amp; in attribute values are decoded
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_with_and_without_title() {
        let html = r#"<a href="/docs.html" title="Docs">Docs</a><a href="">Empty</a><a>No href</a>"#;
        let facts = extract_facts(html);
        assert_eq!(
            facts.links,
            vec![
                LinkRef { href: "/docs.html".to_string(), title: Some("Docs".to_string()) },
                LinkRef { href: String::new(), title: None },
            ]
        );
    }

    #[test]
    fn test_image_missing_vs_empty_attributes() {
        let html = r#"<img alt="" width="10"><img src="a.webp" loading="lazy">"#;
        let facts = extract_facts(html);
        assert_eq!(facts.images.len(), 2);
        assert_eq!(facts.images[0].src, "");
        assert_eq!(facts.images[0].alt, Some(String::new()));
        assert_eq!(facts.images[0].width, Some("10".to_string()));
        assert_eq!(facts.images[0].height, None);
        assert_eq!(facts.images[1].alt, None);
        assert_eq!(facts.images[1].loading.as_deref(), Some("lazy"));
    }

    #[test]
    fn test_meta_name_and_property_share_namespace() {
        let html = r#"
            <head>
              <meta name="description" content="first">
              <meta name="description" content="second">
              <meta property="og:title" name="twitter:title" content="Both">
              <meta name="robots">
            </head>
        "#;
        let facts = extract_facts(html);
        assert_eq!(facts.meta["description"].as_deref(), Some("second"));
        assert_eq!(facts.meta["og:title"].as_deref(), Some("Both"));
        assert_eq!(facts.meta["twitter:title"].as_deref(), Some("Both"));
        assert!(facts.has_meta("robots"));
        assert_eq!(facts.meta["robots"], None);
    }

    #[test]
    fn test_headings_title_and_canonical() {
        let html = r#"
            <html><head><title>T</title><link rel="canonical" href="/"><link href="x.css">
            </head><body><h2>a</h2><h1>b</h1><h1>c</h1><h6>d</h6></body></html>
        "#;
        let facts = extract_facts(html);
        assert!(facts.has_title);
        assert_eq!(facts.headings, vec!["h2", "h1", "h1", "h6"]);
        assert_eq!(facts.h1_count(), 2);
        assert!(facts.has_canonical());
        assert_eq!(facts.link_tags.len(), 2);
        assert_eq!(facts.link_tags[1].rel, None);
    }

    #[test]
    fn test_responsive_heuristic_scans_all_attributes() {
        assert!(extract_facts(r#"<div data-x="lg:grid"></div>"#).has_responsive_classes);
        assert!(extract_facts(r#"<p class="2xl:text-lg">x</p>"#).has_responsive_classes);
        assert!(!extract_facts(r#"<div class="grid flex"></div>"#).has_responsive_classes);
    }

    #[test]
    fn test_malformed_markup_is_best_effort() {
        let html = "<title>Broken<h1>Head<img src=\"a.webp\" <a href='x.html'>x</div></span>";
        let facts = extract_facts(html);
        assert!(facts.has_title);
        // Nothing panics and we still get an empty-or-better record
        assert!(facts.headings.len() <= 1);
    }

    #[test]
    fn test_noscript_and_select_contents_are_seen() {
        let html = r#"
            <head><noscript><img src="pixel.gif"></noscript></head>
            <body>
              <noscript><img src="fallback.png"><a href="x.html">x</a></noscript>
              <select><option><img src="in-select.webp"></option></select>
            </body>
        "#;
        let facts = extract_facts(html);
        let srcs: Vec<&str> = facts.images.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(srcs, vec!["pixel.gif", "fallback.png", "in-select.webp"]);
        assert_eq!(facts.links.len(), 1);
        assert_eq!(facts.links[0].href, "x.html");
    }

    #[test]
    fn test_script_and_title_text_are_not_tags() {
        let html = r#"
            <title>Use <h1> wisely</title>
            <script>document.write('<img src="ghost.png">');</script>
            <style>a[href="<a href=x>"] { color: red }</style>
            <h1>Real</h1>
        "#;
        let facts = extract_facts(html);
        assert!(facts.has_title);
        assert!(facts.images.is_empty());
        assert!(facts.links.is_empty());
        assert_eq!(facts.headings, vec!["h1"]);
    }

    #[test]
    fn test_canonical_and_untitled_links() {
        let html = r#"<link rel="canonical" href="https://example.com/a"><a href="a.html">a</a><a href="b.html" title="B">b</a>"#;
        let facts = extract_facts(html);
        assert_eq!(
            facts.canonical().and_then(|tag| tag.href.as_deref()),
            Some("https://example.com/a")
        );
        assert_eq!(facts.untitled_links(), 1);
    }
}
