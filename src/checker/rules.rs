// src/checker/rules.rs
// =============================================================================
// The rule catalog. Given one page's ExtractedFacts, produce its findings.
//
// Rule groups, in the order they run (and therefore the report order):
// 1. Images: empty src, legacy format, dimensions, alt, lazy loading, broken
// 2. Meta: title, description, keywords, robots, theme-color
// 3. Canonical <link>
// 4. Headings: missing / multiple <h1>
// 5. Links: empty or broken <a href>
// 6. Social: OpenGraph and Twitter card
//
// Every rule is independent, one page can trigger any mix of them.
// =============================================================================

use super::finding::{Category, Finding};
use super::html::{ExtractedFacts, ImageRef};
use super::resolve::resolve_reference;
use std::path::{Path, PathBuf};

/// Where a page lives, so references can be resolved
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Absolute path of the page
    pub path: &'a Path,
    /// Root-relative path used in messages
    pub rel_path: &'a str,
    /// Absolute site root
    pub root: &'a Path,
}

/// Findings for one page plus the local pages it links to
#[derive(Debug, Clone, Default)]
pub struct PageEvaluation {
    pub findings: Vec<Finding>,
    /// Existing targets of every local <a href>, for orphan detection
    pub linked_targets: Vec<PathBuf>,
}

// Runs every rule against one page
pub fn evaluate(facts: &ExtractedFacts, page: PageContext<'_>) -> PageEvaluation {
    let mut eval = PageEvaluation::default();

    for image in &facts.images {
        check_image(image, page, &mut eval.findings);
    }
    check_meta(facts, page, &mut eval.findings);
    check_canonical(facts, page, &mut eval.findings);
    check_headings(facts, page, &mut eval.findings);
    check_links(facts, page, &mut eval);
    check_social(facts, page, &mut eval.findings);

    eval
}

fn check_image(image: &ImageRef, page: PageContext<'_>, findings: &mut Vec<Finding>) {
    let src = image.src.as_str();
    let push = |findings: &mut Vec<Finding>, category: Category, detail: String| {
        findings.push(Finding::new(category, page.rel_path, Some(detail)));
    };

    // An empty src makes every other image check meaningless
    if src.trim().is_empty() || src == "#" {
        push(findings, Category::EmptyImageSrc, "Image has empty or '#' src.".to_string());
        return;
    }

    let lower = src.to_lowercase();
    if !lower.ends_with(".webp") && !lower.ends_with(".svg") && !src.starts_with("http") {
        push(findings, Category::LegacyImageFormat, format!("Image {} is not WebP or SVG.", src));
    }

    if is_blank(&image.width) || is_blank(&image.height) {
        push(findings, Category::MissingDimensions, format!("Image {} missing width/height.", src));
    }

    if is_blank(&image.alt) {
        push(findings, Category::MissingAltText, format!("Image {} missing alt text.", src));
    }

    // Banners are usually above the fold, so they load eagerly on purpose
    if image.loading.as_deref() != Some("lazy") && !lower.contains("banner") {
        push(findings, Category::MissingLazyLoad, format!("Image {} missing loading='lazy'.", src));
    }

    if resolve_reference(src, page.path, page.root).is_broken() {
        push(findings, Category::BrokenImage, format!("{} not found.", src));
    }
}

fn check_meta(facts: &ExtractedFacts, page: PageContext<'_>, findings: &mut Vec<Finding>) {
    if !facts.has_title {
        findings.push(Finding::new(
            Category::MissingTitle,
            page.rel_path,
            Some("No <title> tag found.".to_string()),
        ));
    }

    let required = [
        ("description", Category::MissingMetaDescription),
        ("keywords", Category::MissingMetaKeywords),
        ("robots", Category::MissingMetaRobots),
        ("theme-color", Category::MissingThemeColor),
    ];
    for (key, category) in required {
        if !facts.has_meta(key) {
            findings.push(Finding::new(category, page.rel_path, None));
        }
    }
}

fn check_canonical(facts: &ExtractedFacts, page: PageContext<'_>, findings: &mut Vec<Finding>) {
    if !facts.has_canonical() {
        findings.push(Finding::new(Category::MissingCanonical, page.rel_path, None));
    }
}

fn check_headings(facts: &ExtractedFacts, page: PageContext<'_>, findings: &mut Vec<Finding>) {
    match facts.h1_count() {
        0 => findings.push(Finding::new(
            Category::MissingH1,
            page.rel_path,
            Some("No <h1> tag found.".to_string()),
        )),
        1 => {}
        n => findings.push(Finding::new(
            Category::MultipleH1,
            page.rel_path,
            Some(format!("Found {} <h1> tags.", n)),
        )),
    }
}

fn check_links(facts: &ExtractedFacts, page: PageContext<'_>, eval: &mut PageEvaluation) {
    for link in &facts.links {
        let href = link.href.as_str();

        if href.trim().is_empty() {
            eval.findings.push(Finding::new(
                Category::EmptyLink,
                page.rel_path,
                Some("Link has empty href.".to_string()),
            ));
            continue;
        }

        // One resolution serves both the broken check and the orphan check
        let resolved = resolve_reference(href, page.path, page.root);
        if resolved.is_broken() {
            eval.findings.push(Finding::new(
                Category::BrokenLink,
                page.rel_path,
                Some(format!("{} not found", href)),
            ));
        } else if let Some(found) = resolved.existing_target() {
            eval.linked_targets.push(found.to_path_buf());
        }
    }
}

fn check_social(facts: &ExtractedFacts, page: PageContext<'_>, findings: &mut Vec<Finding>) {
    if !facts.has_meta("og:title") || !facts.has_meta("og:image") {
        findings.push(Finding::new(
            Category::MissingOpenGraph,
            page.rel_path,
            Some("Missing og:title or og:image.".to_string()),
        ));
    }
    if !facts.has_meta("twitter:card") {
        findings.push(Finding::new(
            Category::MissingTwitterCard,
            page.rel_path,
            Some("Missing twitter:card.".to_string()),
        ));
    }
}

// Absent and empty attributes both count as missing
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::html::extract_facts;
    use std::fs;

    // A page that passes every non-image, non-link rule
    const COMPLETE_HEAD: &str = r##"
        <title>Home</title>
        <meta name="description" content="d">
        <meta name="keywords" content="k">
        <meta name="robots" content="index">
        <meta name="theme-color" content="#fff">
        <meta property="og:title" content="t">
        <meta property="og:image" content="i.webp">
        <meta name="twitter:card" content="summary">
        <link rel="canonical" href="https://example.com/">
    "##;

    fn run(html: &str, root: &Path) -> PageEvaluation {
        let path = root.join("index.html");
        let page = PageContext { path: &path, rel_path: "index.html", root };
        evaluate(&extract_facts(html), page)
    }

    fn categories(eval: &PageEvaluation) -> Vec<Category> {
        eval.findings.iter().map(|f| f.category).collect()
    }

    #[test]
    fn test_complete_page_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let html = format!("<html><head>{}</head><body><h1>Hi</h1></body></html>", COMPLETE_HEAD);
        assert!(run(&html, dir.path()).findings.is_empty());
    }

    #[test]
    fn test_missing_title_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let eval = run("<h1>a</h1><h2>b</h2><p>no head at all</p>", dir.path());
        let titles = eval
            .findings
            .iter()
            .filter(|f| f.category == Category::MissingTitle)
            .count();
        assert_eq!(titles, 1);
    }

    #[test]
    fn test_empty_src_suppresses_other_image_checks() {
        let dir = tempfile::tempdir().unwrap();
        let html = format!("{}<h1>x</h1><img src=\"\"><img src=\"#\">", COMPLETE_HEAD);
        let eval = run(&html, dir.path());
        assert_eq!(categories(&eval), vec![Category::EmptyImageSrc, Category::EmptyImageSrc]);
        assert_eq!(
            eval.findings[0].to_string(),
            "[Empty Image Src] In index.html: Image has empty or '#' src."
        );
    }

    #[test]
    fn test_legacy_image_checks() {
        let dir = tempfile::tempdir().unwrap();
        let html = format!("{}<h1>x</h1><img src=\"photo.JPG\" alt=\"\">", COMPLETE_HEAD);
        let eval = run(&html, dir.path());
        assert_eq!(
            categories(&eval),
            vec![
                Category::LegacyImageFormat,
                Category::MissingDimensions,
                Category::MissingAltText,
                Category::MissingLazyLoad,
                Category::BrokenImage,
            ]
        );
        assert_eq!(eval.findings[4].to_string(), "[Broken Image] In index.html: photo.JPG not found.");
    }

    #[test]
    fn test_good_image_and_banner_exemption() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Hero-Banner.webp"), "").unwrap();
        let html = format!(
            "{}<h1>x</h1><img src=\"Hero-Banner.webp\" width=\"1\" height=\"1\" alt=\"hero\">\
             <img src=\"https://cdn.example.com/a.png\" width=\"1\" height=\"1\" alt=\"a\" loading=\"lazy\">",
            COMPLETE_HEAD
        );
        assert!(run(&html, dir.path()).findings.is_empty());
    }

    #[test]
    fn test_multiple_h1_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let html = format!("{}<h1>a</h1><h1>b</h1>", COMPLETE_HEAD);
        let eval = run(&html, dir.path());
        assert_eq!(categories(&eval), vec![Category::MultipleH1]);
        assert_eq!(eval.findings[0].detail.as_deref(), Some("Found 2 <h1> tags."));
    }

    #[test]
    fn test_bare_page_reports_metadata_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let eval = run("<p>hello</p>", dir.path());
        assert_eq!(
            categories(&eval),
            vec![
                Category::MissingTitle,
                Category::MissingMetaDescription,
                Category::MissingMetaKeywords,
                Category::MissingMetaRobots,
                Category::MissingThemeColor,
                Category::MissingCanonical,
                Category::MissingH1,
                Category::MissingOpenGraph,
                Category::MissingTwitterCard,
            ]
        );
        let errors = eval.findings.iter().filter(|f| f.is_error()).count();
        assert_eq!(errors, 3);
    }

    #[test]
    fn test_links_broken_empty_and_collected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("about.html"), "").unwrap();
        let html = format!(
            "{}<h1>x</h1>\
             <a href=\"about.html#team\">ok</a>\
             <a href=\"gone.html\">gone</a>\
             <a href=\"\">empty</a>\
             <a href=\"https://example.com\">ext</a>\
             <a href=\"mailto:a@b.c\">mail</a>",
            COMPLETE_HEAD
        );
        let eval = run(&html, dir.path());
        assert_eq!(categories(&eval), vec![Category::BrokenLink, Category::EmptyLink]);
        assert_eq!(eval.findings[0].to_string(), "[Broken Link] In index.html: gone.html not found");
        assert_eq!(eval.linked_targets, vec![dir.path().join("about.html")]);
    }

    #[test]
    fn test_partial_opengraph_is_one_finding() {
        let dir = tempfile::tempdir().unwrap();
        let html = COMPLETE_HEAD.replace("og:image", "og:description") + "<h1>x</h1>";
        let eval = run(&html, dir.path());
        assert_eq!(categories(&eval), vec![Category::MissingOpenGraph]);
    }
}
