// src/checker/finding.rs
// =============================================================================
// The output of the rule evaluator: one Finding per rule violation.
//
// A Finding carries:
// - severity: Error (breaks the site) or Warning (best-practice gap)
// - category: one of a fixed set of rule tags, e.g. [Broken Link]
// - document: the page's path relative to the site root
// - detail: optional rule-specific text (the offending src, a count, ...)
// - message: the full human-readable report line
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Site-health-breaking: broken reference, missing required metadata
    Error,
    /// Best-practice gap, non-breaking
    Warning,
}

/// The closed set of rule categories, serialized as their report labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Empty Image Src")]
    EmptyImageSrc,
    #[serde(rename = "Legacy Image Format")]
    LegacyImageFormat,
    #[serde(rename = "Missing Dimensions")]
    MissingDimensions,
    #[serde(rename = "Missing Alt Text")]
    MissingAltText,
    #[serde(rename = "Missing Lazy Load")]
    MissingLazyLoad,
    #[serde(rename = "Broken Image")]
    BrokenImage,
    #[serde(rename = "Missing Title")]
    MissingTitle,
    #[serde(rename = "Missing Meta Description")]
    MissingMetaDescription,
    #[serde(rename = "Missing Meta Keywords")]
    MissingMetaKeywords,
    #[serde(rename = "Missing Meta Robots")]
    MissingMetaRobots,
    #[serde(rename = "Missing Theme Color")]
    MissingThemeColor,
    #[serde(rename = "Missing Canonical")]
    MissingCanonical,
    #[serde(rename = "Missing H1")]
    MissingH1,
    #[serde(rename = "Multiple H1")]
    MultipleH1,
    #[serde(rename = "Broken Link")]
    BrokenLink,
    #[serde(rename = "Empty Link")]
    EmptyLink,
    #[serde(rename = "Missing OpenGraph")]
    MissingOpenGraph,
    #[serde(rename = "Missing Twitter Card")]
    MissingTwitterCard,
    #[serde(rename = "Unreadable Document")]
    UnreadableDocument,
}

impl Category {
    /// The tag printed between brackets in the report
    pub fn label(self) -> &'static str {
        match self {
            Category::EmptyImageSrc => "Empty Image Src",
            Category::LegacyImageFormat => "Legacy Image Format",
            Category::MissingDimensions => "Missing Dimensions",
            Category::MissingAltText => "Missing Alt Text",
            Category::MissingLazyLoad => "Missing Lazy Load",
            Category::BrokenImage => "Broken Image",
            Category::MissingTitle => "Missing Title",
            Category::MissingMetaDescription => "Missing Meta Description",
            Category::MissingMetaKeywords => "Missing Meta Keywords",
            Category::MissingMetaRobots => "Missing Meta Robots",
            Category::MissingThemeColor => "Missing Theme Color",
            Category::MissingCanonical => "Missing Canonical",
            Category::MissingH1 => "Missing H1",
            Category::MultipleH1 => "Multiple H1",
            Category::BrokenLink => "Broken Link",
            Category::EmptyLink => "Empty Link",
            Category::MissingOpenGraph => "Missing OpenGraph",
            Category::MissingTwitterCard => "Missing Twitter Card",
            Category::UnreadableDocument => "Unreadable Document",
        }
    }

    /// Every category has exactly one severity
    pub fn severity(self) -> Severity {
        match self {
            Category::LegacyImageFormat
            | Category::BrokenImage
            | Category::MissingTitle
            | Category::MissingMetaDescription
            | Category::MissingH1
            | Category::BrokenLink
            | Category::UnreadableDocument => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// One reported rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    /// Root-relative path of the page, always with '/' separators
    pub document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The line printed in the text report
    pub message: String,
}

impl Finding {
    /// Builds a finding whose severity comes from its category
    pub fn new(category: Category, document: &str, detail: Option<String>) -> Self {
        let message = match &detail {
            Some(detail) => format!("[{}] In {}: {}", category.label(), document, detail),
            None => format!("[{}] In {}", category.label(), document),
        };
        Finding {
            severity: category.severity(),
            category,
            document: document.to_string(),
            detail,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// Renders the line exactly as it appears in the text report:
//   [Broken Link] In blog/post.html: ../missing.html not found
impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
