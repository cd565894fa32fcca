// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every `<img>` tag must carry a non-empty `alt` attribute. A tag with no
//! `alt=` at all and a tag with `alt=""` are both reported.

use crate::finding::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

static IMG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img[^>]*>").expect("valid regex"));

/// One CRITICAL finding per image lacking alternative text
pub fn non_text_content(content: &str) -> Vec<Finding> {
    IMG.find_iter(content)
        .enumerate()
        .filter(|(_, img)| {
            let tag = img.as_str();
            !tag.contains("alt=") || tag.contains("alt=\"\"")
        })
        .map(|(idx, img)| {
            Finding::new(
                "1.1.1",
                Severity::Critical,
                &format!("Image {} missing alt attribute", idx + 1),
            )
            .with_element(img.as_str())
            .with_recommendation("Add descriptive alt text for all images")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessible_images() {
        let html = r#"
            <img src="logo.png" alt="Company logo">
            <img src="chart.png" alt="Bar chart showing Q4 revenue growth">
        "#;
        assert!(non_text_content(html).is_empty());
    }

    #[test]
    fn test_missing_alt() {
        let findings = non_text_content(r#"<img src="x.png">"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].message, "Image 1 missing alt attribute");
        assert_eq!(findings[0].element.as_deref(), Some(r#"<img src="x.png">"#));
    }

    #[test]
    fn test_empty_alt_is_reported() {
        let findings = non_text_content(r#"<img src="divider.png" alt="">"#);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_index_follows_occurrence_order() {
        let html = r#"<img src="a.png" alt="A"><img src="b.png"><img src="c.png" alt="C"><img src="d.png">"#;
        let messages: Vec<_> = non_text_content(html).into_iter().map(|f| f.message).collect();
        assert_eq!(
            messages,
            vec!["Image 2 missing alt attribute", "Image 4 missing alt attribute"]
        );
    }

    #[test]
    fn test_no_images() {
        assert!(non_text_content("<p>No pictures here</p>").is_empty());
        assert!(non_text_content("").is_empty());
    }

    #[test]
    fn test_uppercase_tag_is_not_matched() {
        // Matching is case-sensitive.
        assert!(non_text_content(r#"<IMG SRC="x.png">"#).is_empty());
    }
}
