// SPDX-License-Identifier: PMPL-1.0-or-later
//! Navigation - WCAG 2.4.1 Bypass Blocks, 2.4.2 Page Titled,
//! 2.4.4 Link Purpose (In Context) (all Level A)

use crate::finding::{Finding, Severity};
use crate::rules::strip_tags;
use regex::Regex;
use std::sync::LazyLock;

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a[^>]*>(.*?)</a>").expect("valid regex"));

/// Link texts that say nothing about the destination
const NON_DESCRIPTIVE_LINK_TEXT: &[&str] = &["click here", "here", "more"];

/// Skip navigation marker anywhere in the document.
///
/// Empty documents pass: there is nothing to bypass.
pub fn bypass_blocks(content: &str) -> Vec<Finding> {
    if content.is_empty() || content.contains("skip") {
        return Vec::new();
    }
    vec![Finding::new(
        "2.4.1",
        Severity::Warning,
        "No skip navigation mechanism detected",
    )
    .with_recommendation("Add skip links for main content and navigation")]
}

/// Missing or empty `<title>`. Empty documents pass.
pub fn page_titled(content: &str) -> Vec<Finding> {
    if content.is_empty() {
        return Vec::new();
    }
    if content.contains("<title>") && !content.contains("<title></title>") {
        return Vec::new();
    }
    vec![Finding::new("2.4.2", Severity::Critical, "Missing or empty page title")
        .with_recommendation("Add descriptive page title")]
}

/// Links with empty or stock text such as "click here"
pub fn link_purpose(content: &str) -> Vec<Finding> {
    LINK.find_iter(content)
        .enumerate()
        .filter_map(|(idx, link)| {
            let text = strip_tags(link.as_str());
            if !text.is_empty() && !NON_DESCRIPTIVE_LINK_TEXT.contains(&text.as_str()) {
                return None;
            }
            Some(
                Finding::new(
                    "2.4.4",
                    Severity::Warning,
                    &format!("Link {} has non-descriptive text: \"{}\"", idx + 1, text),
                )
                .with_element(link.as_str())
                .with_recommendation("Use descriptive link text that explains the destination"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_link_present() {
        let html = r##"<a href="#main" class="skip-link">Skip to content</a><nav></nav>"##;
        assert!(bypass_blocks(html).is_empty());
    }

    #[test]
    fn test_skip_link_missing() {
        let findings = bypass_blocks("<nav><a href=\"/\">Home</a></nav>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_skip_is_case_sensitive() {
        assert_eq!(bypass_blocks("<a href=\"#main\">Skip to content</a>").len(), 1);
    }

    #[test]
    fn test_title() {
        assert!(page_titled("<head><title>Test</title></head>").is_empty());
        assert_eq!(page_titled("<head><title></title></head>").len(), 1);
        assert_eq!(page_titled("<head></head>").len(), 1);
    }

    #[test]
    fn test_empty_document_passes_absence_rules() {
        assert!(page_titled("").is_empty());
        assert!(bypass_blocks("").is_empty());
    }

    #[test]
    fn test_whitespace_only_document_is_audited() {
        let bypass = bypass_blocks("\n");
        assert_eq!(bypass.len(), 1);
        assert_eq!(bypass[0].severity, Severity::Warning);

        let title = page_titled("  \n");
        assert_eq!(title.len(), 1);
        assert_eq!(title[0].severity, Severity::Critical);
    }

    #[test]
    fn test_click_here_link() {
        let findings = link_purpose(r#"<a href="/x">click here</a>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Link 1 has non-descriptive text: \"click here\"");
    }

    #[test]
    fn test_link_index_counts_all_links() {
        let html = r#"<a href="/a">Atlas index</a> <a href="/b"><img src="i.png" alt="x"></a> <a href="/c">more</a>"#;
        let messages: Vec<_> = link_purpose(html).into_iter().map(|f| f.message).collect();
        assert_eq!(
            messages,
            vec![
                "Link 2 has non-descriptive text: \"\"",
                "Link 3 has non-descriptive text: \"more\"",
            ]
        );
    }

    #[test]
    fn test_descriptive_links() {
        assert!(link_purpose(r#"<a href="/towns">Browse drowned towns</a>"#).is_empty());
        assert!(link_purpose("<p>no links</p>").is_empty());
    }
}
