// SPDX-License-Identifier: PMPL-1.0-or-later
//! Tag balance - WCAG 4.1.1 Parsing (Level A)
//!
//! Counts anything shaped like an opening tag against anything shaped like a
//! closing tag. Void elements, doctypes and comments all count as openings.

use crate::finding::{Finding, Severity};
use regex::Regex;
use std::sync::LazyLock;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^/][^>]*>").expect("valid regex"));
static CLOSE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</[^>]*>").expect("valid regex"));

/// Mismatched number of opening and closing tags
pub fn parsing(content: &str) -> Vec<Finding> {
    let open = OPEN_TAG.find_iter(content).count();
    let closed = CLOSE_TAG.find_iter(content).count();

    if open == closed {
        return Vec::new();
    }
    vec![Finding::new(
        "4.1.1",
        Severity::Critical,
        &format!("Mismatched tags: {} open, {} closed", open, closed),
    )
    .with_recommendation("Ensure all HTML tags are properly closed")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(parsing("<html><body><p>x</p></body></html>").is_empty());
    }

    #[test]
    fn test_three_open_two_closed() {
        let findings = parsing("<div><p>x</p><span></div>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert!(findings[0].message.contains("3 open, 2 closed"));
    }

    #[test]
    fn test_void_elements_count_as_open() {
        let findings = parsing("<p>a<br>b</p>");
        assert_eq!(findings[0].message, "Mismatched tags: 2 open, 1 closed");
    }

    #[test]
    fn test_plain_text() {
        assert!(parsing("just text").is_empty());
        assert!(parsing("").is_empty());
    }
}
