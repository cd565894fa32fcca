// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible names - WCAG 4.1.2 Name, Role, Value (Level A)

use crate::finding::{Finding, Severity};
use crate::rules::strip_tags;
use regex::Regex;
use std::sync::LazyLock;

static INPUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<input[^>]*>").expect("valid regex"));
static BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<button[^>]*>(.*?)</button>").expect("valid regex"));

/// Inputs and buttons without an accessible name
pub fn name_role_value(content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, input) in INPUT.find_iter(content).enumerate() {
        let tag = input.as_str();
        if !tag.contains("id=") && !tag.contains("aria-label=") && !tag.contains("title=") {
            findings.push(
                Finding::new(
                    "4.1.2",
                    Severity::Warning,
                    &format!("Input {} missing accessible name", idx + 1),
                )
                .with_element(tag)
                .with_recommendation("Add id, aria-label, or title attribute"),
            );
        }
    }

    for (idx, button) in BUTTON.find_iter(content).enumerate() {
        let markup = button.as_str();
        if strip_tags(markup).is_empty()
            && !markup.contains("aria-label=")
            && !markup.contains("title=")
        {
            findings.push(
                Finding::new(
                    "4.1.2",
                    Severity::Critical,
                    &format!("Button {} missing accessible name", idx + 1),
                )
                .with_element(markup)
                .with_recommendation("Add text content, aria-label, or title attribute"),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_controls() {
        let html = r#"<input type="text" id="q"><button>Search</button><button aria-label="Close"></button>"#;
        assert!(name_role_value(html).is_empty());
    }

    #[test]
    fn test_unnamed_input() {
        let findings = name_role_value(r#"<input type="text" name="q">"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].message, "Input 1 missing accessible name");
    }

    #[test]
    fn test_icon_button() {
        let findings = name_role_value(r#"<button class="x"><i class="icon-close"></i></button>"#);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].message, "Button 1 missing accessible name");
    }

    #[test]
    fn test_inputs_reported_before_buttons() {
        let html = r#"<button></button><input name="a">"#;
        let severities: Vec<_> = name_role_value(html).into_iter().map(|f| f.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Critical]);
    }
}
