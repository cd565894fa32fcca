// SPDX-License-Identifier: PMPL-1.0-or-later
//! Predictable behavior - WCAG 3.2.1 On Focus, 3.2.2 On Input (Level A)

use crate::finding::{Finding, Severity};

/// Focus handlers that look like they submit or navigate
pub fn on_focus(content: &str) -> Vec<Finding> {
    if content.contains("onfocus=") && (content.contains("submit") || content.contains("location")) {
        return vec![Finding::new(
            "3.2.1",
            Severity::Warning,
            "Focus-triggered context changes detected",
        )
        .with_recommendation("Avoid automatic form submission or navigation on focus")];
    }
    Vec::new()
}

/// Change handlers that look like they submit
pub fn on_input(content: &str) -> Vec<Finding> {
    if content.contains("onchange=") && content.contains("submit") {
        return vec![Finding::new(
            "3.2.2",
            Severity::Warning,
            "Auto-submit on input change detected",
        )
        .with_recommendation("Provide user control over form submission")];
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_navigation() {
        let html = r#"<input type="text" onfocus="window.location='/next'">"#;
        assert_eq!(on_focus(html).len(), 1);
    }

    #[test]
    fn test_focus_without_context_change() {
        assert!(on_focus(r#"<input type="text" onfocus="highlight(this)">"#).is_empty());
    }

    #[test]
    fn test_change_submits() {
        let html = r#"<select onchange="this.form.submit()"><option>1</option></select>"#;
        let findings = on_input(html);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].criterion, "3.2.2");
    }

    #[test]
    fn test_submit_without_change_handler() {
        assert!(on_input(r#"<button type="submit">Send</button>"#).is_empty());
    }
}
