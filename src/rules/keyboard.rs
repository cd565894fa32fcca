// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard access - WCAG 2.1.1 Keyboard (Level A), 2.4.3 Focus Order (Level A),
//! 2.4.7 Focus Visible (Level AA)

use crate::finding::{Finding, Severity};

/// Click-only handlers and untyped inputs
pub fn keyboard(content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    if content.contains("onclick=")
        && !content.contains("onkeydown=")
        && !content.contains("onkeyup=")
    {
        findings.push(
            Finding::new(
                "2.1.1",
                Severity::Critical,
                "Elements with onclick but no keyboard event handlers",
            )
            .with_recommendation(
                "Add keyboard event handlers or use addEventListener for accessibility",
            ),
        );
    }

    if content.contains("<input") && !content.contains("type=") {
        findings.push(
            Finding::new("2.1.1", Severity::Warning, "Input elements without type attribute")
                .with_recommendation("Specify input type for proper keyboard behavior"),
        );
    }

    findings
}

/// Explicit tab order overrides. The values themselves are not validated.
pub fn focus_order(content: &str) -> Vec<Finding> {
    if !content.contains("tabindex=") {
        return Vec::new();
    }
    vec![Finding::new(
        "2.4.3",
        Severity::Warning,
        "tabindex attributes detected - verify logical focus order",
    )
    .with_recommendation("Ensure tabindex values maintain logical navigation flow")]
}

/// Focus outline suppressed in a `:focus` style
pub fn focus_visible(content: &str) -> Vec<Finding> {
    if !(content.contains(":focus") && content.contains("outline: none")) {
        return Vec::new();
    }
    vec![Finding::new(
        "2.4.7",
        Severity::Critical,
        "Focus outline removed without alternative indicator",
    )
    .with_recommendation("Provide visible focus indicators for all interactive elements")]
}
