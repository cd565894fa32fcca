// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color usage - WCAG 1.4.1 Use of Color (Level A), 1.4.3 Contrast (Minimum) (Level AA)
//!
//! No contrast ratio is computed. Both rules only flag documents that declare
//! colors so the pairs get verified by hand.

use crate::finding::{Finding, Severity};

/// Text and background colors declared in the same document
pub fn use_of_color(content: &str) -> Vec<Finding> {
    if content.contains("color:") && content.contains("background-color:") {
        vec![Finding::new(
            "1.4.1",
            Severity::Warning,
            "Color combinations detected - ensure sufficient contrast",
        )
        .with_recommendation("Verify color contrast ratios meet WCAG requirements")]
    } else {
        Vec::new()
    }
}

/// Hex or rgb color definitions present
pub fn contrast_minimum(content: &str) -> Vec<Finding> {
    if content.contains("color: #") || content.contains("color: rgb") {
        vec![Finding::new(
            "1.4.3",
            Severity::Warning,
            "Color definitions detected - verify contrast ratios",
        )
        .with_recommendation(
            "Ensure text contrast meets 4.5:1 ratio for normal text, 3:1 for large text",
        )]
    } else {
        Vec::new()
    }
}
