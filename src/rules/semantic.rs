// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic structure - WCAG 1.3.1 Info and Relationships (Level A),
//! 2.4.6 Headings and Labels (Level AA)
//!
//! Headings are matched as `<hN ...>text</hM>` on a single line. Only forward
//! skips in the hierarchy are reported; going back up (h3 to h1) is fine.

use crate::finding::{Finding, Severity};
use crate::rules::strip_tags;
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h([1-6])[^>]*>.*?</h[1-6]>").expect("valid regex"));

/// Minimum number of characters a heading needs to describe its section
const MIN_HEADING_CHARS: usize = 3;

/// Heading hierarchy skips and generic containers
pub fn info_and_relationships(content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut current_level = 0u32;

    for caps in HEADING.captures_iter(content) {
        let level = caps[1].parse::<u32>().unwrap_or(current_level);
        if current_level != 0 && level > current_level + 1 {
            findings.push(
                Finding::new(
                    "1.3.1",
                    Severity::Warning,
                    &format!("Heading level skipped from h{} to h{}", current_level, level),
                )
                .with_element(&caps[0])
                .with_recommendation("Maintain proper heading hierarchy (h1 → h2 → h3)"),
            );
        }
        current_level = level;
    }

    // One finding per document, however many divs there are.
    if content.contains("<div") && !content.contains("role=") {
        findings.push(
            Finding::new("1.3.1", Severity::Low, "Generic divs without semantic roles")
                .with_recommendation("Use semantic HTML elements or add ARIA roles"),
        );
    }

    findings
}

/// Headings whose text is empty or too short to describe anything
pub fn headings_and_labels(content: &str) -> Vec<Finding> {
    HEADING
        .find_iter(content)
        .enumerate()
        .filter_map(|(idx, heading)| {
            let text = strip_tags(heading.as_str());
            if text.chars().count() >= MIN_HEADING_CHARS {
                return None;
            }
            Some(
                Finding::new(
                    "2.4.6",
                    Severity::Warning,
                    &format!("Heading {} has insufficient text: \"{}\"", idx + 1, text),
                )
                .with_element(heading.as_str())
                .with_recommendation("Provide descriptive heading text"),
            )
        })
        .collect()
}
