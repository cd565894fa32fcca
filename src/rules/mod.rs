// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule evaluators for the WCAG 2.1 A/AA criteria.
//!
//! Each rule is a pure function from raw document text to findings. Rules
//! inspect the content with substring and regex matching only; there is no
//! DOM, so markup is treated as an opaque character sequence. Matching is
//! case-sensitive and `.` never crosses a line break.
//!
//! Rules never fail. Missing structure (no images, no headings, no links)
//! yields no findings.

pub mod alt_text;
pub mod aria;
pub mod context_change;
pub mod contrast;
pub mod keyboard;
pub mod navigation;
pub mod parsing;
pub mod semantic;

use crate::finding::Finding;
use regex::Regex;
use std::sync::LazyLock;

/// Evaluation capability attached to a criterion
pub trait Rule: Send + Sync {
    /// Evaluate the rule against a document's content
    fn evaluate(&self, content: &str) -> Vec<Finding>;
}

impl<F> Rule for F
where
    F: Fn(&str) -> Vec<Finding> + Send + Sync,
{
    fn evaluate(&self, content: &str) -> Vec<Finding> {
        self(content)
    }
}

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Remove every tag from a markup fragment and trim the remaining text
pub(crate) fn strip_tags(fragment: &str) -> String {
    TAG.replace_all(fragment, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Severity;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<a href=\"/x\"> <span>Docs</span> </a>"), "Docs");
        assert_eq!(strip_tags("<button><i class=\"icon\"></i></button>"), "");
    }

    #[test]
    fn test_closure_is_a_rule() {
        let rule = |content: &str| {
            if content.contains("marquee") {
                vec![Finding::new("x", Severity::Low, "marquee")]
            } else {
                Vec::new()
            }
        };
        assert_eq!(rule.evaluate("<marquee>hi</marquee>").len(), 1);
        assert!(rule.evaluate("<p>hi</p>").is_empty());
    }
}
