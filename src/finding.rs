// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding types shared by the rule catalog, the external scanners and the
//! report assembler.

use serde::{Deserialize, Serialize};

/// Severity of a reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Blocks access for some users
    Critical,
    /// Likely barrier, needs review
    Warning,
    /// Minor or advisory
    Low,
}

impl Severity {
    /// Lowercase token used for CSS classes in the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
}

impl WcagLevel {
    /// Every level, in ascending strictness
    pub const ALL: [WcagLevel; 2] = [WcagLevel::A, WcagLevel::AA];
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
        }
    }
}

/// One issue raised by one criterion against one document.
///
/// Findings are plain values: a rule creates them, the owning
/// [`AuditResult`](crate::auditor::AuditResult) keeps them, nothing mutates
/// them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Criterion identifier (e.g., "1.1.1")
    pub criterion: String,
    /// Severity level
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Offending markup excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Suggested remediation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Finding {
    /// Create a new finding
    pub fn new(criterion: &str, severity: Severity, message: &str) -> Self {
        Self {
            criterion: criterion.to_string(),
            severity,
            message: message.to_string(),
            element: None,
            recommendation: None,
        }
    }

    /// Set the offending element
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    /// Set the recommendation
    pub fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendation = Some(recommendation.to_string());
        self
    }
}

/// Count findings per severity: `(critical, warning, low)`
pub fn count_by_severity<'a>(severities: impl IntoIterator<Item = &'a Severity>) -> (usize, usize, usize) {
    severities
        .into_iter()
        .fold((0, 0, 0), |(c, w, l), s| match s {
            Severity::Critical => (c + 1, w, l),
            Severity::Warning => (c, w + 1, l),
            Severity::Low => (c, w, l + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        let low: Severity = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(low, Severity::Low);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let finding = Finding::new("2.4.1", Severity::Warning, "No skip navigation mechanism detected");
        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["criterion"], "2.4.1");
        assert!(value.get("element").is_none());
        assert!(value.get("recommendation").is_none());
    }

    #[test]
    fn test_count_by_severity() {
        let severities = [Severity::Critical, Severity::Low, Severity::Critical, Severity::Warning];
        assert_eq!(count_by_severity(&severities), (2, 1, 1));
    }
}
