// SPDX-License-Identifier: PMPL-1.0-or-later
//! Run-wide aggregation of audit outcomes.
//!
//! A [`RunSummary`] is created at the start of a run and folded once per
//! processed document. Counters only ever grow, so a summary is valid and
//! reportable at any point of the run.

use crate::auditor::AuditResult;
use crate::finding::{count_by_severity, WcagLevel};
use crate::tools::ToolReport;
use serde::{Deserialize, Serialize};

/// Pass/fail tally for one conformance level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl LevelTally {
    /// Record one evaluated criterion
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Add another tally into this one
    pub fn absorb(&mut self, other: &LevelTally) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
    }

    /// `passed / total * 100` rounded to one decimal, `None` when nothing
    /// was evaluated at this level
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let raw = self.passed as f64 / self.total as f64 * 100.0;
        Some((raw * 10.0).round() / 10.0)
    }
}

/// Per-level tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcagCompliance {
    #[serde(rename = "levelA")]
    pub level_a: LevelTally,
    #[serde(rename = "levelAA")]
    pub level_aa: LevelTally,
}

impl WcagCompliance {
    pub fn level(&self, level: WcagLevel) -> &LevelTally {
        match level {
            WcagLevel::A => &self.level_a,
            WcagLevel::AA => &self.level_aa,
        }
    }

    pub fn level_mut(&mut self, level: WcagLevel) -> &mut LevelTally {
        match level {
            WcagLevel::A => &mut self.level_a,
            WcagLevel::AA => &mut self.level_aa,
        }
    }
}

/// Cumulative counters across every document of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warnings: usize,
    /// Documents processed
    pub passed_tests: usize,
    pub wcag_compliance: WcagCompliance,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's audit outcome into the totals
    pub fn fold(&mut self, audit: &AuditResult) {
        let (critical, warning, _) = count_by_severity(audit.findings.iter().map(|f| &f.severity));
        self.total_issues += audit.findings.len();
        self.critical_issues += critical;
        self.warnings += warning;
        self.passed_tests += 1;
        for level in WcagLevel::ALL {
            self.wcag_compliance.level_mut(level).absorb(audit.tally(level));
        }
    }

    /// Fold one external scanner's findings for a document into the issue
    /// counters. Scanner output never affects the criterion tallies.
    pub fn fold_tool(&mut self, report: &ToolReport) {
        let (critical, warning, _) = count_by_severity(report.issues.iter().map(|i| &i.severity));
        self.total_issues += report.issues.len();
        self.critical_issues += critical;
        self.warnings += warning;
    }

    /// Combine two partial summaries
    pub fn merge(&mut self, other: &RunSummary) {
        self.total_issues += other.total_issues;
        self.critical_issues += other.critical_issues;
        self.warnings += other.warnings;
        self.passed_tests += other.passed_tests;
        for level in WcagLevel::ALL {
            self.wcag_compliance
                .level_mut(level)
                .absorb(other.wcag_compliance.level(level));
        }
    }

    /// Compliance percentage for `level`, `None` when undefined
    pub fn compliance(&self, level: WcagLevel) -> Option<f64> {
        self.wcag_compliance.level(level).percentage()
    }

    /// Number of findings that are neither critical nor warnings
    pub fn low_issues(&self) -> usize {
        self.total_issues - self.critical_issues - self.warnings
    }
}

/// Format a compliance percentage for display
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "N/A".to_string(),
    }
}
