// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document auditor.
//!
//! Runs every registered criterion against one document, in registry order,
//! and classifies each criterion as passed (no findings) or failed (one or
//! more findings) for its conformance level.

use crate::criteria::Registry;
use crate::error::Result;
use crate::finding::{count_by_severity, Finding, WcagLevel};
use crate::summary::LevelTally;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named, read-only text payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Path as displayed in reports
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Outcome of evaluating every criterion against one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Findings in criterion evaluation order
    pub findings: Vec<Finding>,
    pub level_a: LevelTally,
    pub level_aa: LevelTally,
    /// Identifiers of criteria that raised at least one finding
    pub failed_criteria: Vec<String>,
}

impl AuditResult {
    /// Tally for one conformance level
    pub fn tally(&self, level: WcagLevel) -> &LevelTally {
        match level {
            WcagLevel::A => &self.level_a,
            WcagLevel::AA => &self.level_aa,
        }
    }

    fn tally_mut(&mut self, level: WcagLevel) -> &mut LevelTally {
        match level {
            WcagLevel::A => &mut self.level_a,
            WcagLevel::AA => &mut self.level_aa,
        }
    }

    /// No criterion failed
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings raised by one criterion
    pub fn for_criterion<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.criterion == id)
    }

    /// `(critical, warning, low)` finding counts
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        count_by_severity(self.findings.iter().map(|f| &f.severity))
    }
}

/// Evaluates documents against a registry
#[derive(Debug, Clone, Copy)]
pub struct Auditor<'r> {
    registry: &'r Registry,
}

impl<'r> Auditor<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Audit one document
    pub fn audit(&self, document: &Document) -> AuditResult {
        let mut result = AuditResult::default();

        for criterion in self.registry.all() {
            let findings = criterion.evaluate(&document.content);
            let passed = findings.is_empty();
            result.tally_mut(criterion.level).record(passed);

            if !passed {
                debug!(
                    criterion = criterion.id,
                    findings = findings.len(),
                    "{} failed {}",
                    document.path.display(),
                    criterion.name
                );
                result.failed_criteria.push(criterion.id.to_string());
                result.findings.extend(findings);
            }
        }

        result
    }
}
