// SPDX-License-Identifier: PMPL-1.0-or-later
//! Run pipeline: resolves documents, runs the external scanners and the
//! auditor on each one in order, and folds everything into a run summary.
//!
//! Documents that are missing or cannot be read are skipped and leave no
//! trace in the summary. Content that is not valid UTF-8 is still audited.

use crate::auditor::{AuditResult, Auditor, Document};
use crate::criteria::Registry;
use crate::summary::RunSummary;
use crate::tools::{run_scanner, ExternalScanner, ToolReport};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Name under which the built-in criteria appear in the tool list
pub const INTERNAL_TOOL: &str = "WCAG 2.1 AA Analysis";

/// Key under which the built-in criteria's findings appear per file
pub const INTERNAL_REPORT_KEY: &str = "wcagCheck";

/// File extensions picked up by directory discovery
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip during discovery
const SKIP_DIRS: &[&str] = &["node_modules", ".git", "target", "dist", "build"];

/// Everything recorded for one audited document
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: String,
    /// External scanner reports keyed by report key, in scanner order
    pub tool_reports: Vec<(String, ToolReport)>,
    pub audit: AuditResult,
}

impl FileOutcome {
    /// Issues from every tool plus the built-in criteria
    pub fn total_issues(&self) -> usize {
        self.tool_reports
            .iter()
            .map(|(_, r)| r.issues.len())
            .sum::<usize>()
            + self.audit.findings.len()
    }
}

/// The complete result of one run, handed to the report assembler
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub timestamp: DateTime<Utc>,
    pub tools: Vec<String>,
    pub files: Vec<FileOutcome>,
    pub summary: RunSummary,
}

impl AuditRun {
    /// Start an empty run for the given scanners
    pub fn start(scanners: &[Box<dyn ExternalScanner>]) -> Self {
        let mut tools: Vec<String> = scanners.iter().map(|s| s.name().to_string()).collect();
        tools.push(INTERNAL_TOOL.to_string());
        Self {
            timestamp: Utc::now(),
            tools,
            files: Vec::new(),
            summary: RunSummary::new(),
        }
    }

    /// Add one document's outcome and fold it into the summary
    pub fn record(&mut self, outcome: FileOutcome) {
        for (_, report) in &outcome.tool_reports {
            self.summary.fold_tool(report);
        }
        self.summary.fold(&outcome.audit);
        self.files.push(outcome);
    }
}

/// Scan and audit a single in-memory document
pub fn process_document(
    document: &Document,
    auditor: &Auditor<'_>,
    scanners: &[Box<dyn ExternalScanner>],
) -> FileOutcome {
    let tool_reports = scanners
        .iter()
        .map(|s| (s.report_key().to_string(), run_scanner(s.as_ref(), &document.path)))
        .collect();
    let audit = auditor.audit(document);

    FileOutcome {
        path: document.display_path(),
        tool_reports,
        audit,
    }
}

/// Audit documents already held in memory
pub fn audit_documents(
    documents: &[Document],
    registry: &Registry,
    scanners: &[Box<dyn ExternalScanner>],
) -> AuditRun {
    let auditor = Auditor::new(registry);
    let mut run = AuditRun::start(scanners);
    for document in documents {
        run.record(process_document(document, &auditor, scanners));
    }
    run
}

/// Read and audit documents from disk in the given order
pub fn run_audit(
    paths: &[PathBuf],
    registry: &Registry,
    scanners: &[Box<dyn ExternalScanner>],
) -> AuditRun {
    let auditor = Auditor::new(registry);
    let mut run = AuditRun::start(scanners);

    for path in paths {
        if !path.exists() {
            info!("Skipping {}: not found", path.display());
            continue;
        }
        let document = match Document::load(path) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        info!("Testing {}", path.display());
        let outcome = process_document(&document, &auditor, scanners);
        info!(
            "{}: {} issue(s), {} criteria failed",
            outcome.path,
            outcome.total_issues(),
            outcome.audit.failed_criteria.len()
        );
        run.record(outcome);
    }

    info!(
        "Audited {} document(s), found {} issue(s)",
        run.summary.passed_tests, run.summary.total_issues
    );
    run
}

/// Find auditable documents under a directory, sorted by path
pub fn discover_documents(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|ext| SCANNABLE_EXTENSIONS.contains(&ext))
                .unwrap_or(false)
        })
        .collect();

    found.sort();
    info!("Discovered {} document(s) under {}", found.len(), dir.display());
    found
}
