// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for audit runs.
//!
//! Supports multiple output formats:
//! - Text: console summary with per-level compliance
//! - JSON: machine-readable snapshot of the whole run
//! - HTML: narrative report with per-file issues and a criteria appendix

pub mod html;

use crate::auditor::AuditResult;
use crate::config::Config;
use crate::criteria::Registry;
use crate::error::Result;
use crate::finding::{Finding, WcagLevel};
use crate::scanner::{AuditRun, FileOutcome, INTERNAL_REPORT_KEY};
use crate::summary::{format_percentage, LevelTally, RunSummary};
use chrono::SecondsFormat;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Console summary
    Text,
    /// JSON snapshot
    Json,
    /// HTML narrative
    Html,
}

/// Paths of the artifacts written for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Generate a report for a run
pub fn generate_report(
    run: &AuditRun,
    registry: &Registry,
    config: &Config,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(console_summary(run)),
        OutputFormat::Json => json_snapshot(run),
        OutputFormat::Html => Ok(html::render(run, registry, &config.report)),
    }
}

/// Write the JSON snapshot and HTML report into the configured output
/// directory, creating it if needed
pub fn write_reports(run: &AuditRun, registry: &Registry, config: &Config) -> Result<ReportPaths> {
    std::fs::create_dir_all(&config.output.dir)?;

    let paths = ReportPaths {
        json: config.output.json_path(),
        html: config.output.html_path(),
    };

    std::fs::write(&paths.json, generate_report(run, registry, config, OutputFormat::Json)?)?;
    info!("Results saved to {}", paths.json.display());

    std::fs::write(&paths.html, generate_report(run, registry, config, OutputFormat::Html)?)?;
    info!("HTML report written to {}", paths.html.display());

    Ok(paths)
}

/// Console summary: issue counts plus one line per conformance level
pub fn console_summary(run: &AuditRun) -> String {
    let summary = &run.summary;
    let mut output = String::new();

    output.push_str("=== WCAG Compliance Summary ===\n\n");
    output.push_str(&format!(
        "Files tested: {}\nTotal issues: {} ({} critical, {} warning(s), {} low)\n\n",
        summary.passed_tests,
        summary.total_issues,
        summary.critical_issues,
        summary.warnings,
        summary.low_issues()
    ));

    for level in WcagLevel::ALL {
        let tally = summary.wcag_compliance.level(level);
        output.push_str(&format!(
            "Level {}: {} ({}/{})\n",
            level,
            format_percentage(tally.percentage()),
            tally.passed,
            tally.total
        ));
    }

    output
}

/// Serialize the run as the JSON snapshot
pub fn json_snapshot(run: &AuditRun) -> Result<String> {
    let snapshot = Snapshot {
        timestamp: run.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        tools: &run.tools,
        files: FileMap(&run.files),
        summary: SummarySnapshot::from(&run.summary),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

#[derive(Serialize)]
struct Snapshot<'a> {
    timestamp: String,
    tools: &'a [String],
    files: FileMap<'a>,
    summary: SummarySnapshot,
}

/// One outcome per distinct path, in processing order. A path audited twice
/// keeps its first position and its latest outcome.
pub(crate) fn unique_files(files: &[FileOutcome]) -> Vec<&FileOutcome> {
    let mut entries: Vec<&FileOutcome> = Vec::with_capacity(files.len());
    for outcome in files {
        match entries.iter_mut().find(|e| e.path == outcome.path) {
            Some(slot) => *slot = outcome,
            None => entries.push(outcome),
        }
    }
    entries
}

/// Files keyed by path
struct FileMap<'a>(&'a [FileOutcome]);

impl Serialize for FileMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            unique_files(self.0)
                .into_iter()
                .map(|outcome| (outcome.path.as_str(), FileEntry(outcome))),
        )
    }
}

struct FileEntry<'a>(&'a FileOutcome);

impl Serialize for FileEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let outcome = self.0;
        let mut map = serializer.serialize_map(Some(outcome.tool_reports.len() + 2))?;
        for (key, report) in &outcome.tool_reports {
            map.serialize_entry(key, report)?;
        }
        map.serialize_entry(INTERNAL_REPORT_KEY, &WcagCheck::from(&outcome.audit))?;
        map.serialize_entry("totalIssues", &outcome.total_issues())?;
        map.end()
    }
}

#[derive(Serialize)]
struct WcagCheck<'a> {
    valid: bool,
    issues: &'a [Finding],
}

impl<'a> From<&'a AuditResult> for WcagCheck<'a> {
    fn from(audit: &'a AuditResult) -> Self {
        Self {
            valid: audit.is_valid(),
            issues: &audit.findings,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarySnapshot {
    total_issues: usize,
    critical_issues: usize,
    warnings: usize,
    passed_tests: usize,
    wcag_compliance: ComplianceSnapshot,
}

#[derive(Serialize)]
struct ComplianceSnapshot {
    #[serde(rename = "levelA")]
    level_a: LevelSnapshot,
    #[serde(rename = "levelAA")]
    level_aa: LevelSnapshot,
}

#[derive(Serialize)]
struct LevelSnapshot {
    total: usize,
    passed: usize,
    failed: usize,
    percentage: Option<f64>,
}

impl From<&LevelTally> for LevelSnapshot {
    fn from(tally: &LevelTally) -> Self {
        Self {
            total: tally.total,
            passed: tally.passed,
            failed: tally.failed,
            percentage: tally.percentage(),
        }
    }
}

impl From<&RunSummary> for SummarySnapshot {
    fn from(summary: &RunSummary) -> Self {
        Self {
            total_issues: summary.total_issues,
            critical_issues: summary.critical_issues,
            warnings: summary.warnings,
            passed_tests: summary.passed_tests,
            wcag_compliance: ComplianceSnapshot {
                level_a: LevelSnapshot::from(&summary.wcag_compliance.level_a),
                level_aa: LevelSnapshot::from(&summary.wcag_compliance.level_aa),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auditor::Document;
    use crate::finding::Severity;
    use crate::scanner::audit_documents;
    use crate::tools::{ExternalScanner, ToolFinding};
    use std::path::Path;
    use tempfile::TempDir;

    struct Pa11yStub;

    impl ExternalScanner for Pa11yStub {
        fn name(&self) -> &str {
            "pa11y"
        }
        fn report_key(&self) -> &str {
            "pa11yTest"
        }
        fn scan(&self, _path: &Path) -> Result<Vec<ToolFinding>> {
            Ok(vec![ToolFinding::new("pa11y", Severity::Warning, "Check contrast.")])
        }
    }

    fn sample_run() -> (AuditRun, Registry) {
        let registry = Registry::wcag21().unwrap();
        let scanners: Vec<Box<dyn ExternalScanner>> = vec![Box::new(Pa11yStub)];
        let run = audit_documents(
            &[
                Document::new("templates/z.html", r#"<title>Z</title> skip <img src="x.png">"#),
                Document::new("templates/a.html", ""),
            ],
            &registry,
            &scanners,
        );
        (run, registry)
    }

    #[test]
    fn test_json_snapshot_shape() {
        let (run, _) = sample_run();
        let raw = json_snapshot(&run).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");

        assert_eq!(parsed["tools"], serde_json::json!(["pa11y", "WCAG 2.1 AA Analysis"]));
        let file = &parsed["files"]["templates/z.html"];
        assert_eq!(file["pa11yTest"]["issues"][0]["type"], "pa11y");
        assert_eq!(file["wcagCheck"]["valid"], false);
        assert_eq!(file["wcagCheck"]["issues"][0]["criterion"], "1.1.1");
        assert_eq!(file["wcagCheck"]["issues"][1]["criterion"], "4.1.1");
        assert_eq!(file["totalIssues"], 3);
        assert_eq!(parsed["files"]["templates/a.html"]["wcagCheck"]["valid"], true);

        let summary = &parsed["summary"];
        assert_eq!(summary["passedTests"], 2);
        assert_eq!(summary["totalIssues"], 4);
        assert_eq!(summary["criticalIssues"], 2);
        assert_eq!(summary["warnings"], 2);
        assert_eq!(summary["wcagCompliance"]["levelA"]["total"], 24);
        assert_eq!(summary["wcagCompliance"]["levelA"]["failed"], 2);
        assert_eq!(summary["wcagCompliance"]["levelAA"]["percentage"], 100.0);
    }

    #[test]
    fn test_json_files_keep_processing_order() {
        let (run, _) = sample_run();
        let raw = json_snapshot(&run).unwrap();
        let z = raw.find("\"templates/z.html\"").unwrap();
        let a = raw.find("\"templates/a.html\"").unwrap();
        assert!(z < a);
    }

    #[test]
    fn test_json_percentage_null_without_criteria() {
        let run = audit_documents(&[], &Registry::new(), &[]);
        let parsed: serde_json::Value = serde_json::from_str(&json_snapshot(&run).unwrap()).unwrap();
        assert!(parsed["summary"]["wcagCompliance"]["levelA"]["percentage"].is_null());
        assert_eq!(parsed["files"], serde_json::json!({}));
    }

    #[test]
    fn test_repeated_path_emitted_once() {
        let registry = Registry::wcag21().unwrap();
        let doc = Document::new("t.html", "");
        let run = audit_documents(&[doc.clone(), doc], &registry, &[]);
        let raw = json_snapshot(&run).unwrap();
        assert_eq!(raw.matches("\"t.html\"").count(), 1);
        assert_eq!(run.summary.passed_tests, 2);
    }

    #[test]
    fn test_console_summary() {
        let (run, _) = sample_run();
        let text = console_summary(&run);
        assert!(text.contains("Level A: 91.7% (22/24)"));
        assert!(text.contains("Level AA: 100.0% (6/6)"));
    }

    #[test]
    fn test_console_summary_without_criteria() {
        let run = audit_documents(&[], &Registry::new(), &[]);
        assert!(console_summary(&run).contains("Level A: N/A (0/0)"));
    }

    #[test]
    fn test_write_reports() {
        let (run, registry) = sample_run();
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.output.dir = temp.path().join("nested/results");

        let paths = write_reports(&run, &registry, &config).unwrap();
        assert!(paths.json.ends_with("comprehensive_accessibility_results.json"));
        assert!(std::fs::read_to_string(&paths.html).unwrap().contains("<!DOCTYPE html>"));
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert!(parsed["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_text_format_is_console_summary() {
        let (run, registry) = sample_run();
        let text = generate_report(&run, &registry, &Config::default(), OutputFormat::Text).unwrap();
        assert_eq!(text, console_summary(&run));
    }

    #[test]
    fn test_unique_files_keeps_latest_outcome() {
        let registry = Registry::wcag21().unwrap();
        let run = audit_documents(
            &[
                Document::new("t.html", ""),
                Document::new("u.html", ""),
                Document::new("t.html", "<img src=\"x.png\">"),
            ],
            &registry,
            &[],
        );
        let files = unique_files(&run.files);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "t.html");
        assert!(!files[0].audit.is_valid());
        assert_eq!(files[1].path, "u.html");
    }
}
