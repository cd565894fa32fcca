// SPDX-License-Identifier: PMPL-1.0-or-later
//! External accessibility scanners (axe-core, pa11y).
//!
//! Scanners run out of process, once per document. Their output is kept as
//! opaque findings tagged with the tool name. A scanner that cannot be
//! started or whose output cannot be parsed contributes nothing for that
//! document; the run carries on.

use crate::config::{ToolConfig, ToolsConfig};
use crate::error::{Result, WcagError};
use crate::finding::Severity;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Placeholder replaced by the document path in scanner arguments
pub const FILE_PLACEHOLDER: &str = "{file}";

/// One issue reported by an external scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolFinding {
    /// Tool that reported the issue
    #[serde(rename = "type")]
    pub tool: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Number of affected elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ToolFinding {
    pub fn new(tool: &str, severity: Severity, message: &str) -> Self {
        Self {
            tool: tool.to_string(),
            severity,
            message: message.to_string(),
            help: None,
            help_url: None,
            tags: Vec::new(),
            nodes: None,
            code: None,
            selector: None,
            context: None,
        }
    }
}

/// A scanner's contribution for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReport {
    pub valid: bool,
    pub issues: Vec<ToolFinding>,
}

impl ToolReport {
    pub fn empty() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    pub fn from_issues(issues: Vec<ToolFinding>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

impl Default for ToolReport {
    fn default() -> Self {
        Self::empty()
    }
}

/// An out-of-process accessibility scanner
pub trait ExternalScanner {
    /// Tool name listed in reports (e.g., "axe-core")
    fn name(&self) -> &str;

    /// Key under which this tool's results appear per file
    fn report_key(&self) -> &str;

    /// Scan one document
    fn scan(&self, path: &Path) -> Result<Vec<ToolFinding>>;
}

/// Run a scanner, turning any failure into an empty report
pub fn run_scanner(scanner: &dyn ExternalScanner, path: &Path) -> ToolReport {
    match scanner.scan(path) {
        Ok(issues) => {
            debug!("{} reported {} issue(s) for {}", scanner.name(), issues.len(), path.display());
            ToolReport::from_issues(issues)
        }
        Err(e) => {
            warn!("{} unavailable for {}: {}", scanner.name(), path.display(), e);
            ToolReport::empty()
        }
    }
}

/// Build the enabled scanners, axe-core first
pub fn configured_scanners(config: &ToolsConfig) -> Vec<Box<dyn ExternalScanner>> {
    let mut scanners: Vec<Box<dyn ExternalScanner>> = Vec::new();
    if config.axe.enabled {
        scanners.push(Box::new(CommandScanner::axe(&config.axe)));
    }
    if config.pa11y.enabled {
        scanners.push(Box::new(CommandScanner::pa11y(&config.pa11y)));
    }
    scanners
}

type OutputParser = fn(&str) -> Result<Vec<ToolFinding>>;

/// Scanner backed by a command line tool that prints JSON on stdout
pub struct CommandScanner {
    name: &'static str,
    report_key: &'static str,
    program: String,
    args: Vec<String>,
    parse: OutputParser,
}

impl CommandScanner {
    /// axe-core CLI
    pub fn axe(config: &ToolConfig) -> Self {
        Self {
            name: "axe-core",
            report_key: "accessibilityTest",
            program: config.program.clone(),
            args: config.args.clone(),
            parse: parse_axe_output,
        }
    }

    /// pa11y CLI
    pub fn pa11y(config: &ToolConfig) -> Self {
        Self {
            name: "pa11y",
            report_key: "pa11yTest",
            program: config.program.clone(),
            args: config.args.clone(),
            parse: parse_pa11y_output,
        }
    }

    fn command_args(&self, path: &Path) -> Vec<String> {
        let file = path.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect()
    }
}

impl ExternalScanner for CommandScanner {
    fn name(&self) -> &str {
        self.name
    }

    fn report_key(&self) -> &str {
        self.report_key
    }

    fn scan(&self, path: &Path) -> Result<Vec<ToolFinding>> {
        // Both tools exit non-zero when they find issues, so the status
        // alone is not a failure. Unparsable output is.
        let output = Command::new(&self.program)
            .args(self.command_args(path))
            .output()
            .map_err(|e| WcagError::Tool {
                tool: self.name.to_string(),
                reason: format!("could not run {}: {}", self.program, e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        (self.parse)(&stdout).map_err(|e| WcagError::Tool {
            tool: self.name.to_string(),
            reason: format!("unparsable output (exit status {}): {}", output.status, e),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AxeOutput {
    Single(AxeResults),
    Many(Vec<AxeResults>),
}

#[derive(Deserialize)]
struct AxeResults {
    violations: Vec<AxeViolation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AxeViolation {
    description: String,
    impact: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    help_url: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    nodes: Vec<serde_json::Value>,
}

/// Parse axe-core JSON: a results object or an array of them.
/// Every violation is reported as CRITICAL.
pub fn parse_axe_output(raw: &str) -> Result<Vec<ToolFinding>> {
    let results = match serde_json::from_str::<AxeOutput>(raw.trim())? {
        AxeOutput::Single(r) => vec![r],
        AxeOutput::Many(rs) => rs,
    };

    Ok(results
        .into_iter()
        .flat_map(|r| r.violations)
        .map(|v| {
            let impact = v.impact.as_deref().unwrap_or("unknown");
            let mut finding = ToolFinding::new(
                "axe-core",
                Severity::Critical,
                &format!("{} ({})", v.description, impact),
            );
            finding.help = v.help;
            finding.help_url = v.help_url;
            finding.tags = v.tags;
            finding.nodes = Some(v.nodes.len());
            finding
        })
        .collect())
}

#[derive(Deserialize)]
struct Pa11yIssue {
    #[serde(rename = "type", default)]
    kind: String,
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    selector: Option<String>,
    #[serde(default)]
    context: Option<String>,
}

/// Parse pa11y JSON: an array of issues. `error` issues are CRITICAL,
/// everything else is a WARNING.
pub fn parse_pa11y_output(raw: &str) -> Result<Vec<ToolFinding>> {
    let issues: Vec<Pa11yIssue> = serde_json::from_str(raw.trim())?;

    Ok(issues
        .into_iter()
        .map(|issue| {
            let severity = if issue.kind == "error" {
                Severity::Critical
            } else {
                Severity::Warning
            };
            let mut finding = ToolFinding::new("pa11y", severity, &issue.message);
            finding.code = issue.code;
            finding.selector = issue.selector;
            finding.context = issue.context;
            finding
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXE_JSON: &str = r#"{
        "violations": [
            {
                "id": "image-alt",
                "impact": "critical",
                "description": "Ensures <img> elements have alternate text",
                "help": "Images must have alternate text",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/image-alt",
                "tags": ["wcag2a", "wcag111"],
                "nodes": [{}, {}]
            }
        ]
    }"#;

    const PA11Y_JSON: &str = r#"[
        {"code": "WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "type": "error", "typeCode": 1,
         "message": "Img element missing an alt attribute.", "context": "<img src=\"x.png\">", "selector": "html > body > img"},
        {"code": "WCAG2AA.Principle1.Guideline1_4.1_4_3.G18", "type": "notice", "typeCode": 3,
         "message": "Check contrast.", "context": "<p>x</p>", "selector": "p"}
    ]"#;

    struct FailingScanner;

    impl ExternalScanner for FailingScanner {
        fn name(&self) -> &str {
            "broken"
        }
        fn report_key(&self) -> &str {
            "brokenTest"
        }
        fn scan(&self, _path: &Path) -> Result<Vec<ToolFinding>> {
            Err(WcagError::Tool {
                tool: "broken".to_string(),
                reason: "not installed".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_axe() {
        let findings = parse_axe_output(AXE_JSON).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].message, "Ensures <img> elements have alternate text (critical)");
        assert_eq!(findings[0].nodes, Some(2));
        assert_eq!(findings[0].tags, vec!["wcag2a", "wcag111"]);
    }

    #[test]
    fn test_parse_axe_array() {
        let raw = format!("[{}, {}]", AXE_JSON, r#"{"violations": []}"#);
        assert_eq!(parse_axe_output(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_pa11y() {
        let findings = parse_pa11y_output(PA11Y_JSON).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[1].severity, Severity::Warning);
        assert_eq!(findings[0].selector.as_deref(), Some("html > body > img"));
    }

    #[test]
    fn test_unparsable_output() {
        assert!(parse_axe_output("axe: command not found").is_err());
        assert!(parse_pa11y_output("").is_err());
    }

    #[test]
    fn test_failure_becomes_empty_report() {
        let report = run_scanner(&FailingScanner, Path::new("index.html"));
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_missing_program_is_recovered() {
        let config = ToolConfig {
            enabled: true,
            program: "wcagbot-test-no-such-program".to_string(),
            args: vec![FILE_PLACEHOLDER.to_string()],
        };
        let report = run_scanner(&CommandScanner::axe(&config), Path::new("index.html"));
        assert_eq!(report, ToolReport::empty());
    }

    #[test]
    fn test_placeholder_substitution() {
        let config = ToolConfig {
            enabled: true,
            program: "pa11y".to_string(),
            args: vec![FILE_PLACEHOLDER.to_string(), "--json".to_string()],
        };
        let scanner = CommandScanner::pa11y(&config);
        assert_eq!(
            scanner.command_args(Path::new("templates/base.html")),
            vec!["templates/base.html", "--json"]
        );
    }

    #[test]
    fn test_configured_scanners_respect_enabled() {
        let mut config = ToolsConfig::default();
        let names: Vec<_> = configured_scanners(&config).iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["axe-core", "pa11y"]);

        config.axe.enabled = false;
        let scanners = configured_scanners(&config);
        assert_eq!(scanners.len(), 1);
        assert_eq!(scanners[0].report_key(), "pa11yTest");
    }

    #[test]
    fn test_tool_finding_serializes_type_key() {
        let value = serde_json::to_value(ToolFinding::new("pa11y", Severity::Warning, "m")).unwrap();
        assert_eq!(value["type"], "pa11y");
        assert_eq!(value["severity"], "WARNING");
        assert!(value.get("helpUrl").is_none());
    }
}
