// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML narrative report.
//!
//! Every interpolated value goes through [`escape`], including element
//! excerpts copied verbatim from audited documents.

use crate::config::ReportConfig;
use crate::criteria::Registry;
use crate::finding::{Finding, WcagLevel};
use crate::report::unique_files;
use crate::scanner::{AuditRun, FileOutcome};
use crate::summary::{format_percentage, LevelTally};
use crate::tools::{ToolFinding, ToolReport};
use chrono::SecondsFormat;

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; text-align: center; }
        .summary { background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 5px solid #28a745; }
        .compliance { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin: 20px 0; }
        .compliance-card { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); text-align: center; }
        .compliance-a { border-top: 4px solid #007bff; }
        .compliance-aa { border-top: 4px solid #28a745; }
        .file-section { margin: 25px 0; border: 1px solid #dee2e6; border-radius: 8px; overflow: hidden; }
        .file-header { background: #e9ecef; padding: 15px; border-bottom: 1px solid #dee2e6; }
        .file-header h3 { margin: 0; color: #495057; }
        .issue { margin: 15px; padding: 15px; border-left: 4px solid #dc3545; background: #f8d7da; border-radius: 4px; }
        .issue.warning { border-left-color: #ffc107; background: #fff3cd; }
        .issue.low { border-left-color: #17a2b8; background: #d1ecf1; }
        .criterion { font-weight: bold; color: #007bff; background: #e7f3ff; padding: 2px 6px; border-radius: 3px; }
        .timestamp { color: #6c757d; font-size: 0.9em; }
        .tool-badge { display: inline-block; background: #6f42c1; color: white; padding: 2px 8px; border-radius: 12px; font-size: 0.8em; margin-right: 8px; }
        .severity-badge { display: inline-block; padding: 2px 8px; border-radius: 12px; font-size: 0.8em; margin-left: 8px; }
        .severity-critical { background: #dc3545; color: white; }
        .severity-warning { background: #ffc107; color: #212529; }
        .severity-low { background: #17a2b8; color: white; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
        .stat-card { background: white; padding: 15px; border-radius: 6px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); text-align: center; }
        .stat-number { font-size: 2em; font-weight: bold; color: #007bff; }
        .stat-label { color: #6c757d; font-size: 0.9em; }
        .no-issues { padding: 20px; color: #28a745; font-weight: bold; }
        .criteria-entry { margin: 15px 0; padding: 15px; background: #f8f9fa; border-radius: 6px; }
"#;

/// Escape text for interpolation into HTML content or attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the full report document
pub fn render(run: &AuditRun, registry: &Registry, config: &ReportConfig) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("    <title>{}</title>\n", escape(&config.title)));
    html.push_str(&format!("    <style>{}    </style>\n", STYLE));
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, run, config);
    render_summary(&mut html, run);
    render_compliance(&mut html, run);
    for outcome in unique_files(&run.files) {
        render_file(&mut html, outcome, registry);
    }
    render_criteria(&mut html, registry);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, run: &AuditRun, config: &ReportConfig) {
    html.push_str("    <div class=\"header\">\n");
    html.push_str(&format!("        <h1>{}</h1>\n", escape(&config.title)));
    if let Some(ref project) = config.project {
        html.push_str(&format!("        <h2>{}</h2>\n", escape(project)));
    }
    html.push_str(&format!(
        "        <p class=\"timestamp\">Generated: {}</p>\n",
        run.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    html.push_str(&format!(
        "        <p><strong>Testing Tools:</strong> {}</p>\n",
        escape(&run.tools.join(", "))
    ));
    html.push_str("    </div>\n");
}

fn stat_card(html: &mut String, value: usize, label: &str) {
    html.push_str(&format!(
        "            <div class=\"stat-card\"><div class=\"stat-number\">{}</div><div class=\"stat-label\">{}</div></div>\n",
        value, label
    ));
}

fn render_summary(html: &mut String, run: &AuditRun) {
    let summary = &run.summary;
    html.push_str("    <div class=\"summary\">\n        <h3>Executive Summary</h3>\n        <div class=\"stats\">\n");
    stat_card(html, summary.total_issues, "Total Issues");
    stat_card(html, summary.critical_issues, "Critical Issues");
    stat_card(html, summary.warnings, "Warnings");
    stat_card(html, summary.passed_tests, "Files Tested");
    html.push_str("        </div>\n    </div>\n");
}

fn level_card(html: &mut String, level: WcagLevel, tally: &LevelTally) {
    let class = match level {
        WcagLevel::A => "compliance-a",
        WcagLevel::AA => "compliance-aa",
    };
    html.push_str(&format!(
        "        <div class=\"compliance-card {}\">\n            <h3>WCAG 2.1 Level {}</h3>\n            <div class=\"stat-number\">{}</div>\n            <p>{}/{} criteria passed</p>\n        </div>\n",
        class,
        level,
        format_percentage(tally.percentage()),
        tally.passed,
        tally.total
    ));
}

fn render_compliance(html: &mut String, run: &AuditRun) {
    html.push_str("    <div class=\"compliance\">\n");
    for level in WcagLevel::ALL {
        level_card(html, level, run.summary.wcag_compliance.level(level));
    }
    html.push_str("    </div>\n");
}

fn render_file(html: &mut String, outcome: &FileOutcome, registry: &Registry) {
    html.push_str("    <div class=\"file-section\">\n        <div class=\"file-header\">\n");
    html.push_str(&format!("            <h3>{}</h3>\n", escape(&outcome.path)));
    html.push_str(&format!(
        "            <p><strong>Total Issues:</strong> {}</p>\n        </div>\n",
        outcome.total_issues()
    ));

    let mut any = false;
    for (_, report) in &outcome.tool_reports {
        any |= render_tool_report(html, report);
    }
    if !outcome.audit.findings.is_empty() {
        any = true;
        html.push_str("        <h4>WCAG Compliance Issues</h4>\n");
        for finding in &outcome.audit.findings {
            render_finding(html, finding, registry);
        }
    }
    if !any {
        html.push_str("        <p class=\"no-issues\">No accessibility issues found</p>\n");
    }

    html.push_str("    </div>\n");
}

/// Returns whether anything was rendered
fn render_tool_report(html: &mut String, report: &ToolReport) -> bool {
    let Some(first) = report.issues.first() else {
        return false;
    };
    html.push_str(&format!("        <h4>{} Issues</h4>\n", escape(&first.tool)));
    for issue in &report.issues {
        render_tool_finding(html, issue);
    }
    true
}

fn detail(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!("            <br><strong>{}:</strong> {}\n", label, escape(value)));
}

fn render_tool_finding(html: &mut String, issue: &ToolFinding) {
    let class = issue.severity.css_class();
    html.push_str(&format!("        <div class=\"issue {}\">\n", class));
    html.push_str(&format!(
        "            <span class=\"tool-badge\">{}</span>\n            <strong>{}</strong>\n",
        escape(&issue.tool),
        escape(&issue.message)
    ));
    html.push_str(&format!(
        "            <span class=\"severity-badge severity-{}\">{}</span>\n",
        class, issue.severity
    ));
    if let Some(ref help) = issue.help {
        detail(html, "Help", help);
    }
    if !issue.tags.is_empty() {
        detail(html, "Tags", &issue.tags.join(", "));
    }
    if let Some(nodes) = issue.nodes {
        detail(html, "Affected Elements", &nodes.to_string());
    }
    if let Some(ref code) = issue.code {
        detail(html, "Code", code);
    }
    if let Some(ref selector) = issue.selector {
        detail(html, "Selector", selector);
    }
    if let Some(ref context) = issue.context {
        detail(html, "Context", context);
    }
    html.push_str("        </div>\n");
}

fn render_finding(html: &mut String, finding: &Finding, registry: &Registry) {
    let class = finding.severity.css_class();
    let name = registry.get(&finding.criterion).map(|c| c.name).unwrap_or("Unknown criterion");

    html.push_str(&format!("        <div class=\"issue {}\">\n", class));
    html.push_str(&format!(
        "            <span class=\"tool-badge\">WCAG</span>\n            <strong>{}:</strong> {}\n",
        escape(&finding.criterion),
        escape(&finding.message)
    ));
    html.push_str(&format!(
        "            <span class=\"severity-badge severity-{}\">{}</span>\n",
        class, finding.severity
    ));
    html.push_str(&format!(
        "            <br><span class=\"criterion\">{} - {}</span>\n",
        escape(&finding.criterion),
        escape(name)
    ));
    if let Some(ref recommendation) = finding.recommendation {
        detail(html, "Recommendation", recommendation);
    }
    if let Some(ref element) = finding.element {
        html.push_str(&format!(
            "            <br><strong>Element:</strong> <code>{}</code>\n",
            escape(element)
        ));
    }
    html.push_str("        </div>\n");
}

fn render_criteria(html: &mut String, registry: &Registry) {
    html.push_str("    <div class=\"file-section\">\n        <div class=\"file-header\"><h3>WCAG 2.1 AA Criteria Details</h3></div>\n");
    html.push_str("        <div style=\"padding: 20px;\">\n");
    for criterion in registry.all() {
        html.push_str(&format!(
            "            <div class=\"criteria-entry\">\n                <h4><span class=\"criterion\">{}</span> {} (Level {})</h4>\n                <p><strong>Description:</strong> {}</p>\n            </div>\n",
            escape(criterion.id),
            escape(criterion.name),
            criterion.level,
            escape(criterion.description)
        ));
    }
    html.push_str("        </div>\n    </div>\n");
}
