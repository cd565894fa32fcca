// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for wcagbot

use crate::error::{Result, WcagError};
use crate::tools::FILE_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Documents to audit, in processing order
    #[serde(default = "default_documents")]
    pub documents: Vec<PathBuf>,

    /// Output artifacts
    #[serde(default)]
    pub output: OutputConfig,

    /// Report presentation
    #[serde(default)]
    pub report: ReportConfig,

    /// External scanners
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            documents: default_documents(),
            output: OutputConfig::default(),
            report: ReportConfig::default(),
            tools: ToolsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_documents() -> Vec<PathBuf> {
    [
        "templates/landing/map2.html",
        "templates/base.html",
        "templates/navbar.html",
        "templates/mapnavbar.html",
        "templates/map2navbar.html",
        "templates/vercel.html",
        "templates/footer.html",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Where the JSON snapshot and HTML report are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, created if absent
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// JSON snapshot file name
    #[serde(default = "default_json_file")]
    pub json_file: String,

    /// HTML report file name
    #[serde(default = "default_html_file")]
    pub html_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            json_file: default_json_file(),
            html_file: default_html_file(),
        }
    }
}

impl OutputConfig {
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    pub fn html_path(&self) -> PathBuf {
        self.dir.join(&self.html_file)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./comprehensive_accessibility_results")
}

fn default_json_file() -> String {
    "comprehensive_accessibility_results.json".to_string()
}

fn default_html_file() -> String {
    "comprehensive_accessibility_report.html".to_string()
}

/// HTML report presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page title and main heading
    #[serde(default = "default_report_title")]
    pub title: String,

    /// Project name shown under the heading
    #[serde(default)]
    pub project: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            project: None,
        }
    }
}

fn default_report_title() -> String {
    "Comprehensive Accessibility Report".to_string()
}

/// External scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_axe")]
    pub axe: ToolConfig,

    #[serde(default = "default_pa11y")]
    pub pa11y: ToolConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            axe: default_axe(),
            pa11y: default_pa11y(),
        }
    }
}

/// One external scanner command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Executable name or path
    pub program: String,

    /// Arguments; `{file}` is replaced by the document path
    #[serde(default = "default_tool_args")]
    pub args: Vec<String>,
}

fn default_axe() -> ToolConfig {
    ToolConfig {
        enabled: true,
        program: "axe".to_string(),
        args: vec![FILE_PLACEHOLDER.to_string(), "--format=json".to_string()],
    }
}

fn default_pa11y() -> ToolConfig {
    ToolConfig {
        enabled: true,
        program: "pa11y".to_string(),
        args: vec![FILE_PLACEHOLDER.to_string(), "--json".to_string()],
    }
}

fn default_tool_args() -> Vec<String> {
    vec![FILE_PLACEHOLDER.to_string()]
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a path, falling back to defaults when the file
/// does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Get the default config path
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".wcagbot.toml")
}

fn validate(config: &Config) -> Result<()> {
    if config.output.json_file.is_empty() || config.output.html_file.is_empty() {
        return Err(WcagError::Config("output file names must not be empty".to_string()));
    }
    if config.output.json_file == config.output.html_file {
        return Err(WcagError::Config(
            "json_file and html_file must differ".to_string(),
        ));
    }
    for (name, tool) in [("axe", &config.tools.axe), ("pa11y", &config.tools.pa11y)] {
        if tool.enabled && tool.program.trim().is_empty() {
            return Err(WcagError::Config(format!("tools.{}.program is empty", name)));
        }
    }
    Ok(())
}
