// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for wcagbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WcagError>;

/// Main error type for wcagbot
#[derive(Error, Debug)]
pub enum WcagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Two criteria were registered under the same identifier.
    #[error("Criterion {0} is already registered")]
    DuplicateCriterion(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external scanner could not be run or produced unusable output.
    #[error("{tool} failed: {reason}")]
    Tool { tool: String, reason: String },
}
