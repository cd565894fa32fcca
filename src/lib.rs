// SPDX-License-Identifier: PMPL-1.0-or-later
//! Wcagbot - WCAG 2.1 A/AA Template Auditor
//!
//! Reads a list of HTML template documents, evaluates a catalog of fifteen
//! pattern-based WCAG 2.1 success criteria against each document's raw text,
//! runs the axe-core and pa11y scanners out of process, and aggregates
//! everything into a JSON snapshot and an HTML narrative report.
//!
//! ## Criteria
//!
//! - **Alt Text** (1.1.1): Images without alternative text
//! - **Semantic** (1.3.1/2.4.6): Heading hierarchy and heading text
//! - **Contrast** (1.4.1/1.4.3): Color-only cues and hard-coded colors
//! - **Keyboard** (2.1.1/2.4.3/2.4.7): Mouse-only handlers, tab order, focus outlines
//! - **Navigation** (2.4.1/2.4.2/2.4.4): Skip links, page titles, link text
//! - **Context Change** (3.2.1/3.2.2): Navigation triggered by focus or input
//! - **Parsing** (4.1.1): Open/close tag balance
//! - **ARIA** (4.1.2): Accessible names for inputs and buttons
//!
//! Checks are textual pattern matches, not a DOM walk.

pub mod auditor;
pub mod config;
pub mod criteria;
pub mod error;
pub mod finding;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod summary;
pub mod tools;
