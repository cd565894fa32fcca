// SPDX-License-Identifier: PMPL-1.0-or-later
//! Criterion registry.
//!
//! The registry is filled once at startup and read-only afterwards. Its
//! registration order is the order in which criteria are evaluated and
//! therefore the order findings appear in every report.

use crate::error::{Result, WcagError};
use crate::finding::{Finding, WcagLevel};
use crate::rules::{self, Rule};

/// A named, independently evaluable success criterion
pub struct Criterion {
    /// Stable identifier (e.g., "1.1.1")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Conformance level
    pub level: WcagLevel,
    /// What the criterion requires
    pub description: &'static str,
    rule: Box<dyn Rule>,
}

impl Criterion {
    /// Create a criterion backed by `rule`
    pub fn new(
        id: &'static str,
        name: &'static str,
        level: WcagLevel,
        description: &'static str,
        rule: impl Rule + 'static,
    ) -> Self {
        Self {
            id,
            name,
            level,
            description,
            rule: Box::new(rule),
        }
    }

    /// Run this criterion's rule against a document's content
    pub fn evaluate(&self, content: &str) -> Vec<Finding> {
        self.rule.evaluate(content)
    }
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Ordered catalog of criteria keyed by identifier
#[derive(Debug, Default)]
pub struct Registry {
    criteria: Vec<Criterion>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion. Identifiers must be unique.
    pub fn register(&mut self, criterion: Criterion) -> Result<()> {
        if self.get(criterion.id).is_some() {
            return Err(WcagError::DuplicateCriterion(criterion.id.to_string()));
        }
        self.criteria.push(criterion);
        Ok(())
    }

    /// All criteria in registration order
    pub fn all(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Look up a criterion by identifier
    pub fn get(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Number of criteria registered at `level`
    pub fn count_at(&self, level: WcagLevel) -> usize {
        self.criteria.iter().filter(|c| c.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// The WCAG 2.1 A/AA catalog
    pub fn wcag21() -> Result<Self> {
        let mut registry = Self::new();
        for criterion in wcag21_criteria() {
            registry.register(criterion)?;
        }
        Ok(registry)
    }
}

fn wcag21_criteria() -> Vec<Criterion> {
    use WcagLevel::{A, AA};

    vec![
        Criterion::new(
            "1.1.1",
            "Non-text Content",
            A,
            "All non-text content has a text alternative",
            rules::alt_text::non_text_content,
        ),
        Criterion::new(
            "1.3.1",
            "Info and Relationships",
            A,
            "Information, structure, and relationships can be programmatically determined",
            rules::semantic::info_and_relationships,
        ),
        Criterion::new(
            "1.4.1",
            "Use of Color",
            A,
            "Color is not used as the only visual means of conveying information",
            rules::contrast::use_of_color,
        ),
        Criterion::new(
            "1.4.3",
            "Contrast (Minimum)",
            AA,
            "Text has sufficient contrast ratio",
            rules::contrast::contrast_minimum,
        ),
        Criterion::new(
            "2.1.1",
            "Keyboard",
            A,
            "All functionality is available from a keyboard",
            rules::keyboard::keyboard,
        ),
        Criterion::new(
            "2.4.1",
            "Bypass Blocks",
            A,
            "A mechanism is available to bypass repeated blocks of content",
            rules::navigation::bypass_blocks,
        ),
        Criterion::new(
            "2.4.2",
            "Page Titled",
            A,
            "Web pages have titles that describe topic or purpose",
            rules::navigation::page_titled,
        ),
        Criterion::new(
            "2.4.3",
            "Focus Order",
            A,
            "If a Web page can be navigated sequentially, focusable components receive focus in an order that preserves meaning and operability",
            rules::keyboard::focus_order,
        ),
        Criterion::new(
            "2.4.4",
            "Link Purpose (In Context)",
            A,
            "The purpose of each link can be determined from the link text alone or from the link text together with its programmatically determined link context",
            rules::navigation::link_purpose,
        ),
        Criterion::new(
            "2.4.6",
            "Headings and Labels",
            AA,
            "Headings and labels describe topic or purpose",
            rules::semantic::headings_and_labels,
        ),
        Criterion::new(
            "2.4.7",
            "Focus Visible",
            AA,
            "Any keyboard operable user interface has a mode of operation where the keyboard focus indicator is visible",
            rules::keyboard::focus_visible,
        ),
        Criterion::new(
            "3.2.1",
            "On Focus",
            A,
            "When any component receives focus, it does not initiate a change of context",
            rules::context_change::on_focus,
        ),
        Criterion::new(
            "3.2.2",
            "On Input",
            A,
            "Changing the setting of any user interface component does not automatically cause a change of context unless the user has been advised of the behavior before using the component",
            rules::context_change::on_input,
        ),
        Criterion::new(
            "4.1.1",
            "Parsing",
            A,
            "Content can be parsed by user agents, including assistive technologies",
            rules::parsing::parsing,
        ),
        Criterion::new(
            "4.1.2",
            "Name, Role, Value",
            A,
            "For all user interface components, the name and role can be programmatically determined",
            rules::aria::name_role_value,
        ),
    ]
}
