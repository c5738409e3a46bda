//! Citation rule tables

use crate::error::ExtractorError;
use legalbot_domain::Domain;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Built-in rules per domain, in scan order.
///
/// Digit classes are spelled `[0-9]` so that only ASCII digits match.
const CODE_SECTION_RULES: &[(&str, &str)] = &[
    ("section", r"Section\s+[0-9]+"),
    ("ipc", r"IPC\s+[0-9]+"),
    ("chapter", r"Chapter\s+[IVX]+"),
];

const PRECEDENT_RULES: &[(&str, &str)] = &[
    ("air", r"AIR\s+[0-9]{4}\s+[A-Z]{2,4}\s+[0-9]+"),
    ("scc-year-first", r"\([0-9]{4}\)\s+[0-9]+\s+SCC\s+[0-9]+"),
    ("scc-parenthetical", r"[0-9]{4}\s+SCC\s+\([^)]+\)\s+[0-9]+"),
    ("scc-volume", r"[0-9]{4}\s+\([0-9]+\)\s+SCC\s+[0-9]+"),
];

/// A single case-insensitive citation pattern
#[derive(Debug, Clone)]
pub struct CitationRule {
    name: String,
    regex: Regex,
}

impl CitationRule {
    /// Compile a rule; the whole pattern matches case-insensitively
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ExtractorError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ExtractorError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    /// Rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source pattern
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Append all non-overlapping matches, left to right, trimmed
    pub(crate) fn matches_into(&self, text: &str, out: &mut Vec<String>) {
        out.extend(self.regex.find_iter(text).map(|m| m.as_str().trim().to_string()));
    }
}

/// Ordered list of rules for one domain
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CitationRule>,
}

impl RuleSet {
    /// The built-in rules for a domain
    pub fn builtin(domain: Domain) -> Self {
        let table = match domain {
            Domain::CodeSection => CODE_SECTION_RULES,
            Domain::Precedent => PRECEDENT_RULES,
            Domain::Document => &[],
        };

        let rules = table
            .iter()
            .filter_map(|(name, pattern)| match CitationRule::new(*name, pattern) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("Dropping built-in rule {}: {}", name, e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Append a rule after the existing ones
    pub fn push(&mut self, rule: CitationRule) {
        self.rules.push(rule);
    }

    /// Rules in scan order
    pub fn rules(&self) -> &[CitationRule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
