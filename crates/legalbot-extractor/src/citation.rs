//! Citation extraction over per-domain rule tables

use crate::error::ExtractorError;
use crate::rules::{CitationRule, RuleSet};
use legalbot_domain::Domain;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Rule sets for every domain
#[derive(Debug, Clone)]
pub struct CitationCatalog {
    code_section: RuleSet,
    precedent: RuleSet,
}

impl CitationCatalog {
    /// Catalog holding only the built-in rules
    pub fn builtin() -> Self {
        Self {
            code_section: RuleSet::builtin(Domain::CodeSection),
            precedent: RuleSet::builtin(Domain::Precedent),
        }
    }

    /// Shared built-in catalog, compiled once per process
    pub fn shared() -> &'static CitationCatalog {
        static CATALOG: OnceLock<CitationCatalog> = OnceLock::new();
        CATALOG.get_or_init(CitationCatalog::builtin)
    }

    /// Rules for a domain; `None` when the domain does not extract citations
    pub fn rules(&self, domain: Domain) -> Option<&RuleSet> {
        match domain {
            Domain::CodeSection => Some(&self.code_section),
            Domain::Precedent => Some(&self.precedent),
            Domain::Document => None,
        }
    }

    /// Append a rule after the domain's existing rules
    pub fn add_rule(&mut self, domain: Domain, rule: CitationRule) -> Result<(), ExtractorError> {
        match domain {
            Domain::CodeSection => self.code_section.push(rule),
            Domain::Precedent => self.precedent.push(rule),
            Domain::Document => {
                return Err(ExtractorError::ExtractionDisabled(domain.as_str().to_string()))
            }
        }
        Ok(())
    }

    /// Extract unique citation tokens from `text`
    ///
    /// Matches are collected rule by rule, left to right within a rule, then
    /// deduplicated by exact value keeping the first occurrence.
    pub fn extract(&self, text: &str, domain: Domain) -> Vec<String> {
        let Some(rules) = self.rules(domain) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        for rule in rules.rules() {
            rule.matches_into(text, &mut found);
        }

        let mut seen = HashSet::new();
        found.retain(|token| seen.insert(token.clone()));
        found
    }
}

impl Default for CitationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Extract citations with the built-in rules
pub fn extract(text: &str, domain: Domain) -> Vec<String> {
    CitationCatalog::shared().extract(text, domain)
}
