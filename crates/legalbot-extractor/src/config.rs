//! TOML rule files for extending the citation catalog
//!
//! ```toml
//! [[rules]]
//! domain = "ipc"
//! name = "crpc"
//! pattern = 'CrPC\s+[0-9]+'
//! ```

use crate::citation::CitationCatalog;
use crate::error::ExtractorError;
use crate::rules::CitationRule;
use legalbot_domain::Domain;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One rule as written in a rule file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Domain name or alias (see `Domain::parse`)
    pub domain: String,

    /// Optional rule name, defaults to the pattern itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Case-insensitive regular expression
    pub pattern: String,
}

/// Contents of a rule file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleFile {
    /// Rules in file order
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl RuleFile {
    /// Parse a rule file from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a rule file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExtractorError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Append every rule to `catalog`, after its built-in rules
    pub fn apply(&self, catalog: &mut CitationCatalog) -> Result<(), ExtractorError> {
        for entry in &self.rules {
            let domain = Domain::parse(&entry.domain)
                .ok_or_else(|| ExtractorError::UnknownDomain(entry.domain.clone()))?;
            let name = entry.name.clone().unwrap_or_else(|| entry.pattern.clone());
            let rule = CitationRule::new(name, &entry.pattern)?;
            catalog.add_rule(domain, rule)?;
        }
        Ok(())
    }
}

impl CitationCatalog {
    /// Built-in catalog extended with the rules of a TOML rule file
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let mut catalog = Self::builtin();
        RuleFile::from_toml(toml_str)?.apply(&mut catalog)?;
        Ok(catalog)
    }
}
