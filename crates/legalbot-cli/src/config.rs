//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use legalbot_extractor::{CitationCatalog, RuleFile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Backend URL of the default profile.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Backend profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend base URL
    pub backend_url: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Line history size for the REPL
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Extra citation rules, appended after the built-in ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_rules: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".legalbot"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    ///
    /// A file without profiles gets the default profile.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&contents)?;
            if config.profiles.is_empty() {
                config.profiles.insert(default_profile(), Profile::default());
            }
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Backend URL to use, preferring an explicit override.
    pub fn backend_url(&self, url_override: Option<&str>) -> Result<String> {
        match url_override {
            Some(url) => Ok(url.to_string()),
            None => Ok(self.get_active_profile()?.backend_url.clone()),
        }
    }

    /// Built-in citation catalog extended with the configured rule file.
    pub fn citation_catalog(&self) -> Result<CitationCatalog> {
        let mut catalog = CitationCatalog::builtin();
        if let Some(path) = &self.settings.citation_rules {
            RuleFile::load(path)?.apply(&mut catalog)?;
        }
        Ok(catalog)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(default_profile(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            citation_rules: None,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalbot_domain::Domain;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap().backend_url, DEFAULT_BACKEND_URL);
        assert!(config.settings.color);
        assert!(config.settings.citation_rules.is_none());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        config.set_profile(
            "staging".to_string(),
            Profile {
                backend_url: "http://staging:8080".to_string(),
            },
        );

        config.switch_profile("staging".to_string()).unwrap();
        assert_eq!(config.active_profile, "staging");
        assert_eq!(config.backend_url(None).unwrap(), "http://staging:8080");
        assert_eq!(
            config.backend_url(Some("http://override")).unwrap(),
            "http://override"
        );
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        assert!(config.switch_profile("nonexistent".to_string()).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.settings.color = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert!(!loaded.settings.color);
        assert_eq!(loaded.profiles, config.profiles);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.settings.history_size, 1000);
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.backend_url(None).unwrap(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_citation_rules_file_extends_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("rules.toml");
        fs::write(
            &rules,
            "[[rules]]\ndomain = \"ipc\"\nname = \"crpc\"\npattern = 'CrPC\\s+[0-9]+'\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.settings.citation_rules = Some(rules);
        let catalog = config.citation_catalog().unwrap();
        assert_eq!(catalog.extract("CrPC 41", Domain::CodeSection), vec!["CrPC 41"]);
    }
}
