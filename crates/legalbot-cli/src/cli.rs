//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use legalbot_domain::Domain;

/// LegalBot CLI - Ask about IPC sections, case precedents and legal documents.
#[derive(Debug, Parser)]
#[command(name = "legalbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Backend URL, overriding the profile
    #[arg(short, long, global = true, env = "LEGALBOT_URL")]
    pub url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (answer text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a single question
    Ask(AskArgs),

    /// List assistant domains
    Domains,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Assistant domain
    #[arg(value_enum)]
    pub domain: DomainArg,

    /// Question or document request
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl AskArgs {
    /// Query words joined into one line
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Backend URL
        #[arg(short, long)]
        url: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Domain argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DomainArg {
    /// IPC code sections
    #[value(alias = "code")]
    Ipc,
    /// Case precedents
    #[value(alias = "precedence")]
    Precedent,
    /// Legal document drafting
    #[value(alias = "contract")]
    Document,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<DomainArg> for Domain {
    fn from(domain: DomainArg) -> Self {
        match domain {
            DomainArg::Ipc => Domain::CodeSection,
            DomainArg::Precedent => Domain::Precedent,
            DomainArg::Document => Domain::Document,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["legalbot"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_ask_command() {
        let cli = Cli::parse_from(["legalbot", "ask", "ipc", "punishment", "for", "theft"]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert!(matches!(args.domain, DomainArg::Ipc));
                assert_eq!(args.query_text(), "punishment for theft");
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["legalbot", "ask", "ipc"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "legalbot",
            "domains",
            "--url",
            "http://10.0.0.2:8080",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.url.as_deref(), Some("http://10.0.0.2:8080"));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_domain_conversion() {
        let domain: Domain = DomainArg::Precedent.into();
        assert_eq!(domain, Domain::Precedent);
        let cli = Cli::parse_from(["legalbot", "ask", "contract", "lease"]);
        assert!(matches!(
            cli.command,
            Some(Command::Ask(AskArgs { domain: DomainArg::Document, .. }))
        ));
    }
}
