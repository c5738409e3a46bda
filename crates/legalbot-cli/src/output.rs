//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use legalbot_domain::{DocumentRef, Domain, HistoryEntry, Message, Role};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const EXCERPT_CHARS: usize = 240;
const HISTORY_EXCERPT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a run of messages.
    pub fn format_messages(&self, messages: &[Message]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(messages)?),
            OutputFormat::Table => Ok(messages
                .iter()
                .map(|m| self.render_message(m))
                .collect::<Vec<_>>()
                .join("\n\n")),
            OutputFormat::Quiet => Ok(messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")),
        }
    }

    /// Render one message with its citations and documents.
    fn render_message(&self, message: &Message) -> String {
        let speaker = match message.role {
            Role::User => self.colorize("You:", "green"),
            Role::Bot => self.colorize("LegalBot:", "blue"),
        };

        let mut out = format!("{}\n{}", speaker, message.content);

        if !message.citations.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.colorize("Legal Citations", "cyan"));
            out.push_str(": ");
            out.push_str(&message.citations.join(" | "));
        }

        if !message.documents.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.colorize("Referenced Documents", "magenta"));
            for doc in &message.documents {
                out.push('\n');
                out.push_str(&self.render_document(doc));
            }
        }

        out
    }

    fn render_document(&self, doc: &DocumentRef) -> String {
        let name = if doc.filename.is_empty() {
            "(unnamed)"
        } else {
            doc.filename.as_str()
        };
        format!(
            "  - {} (Relevance: {})\n    {}",
            name,
            relevance(doc),
            excerpt(&doc.text, EXCERPT_CHARS)
        )
    }

    /// Format history entries.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => Ok(self.format_history_table(entries)),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.query.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_history_table(&self, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return self.colorize(
                "No chat history yet. Start a conversation to see your queries here.",
                "yellow",
            );
        }

        let mut builder = Builder::default();
        builder.push_record(["Type", "Time", "Query", "Response"]);

        for entry in entries {
            let time = entry
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string();
            builder.push_record([
                entry.domain.tag().to_string(),
                time,
                excerpt(&entry.query, HISTORY_EXCERPT_CHARS),
                excerpt(&entry.response, HISTORY_EXCERPT_CHARS),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the domain listing.
    pub fn format_domains(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let domains: Vec<serde_json::Value> = Domain::ALL
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "name": d.as_str(),
                            "tag": d.tag(),
                            "title": d.title(),
                            "path": d.path(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&domains)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Name", "Tag", "Title", "Endpoint"]);
                for d in Domain::ALL {
                    builder.push_record([d.as_str(), d.tag(), d.title(), d.path()]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(Domain::ALL
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the in-flight indicator for a domain.
    pub fn pending(&self, domain: Domain) -> String {
        self.colorize(&format!("… {}", domain.pending_label()), "yellow")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether output is machine-readable.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Relevance label, one decimal place.
fn relevance(doc: &DocumentRef) -> String {
    match doc.relevance_percent() {
        Some(pct) => format!("{:.1}%", pct),
        None => "N/A".to_string(),
    }
}

/// First `max` characters of `text` on one line.
fn excerpt(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}
