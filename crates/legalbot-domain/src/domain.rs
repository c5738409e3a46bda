//! Domain module - the three independent query categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Query domain
///
/// Each domain owns a session, a backend endpoint, a citation rule-set and a
/// pair of fixed fallback texts. All per-domain data is reached through
/// methods on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// Statute section lookup (Indian Penal Code)
    CodeSection,

    /// Case-law precedent lookup
    Precedent,

    /// Legal document drafting
    Document,
}

impl Domain {
    /// Every domain, in navigation order
    pub const ALL: [Domain; 3] = [Domain::CodeSection, Domain::Precedent, Domain::Document];

    /// Short machine name
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::CodeSection => "ipc",
            Domain::Precedent => "precedent",
            Domain::Document => "document",
        }
    }

    /// Parse a domain from a name or alias
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ipc" | "code" | "section" | "codesection" | "code-section" => Some(Domain::CodeSection),
            "precedent" | "precedence" | "legal" => Some(Domain::Precedent),
            "document" | "doc" | "contract" => Some(Domain::Document),
            _ => None,
        }
    }

    /// Tag recorded on history entries
    pub fn tag(&self) -> &'static str {
        match self {
            Domain::CodeSection => "IPC",
            Domain::Precedent => "Precedence",
            Domain::Document => "Document",
        }
    }

    /// Human-readable title of the domain's view
    pub fn title(&self) -> &'static str {
        match self {
            Domain::CodeSection => "IPC Section Finder",
            Domain::Precedent => "Precedence Finder",
            Domain::Document => "Legal Document Creator",
        }
    }

    /// Backend path, relative to the configured base URL
    pub fn path(&self) -> &'static str {
        match self {
            Domain::CodeSection => "/query/ipc",
            Domain::Precedent => "/query/legal",
            Domain::Document => "/generate_contract",
        }
    }

    /// Key under which the query text is sent
    pub fn request_key(&self) -> &'static str {
        match self {
            Domain::CodeSection | Domain::Precedent => "query",
            Domain::Document => "question",
        }
    }

    /// Build the JSON request body for a query
    pub fn request_body(&self, query: &str) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(
            self.request_key().to_string(),
            serde_json::Value::String(query.to_string()),
        );
        serde_json::Value::Object(body)
    }

    /// Key of the single-answer field in a success payload
    pub fn answer_key(&self) -> &'static str {
        match self {
            Domain::CodeSection | Domain::Precedent => "answer",
            Domain::Document => "contract",
        }
    }

    /// Whether the backend may answer with a multi-model `answers` mapping
    pub fn supports_multi_model(&self) -> bool {
        matches!(self, Domain::Precedent)
    }

    /// Synthetic greeting that seeds every new session
    pub fn greeting(&self) -> &'static str {
        match self {
            Domain::CodeSection => {
                "Hello! I can help you find relevant IPC sections for your legal queries. What would you like to know?"
            }
            Domain::Precedent => {
                "I can help you find legal precedents and case laws. What legal matter would you like to research?"
            }
            Domain::Document => {
                "I can help you create legal documents and contracts. What type of document would you like to generate?"
            }
        }
    }

    /// Status line shown while a request is in flight
    pub fn pending_label(&self) -> &'static str {
        match self {
            Domain::CodeSection => "Searching IPC sections...",
            Domain::Precedent => "Searching legal precedents...",
            Domain::Document => "Generating document...",
        }
    }

    /// Fallback shown for a 2xx payload without a usable answer
    pub fn empty_answer_text(&self) -> &'static str {
        match self {
            Domain::CodeSection => {
                "I apologize, but I couldn't find relevant IPC sections for your query. Please try rephrasing your question."
            }
            Domain::Precedent => "No answer received from backend.",
            Domain::Document => {
                "I couldn't generate a document for your request. Please provide more specific details."
            }
        }
    }

    /// Fallback shown when the transport fails
    pub fn transport_failure_text(&self) -> &'static str {
        match self {
            Domain::CodeSection => "Sorry, there was an error processing your request. Please try again.",
            Domain::Precedent => "Sorry, there was an error contacting the server.",
            Domain::Document => "Sorry, there was an error generating the document. Please try again.",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid domain: {}", s))
    }
}
