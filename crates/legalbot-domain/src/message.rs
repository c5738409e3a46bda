//! Message module - turns of a per-domain conversation

use crate::domain::Domain;
use serde::{Deserialize, Deserializer, Serialize};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submitted by the user
    User,
    /// Produced by the assistant (answers, greetings and fallbacks)
    Bot,
}

/// A retrieved source fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Source identifier (empty when the backend does not know it)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,

    /// Excerpt text
    pub text: String,

    /// Relevance in [0, 1], absent when unknown
    #[serde(default, deserialize_with = "clamped_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl DocumentRef {
    /// Create a document reference
    pub fn new(filename: impl Into<String>, text: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            score: score.map(|s| s.clamp(0.0, 1.0)),
        }
    }

    /// Relevance as a percentage, if known
    pub fn relevance_percent(&self) -> Option<f64> {
        self.score.map(|s| s * 100.0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn clamped_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = Option::<f64>::deserialize(deserializer)?;
    Ok(score.filter(|s| s.is_finite()).map(|s| s.clamp(0.0, 1.0)))
}

/// One turn in a session
///
/// User messages never carry citations or documents; the constructors are
/// the only way this crate builds messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author
    pub role: Role,

    /// Text shown to the user
    pub content: String,

    /// Unique citation tokens in first-occurrence order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,

    /// Retrieved source fragments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentRef>,
}

impl Message {
    /// A user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            citations: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// A bot message without an answer payload (greeting or fallback)
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            citations: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// A bot message carrying an answer
    pub fn answer(
        content: impl Into<String>,
        citations: Vec<String>,
        documents: Vec<DocumentRef>,
    ) -> Self {
        Self {
            role: Role::Bot,
            content: content.into(),
            citations,
            documents,
        }
    }

    /// Whether this message was submitted by the user
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Conversation state owned by one domain controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Domain this session belongs to
    pub domain: Domain,

    /// Append-only message sequence, seeded with the domain greeting
    pub messages: Vec<Message>,

    /// True while a request is in flight
    pub pending: bool,
}

impl Session {
    /// A fresh session holding only the greeting
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            messages: vec![Message::bot(domain.greeting())],
            pending: false,
        }
    }

    /// The most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
