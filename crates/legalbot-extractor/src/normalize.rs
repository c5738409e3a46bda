//! Map decoded payloads to bot message drafts

use crate::citation::CitationCatalog;
use crate::payload::Payload;
use legalbot_domain::{DocumentRef, Domain, Message};
use serde_json::Value;

/// A bot message before citation extraction
#[derive(Debug, Clone, PartialEq)]
pub struct BotMessageDraft {
    /// Text shown to the user
    pub content: String,

    /// Text scanned for citations (the raw answer, without any model prefix)
    pub citation_source: String,

    /// Retrieved source fragments
    pub documents: Vec<DocumentRef>,
}

impl BotMessageDraft {
    /// Finish the draft into a message, extracting citations for `domain`
    pub fn into_message(self, domain: Domain, catalog: &CitationCatalog) -> Message {
        let citations = catalog.extract(&self.citation_source, domain);
        Message::answer(self.content, citations, self.documents)
    }
}

/// Result of normalizing one payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Drafts in display order; empty means the fallback applies
    pub drafts: Vec<BotMessageDraft>,

    /// Answer text to mirror into the history log
    ///
    /// The first draft's raw text, set only when some draft carries text.
    pub primary_answer: Option<String>,
}

impl Normalized {
    /// Whether no draft was produced
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Finish every draft into a message
    pub fn into_messages(self, domain: Domain, catalog: &CitationCatalog) -> Vec<Message> {
        self.drafts
            .into_iter()
            .map(|draft| draft.into_message(domain, catalog))
            .collect()
    }
}

impl From<Payload> for Normalized {
    fn from(payload: Payload) -> Self {
        let drafts = match payload {
            Payload::SingleAnswer { text, docs } => vec![BotMessageDraft {
                content: text.clone(),
                citation_source: text,
                documents: docs,
            }],
            Payload::MultiAnswer { entries, docs } => entries
                .into_iter()
                .map(|(model, text)| BotMessageDraft {
                    content: format!("[{}]\n\n{}", model, text),
                    citation_source: text,
                    documents: docs.clone(),
                })
                .collect(),
            Payload::Malformed => Vec::new(),
        };

        let primary_answer = if drafts.iter().any(|d| !d.citation_source.is_empty()) {
            drafts.first().map(|d| d.citation_source.clone())
        } else {
            None
        };

        Self {
            drafts,
            primary_answer,
        }
    }
}

/// Normalize a raw 2xx payload for `domain`
pub fn normalize(domain: Domain, value: &Value) -> Normalized {
    Payload::decode(domain, value).into()
}
