//! Decode backend payloads into a tagged shape

use legalbot_domain::{DocumentRef, Domain};
use serde_json::{Map, Value};
use tracing::warn;

/// Shape of a 2xx backend payload, decided once per response
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// One non-empty answer (`answer`, or `contract` for documents)
    SingleAnswer {
        /// Answer text
        text: String,
        /// Retrieved source fragments
        docs: Vec<DocumentRef>,
    },

    /// One answer per model, in payload order (precedent domain)
    MultiAnswer {
        /// `(model id, answer text)` pairs
        entries: Vec<(String, String)>,
        /// Retrieved source fragments, shared by every entry
        docs: Vec<DocumentRef>,
    },

    /// No usable answer field
    Malformed,
}

impl Payload {
    /// Decode a payload for `domain`
    ///
    /// A non-empty `answers` mapping wins over `answer` where the domain
    /// supports multi-model responses.
    pub fn decode(domain: Domain, value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Payload::Malformed;
        };

        if domain.supports_multi_model() {
            if let Some(entries) = multi_answer_entries(obj) {
                return Payload::MultiAnswer {
                    entries,
                    docs: retrieved_docs(obj),
                };
            }
        }

        match obj.get(domain.answer_key()).and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Payload::SingleAnswer {
                text: text.to_string(),
                docs: retrieved_docs(obj),
            },
            _ => Payload::Malformed,
        }
    }

    /// Whether no usable answer was found
    pub fn is_malformed(&self) -> bool {
        matches!(self, Payload::Malformed)
    }
}

fn multi_answer_entries(obj: &Map<String, Value>) -> Option<Vec<(String, String)>> {
    let answers = obj.get("answers")?.as_object()?;

    let entries: Vec<(String, String)> = answers
        .iter()
        .filter_map(|(model, text)| match text.as_str() {
            Some(text) => Some((model.clone(), text.to_string())),
            None => {
                warn!("Skipping non-text answer from model {}", model);
                None
            }
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

fn retrieved_docs(obj: &Map<String, Value>) -> Vec<DocumentRef> {
    let Some(raw) = obj.get("retrieved_docs") else {
        return Vec::new();
    };

    let Some(items) = raw.as_array() else {
        if !raw.is_null() {
            warn!("Ignoring retrieved_docs that is not an array");
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<DocumentRef>(item.clone()) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping retrieved document {}: {}", idx, e);
                None
            }
        })
        .collect()
}
