//! LegalBot Extractor
//!
//! Pure text and payload logic for the session layer.
//!
//! # Overview
//!
//! Two stateless components live here:
//!
//! - **ResponseNormalizer**: decodes a raw backend JSON payload once into a
//!   tagged [`Payload`] and maps it to an ordered list of bot message drafts
//! - **CitationExtractor**: scans answer text with a per-domain, ordered
//!   table of case-insensitive rules and returns the unique citation tokens
//!   in first-occurrence order
//!
//! # Architecture
//!
//! ```text
//! JSON → Payload → BotMessageDraft* → (CitationCatalog) → Message*
//! ```
//!
//! # Example Usage
//!
//! ```
//! use legalbot_domain::Domain;
//! use legalbot_extractor::extract;
//!
//! let citations = extract("See Section 302 and IPC 34, Chapter II", Domain::CodeSection);
//! assert_eq!(citations, vec!["Section 302", "IPC 34", "Chapter II"]);
//! ```

#![warn(missing_docs)]

mod citation;
mod config;
mod error;
mod normalize;
mod payload;
mod rules;

#[cfg(test)]
mod tests;

pub use citation::{extract, CitationCatalog};
pub use config::{RuleEntry, RuleFile};
pub use error::ExtractorError;
pub use normalize::{normalize, BotMessageDraft, Normalized};
pub use payload::Payload;
pub use rules::{CitationRule, RuleSet};
