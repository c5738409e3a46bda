//! LegalBot Domain Layer
//!
//! Value types and trait seams shared by every other LegalBot crate.
//!
//! ## Key Concepts
//!
//! - **Domain**: one of the three independent query categories (code-section
//!   lookup, precedent lookup, document drafting), each with its own endpoint,
//!   fallback texts and citation rules
//! - **Message**: one turn in a per-domain conversation
//! - **DocumentRef**: a retrieved source fragment attached to an answer
//! - **HistoryStore**: the process-wide log of answered queries across domains
//! - **Transport**: the narrow boundary to the backend service
//!
//! ## Architecture
//!
//! Nothing in this crate performs I/O. Infrastructure implementations of
//! [`traits::Transport`] live in `legalbot-sdk`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod history;
pub mod message;
pub mod traits;

// Re-exports for convenience
pub use domain::Domain;
pub use history::{EntryId, HistoryEntry, HistoryStore};
pub use message::{DocumentRef, Message, Role, Session};
pub use traits::{Transport, TransportError};
