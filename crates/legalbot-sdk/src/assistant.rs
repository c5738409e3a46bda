//! Top-level assistant owning the three domain controllers.

use crate::session::{SessionController, SubmitOutcome};
use legalbot_domain::{Domain, HistoryStore, Transport};
use legalbot_extractor::CitationCatalog;
use std::sync::Arc;

/// One controller per domain over a shared transport and history log
///
/// Controllers are independent: each may have its own request in flight.
#[derive(Debug, Clone)]
pub struct Assistant {
    history: HistoryStore,
    code_section: SessionController,
    precedent: SessionController,
    document: SessionController,
}

impl Assistant {
    /// Create an assistant with the built-in citation rules
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_catalog(transport, CitationCatalog::builtin())
    }

    /// Create an assistant with a custom citation catalog
    pub fn with_catalog(transport: Arc<dyn Transport>, catalog: CitationCatalog) -> Self {
        let history = HistoryStore::new();
        let catalog = Arc::new(catalog);
        let controller = |domain| {
            SessionController::with_catalog(
                domain,
                Arc::clone(&transport),
                history.clone(),
                Arc::clone(&catalog),
            )
        };

        Self {
            code_section: controller(Domain::CodeSection),
            precedent: controller(Domain::Precedent),
            document: controller(Domain::Document),
            history,
        }
    }

    /// Controller for `domain`
    pub fn controller(&self, domain: Domain) -> &SessionController {
        match domain {
            Domain::CodeSection => &self.code_section,
            Domain::Precedent => &self.precedent,
            Domain::Document => &self.document,
        }
    }

    /// Shared history log
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Submit `query` to the controller for `domain`
    pub async fn submit(&self, domain: Domain, query: &str) -> SubmitOutcome {
        self.controller(domain).submit(query).await
    }

    /// Empty the history log, returning how many entries were removed
    ///
    /// Session transcripts are untouched.
    pub fn clear_history(&self) -> usize {
        self.history.clear()
    }
}
