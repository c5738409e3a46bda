//! Per-domain conversation controller.
//!
//! A controller owns one [`Session`] and submits at most one query at a time.
//! Every submission ends with at least one bot message appended and the
//! pending flag cleared, whatever the backend does.

use legalbot_domain::{Domain, HistoryEntry, HistoryStore, Message, Session, Transport};
use legalbot_extractor::{normalize, CitationCatalog};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Why a submission was dropped without contacting the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Query was empty after trimming
    EmptyQuery,
    /// A request is already in flight
    Busy,
}

/// Result of one [`SessionController::submit`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended and no request was made
    Ignored(IgnoreReason),

    /// The backend answered; `appended` bot messages were added
    Answered {
        /// Number of bot messages appended
        appended: usize,
        /// Whether a history entry was recorded
        recorded: bool,
    },

    /// The backend answered without a usable answer; the fallback was appended
    EmptyAnswer,

    /// The request failed; the error message was appended
    TransportFailure,
}

impl SubmitOutcome {
    /// Whether the submission reached the backend
    pub fn was_submitted(&self) -> bool {
        !matches!(self, SubmitOutcome::Ignored(_))
    }
}

struct Inner {
    domain: Domain,
    transport: Arc<dyn Transport>,
    history: HistoryStore,
    catalog: Arc<CitationCatalog>,
    session: Mutex<Session>,
}

impl Inner {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the pending flag when the submission ends, on every path
struct PendingGuard<'a> {
    inner: &'a Inner,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.inner.session().pending = false;
    }
}

/// Handle to one domain's conversation
///
/// Clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

impl SessionController {
    /// Create a controller with the built-in citation rules
    pub fn new(domain: Domain, transport: Arc<dyn Transport>, history: HistoryStore) -> Self {
        Self::with_catalog(domain, transport, history, Arc::new(CitationCatalog::builtin()))
    }

    /// Create a controller with a custom citation catalog
    pub fn with_catalog(
        domain: Domain,
        transport: Arc<dyn Transport>,
        history: HistoryStore,
        catalog: Arc<CitationCatalog>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                domain,
                transport,
                history,
                catalog,
                session: Mutex::new(Session::new(domain)),
            }),
        }
    }

    /// Domain this controller serves
    pub fn domain(&self) -> Domain {
        self.inner.domain
    }

    /// Snapshot of the session
    pub fn state(&self) -> Session {
        self.inner.session().clone()
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.inner.session().pending
    }

    /// Number of messages in the session
    pub fn message_count(&self) -> usize {
        self.inner.session().messages.len()
    }

    /// Messages appended at or after index `start`
    pub fn messages_since(&self, start: usize) -> Vec<Message> {
        let session = self.inner.session();
        session.messages.iter().skip(start).cloned().collect()
    }

    /// Submit a query to the backend
    ///
    /// Ignored when the trimmed query is empty or a request is in flight.
    /// Otherwise the user message is appended immediately, and once the
    /// backend settles one or more bot messages follow.
    pub async fn submit(&self, query: &str) -> SubmitOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!(domain = %self.inner.domain, "Ignoring empty query");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyQuery);
        }

        let Some(_guard) = self.begin(query) else {
            debug!(domain = %self.inner.domain, "Ignoring query while a request is pending");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        };

        let domain = self.inner.domain;
        info!(domain = %domain, path = domain.path(), "Submitting query");

        let result = self
            .inner
            .transport
            .post_json(domain.path(), domain.request_body(query))
            .await;

        match result {
            Ok(value) => self.settle(query, &value),
            Err(e) => {
                warn!(domain = %domain, error = %e, "Request failed");
                self.append(vec![Message::bot(domain.transport_failure_text())]);
                SubmitOutcome::TransportFailure
            }
        }
    }

    /// Move Idle to Pending, appending the user message
    fn begin(&self, query: &str) -> Option<PendingGuard<'_>> {
        let mut session = self.inner.session();
        if session.pending {
            return None;
        }
        session.messages.push(Message::user(query));
        session.pending = true;
        Some(PendingGuard { inner: &self.inner })
    }

    fn settle(&self, query: &str, value: &serde_json::Value) -> SubmitOutcome {
        let domain = self.inner.domain;
        let normalized = normalize(domain, value);

        if normalized.is_empty() {
            warn!(domain = %domain, "Backend response carried no answer");
            self.append(vec![Message::bot(domain.empty_answer_text())]);
            return SubmitOutcome::EmptyAnswer;
        }

        let primary = normalized.primary_answer.clone();
        let messages = normalized.into_messages(domain, &self.inner.catalog);
        let appended = messages.len();
        self.append(messages);

        let recorded = match primary {
            Some(answer) => {
                self.inner.history.append(HistoryEntry::new(query, answer, domain));
                true
            }
            None => false,
        };

        info!(domain = %domain, appended, recorded, "Query answered");
        SubmitOutcome::Answered { appended, recorded }
    }

    fn append(&self, messages: Vec<Message>) {
        self.inner.session().messages.extend(messages);
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("domain", &self.inner.domain)
            .field("pending", &self.is_pending())
            .finish()
    }
}
