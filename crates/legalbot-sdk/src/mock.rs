//! Scripted transport for tests and offline use.

use async_trait::async_trait;
use legalbot_domain::{Transport, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

/// What a [`MockTransport`] answers for one path
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A 2xx response with this JSON body
    Json(Value),
    /// A network failure
    Connection(String),
    /// A non-2xx status
    Status(u16, String),
    /// A 2xx response whose body is not JSON
    Undecodable,
}

impl MockReply {
    fn into_result(self) -> Result<Value, TransportError> {
        match self {
            MockReply::Json(value) => Ok(value),
            MockReply::Connection(msg) => Err(TransportError::Connection(msg)),
            MockReply::Status(status, body) => Err(TransportError::Status { status, body }),
            MockReply::Undecodable => {
                Err(TransportError::Decode("expected value at line 1 column 1".to_string()))
            }
        }
    }
}

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Request path
    pub path: String,
    /// Request body
    pub body: Value,
}

/// Holds requests until released
///
/// Each [`Gate::release`] lets exactly one held request through, whether it
/// is already waiting or arrives later.
#[derive(Debug, Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
}

impl Gate {
    fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    /// Let one request through
    pub fn release(&self) {
        self.permits.add_permits(1);
    }

    async fn pass(&self) {
        // A closed semaphore lets everything through.
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<String, MockReply>,
    calls: Vec<MockCall>,
    gate: Option<Gate>,
}

/// Transport answering from a per-path script
///
/// Paths without a scripted reply fail with a connection error.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a transport with no scripted replies
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the reply for `path`, replacing any previous one
    pub fn respond(&self, path: &str, reply: MockReply) {
        self.lock().replies.insert(path.to_string(), reply);
    }

    /// Script a JSON reply for `path`
    pub fn respond_json(&self, path: &str, value: Value) {
        self.respond(path, MockReply::Json(value));
    }

    /// Hold every subsequent request until released through the returned gate
    pub fn hold(&self) -> Gate {
        let gate = Gate::new();
        self.lock().gate = Some(gate.clone());
        gate
    }

    /// Requests received so far, in arrival order
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let gate = {
            let mut state = self.lock();
            state.calls.push(MockCall {
                path: path.to_string(),
                body,
            });
            state.gate.clone()
        };

        if let Some(gate) = gate {
            gate.pass().await;
        }

        let reply = self.lock().replies.get(path).cloned();
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(TransportError::Connection(format!(
                "no scripted reply for {}",
                path
            ))),
        }
    }
}
