//! History module - the process-wide log of answered queries

use crate::domain::Domain;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Unique identifier for a history entry based on UUIDv7
///
/// UUIDv7 values sort chronologically, so ids reflect creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u128);

impl EntryId {
    /// Generate a new UUIDv7-based EntryId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One completed query/answer pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Original user text
    pub query: String,

    /// Primary answer text
    pub response: String,

    /// Domain that answered
    pub domain: Domain,

    /// Creation instant
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped now
    pub fn new(query: impl Into<String>, response: impl Into<String>, domain: Domain) -> Self {
        Self {
            id: EntryId::new(),
            query: query.into(),
            response: response.into(),
            domain,
            timestamp: Utc::now(),
        }
    }
}

/// Shared append-only history log
///
/// Cloning yields another handle onto the same log. Entries keep completion
/// order; there is no deduplication, capacity bound or persistence.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl HistoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry
    pub fn append(&self, entry: HistoryEntry) {
        self.lock().push(entry);
    }

    /// All entries in insertion order
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    /// Entries recorded for a single domain
    pub fn by_domain(&self, domain: Domain) -> Vec<HistoryEntry> {
        self.lock()
            .iter()
            .filter(|entry| entry.domain == domain)
            .cloned()
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Destroy every entry, returning how many were removed
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        removed
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: all() returns exactly what was appended, in order
        #[test]
        fn test_all_mirrors_appends(queries in proptest::collection::vec("[a-z ]{0,12}", 0..20)) {
            let store = HistoryStore::new();
            for q in &queries {
                store.append(HistoryEntry::new(q.clone(), "answer", Domain::CodeSection));
            }
            let recorded: Vec<String> = store.all().into_iter().map(|e| e.query).collect();
            prop_assert_eq!(recorded, queries);
        }

        /// Property: clear empties the store regardless of prior content
        #[test]
        fn test_clear_always_empties(n in 0usize..30) {
            let store = HistoryStore::new();
            for i in 0..n {
                store.append(HistoryEntry::new(i.to_string(), "a", Domain::Document));
            }
            prop_assert_eq!(store.clear(), n);
            prop_assert!(store.all().is_empty());
        }
    }
}
