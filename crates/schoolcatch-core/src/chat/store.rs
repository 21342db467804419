//! Session store: session identifier -> turn history.
//!
//! Each session's history sits behind its own `tokio::sync::Mutex`. The RAG
//! chain holds that lock for a whole interaction, so turns of one session are
//! written by a single writer at a time while different sessions never
//! contend with each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use schoolcatch_types::chat::{SessionHistory, SessionId};

/// Shared, lockable history of one session.
pub type SessionHandle = Arc<Mutex<SessionHistory>>;

/// Mapping from session identifier to its history.
pub trait SessionStore: Send + Sync {
    /// Return the session's history, creating an empty one for an unseen id.
    ///
    /// Never fails. Two calls with the same id return the same handle.
    fn get_or_create(&self, id: &SessionId) -> SessionHandle;

    /// The session's history if it exists. Never creates one.
    fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Number of sessions created so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime, in-memory session store. No persistence, no eviction.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.sessions.get(id) {
            return Arc::clone(handle.value());
        }
        // entry() re-checks under the shard lock, so racing creators agree on one handle.
        let handle = self.sessions.entry(id.clone()).or_insert_with(|| {
            debug!(session_id = %id, "Creating chat session");
            Arc::new(Mutex::new(SessionHistory::new()))
        });
        Arc::clone(handle.value())
    }

    fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.get(id).map(|handle| Arc::clone(handle.value()))
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
