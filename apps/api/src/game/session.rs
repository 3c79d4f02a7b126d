//! In-memory negotiation sessions.
//!
//! One lock per session ID: the outer map is read-locked only long enough
//! to clone the session handle, and each `tick`/`offer` transform runs
//! under that session's own mutex. This gives the single-logical-owner
//! serialization the engine requires without a global bottleneck. Sessions
//! live only as long as the process; callers persist terminal results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::game::engine::NegotiationState;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: Uuid,
    pub state: NegotiationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameSession {
    pub fn new(state: NegotiationState) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            state,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: GameSession) -> Uuid {
        let id = session.id;
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Removes the session, returning whether it existed. Dropping the map
    /// entry is all "abandoning" a game means; there is nothing else to
    /// release.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locks a shared session, surviving a poisoned mutex (the state inside is
/// always structurally valid; transforms never panic midway).
pub fn lock_session(session: &SharedSession) -> MutexGuard<'_, GameSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
