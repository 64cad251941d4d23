//! Session storage and management.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::{SessionData, SessionId, SessionInitializer, SessionKey};
use crate::error::WuiError;
use crate::Result;

/// A user's browsing session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier.
    pub id: SessionId,
    /// Stored key-value state.
    pub data: SessionData,
    /// Time when session was created.
    pub created_at: Instant,
    /// Time of last activity.
    pub last_activity: Instant,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        let now = Instant::now();
        Self {
            id,
            data: SessionData::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Thread-safe storage for sessions.
///
/// Each session is only ever mutated under the write lock, so two requests
/// can never seed or update the same session concurrently.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new, empty session and return its ID.
    pub fn create(&self) -> Result<SessionId> {
        let id = SessionId::allocate();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WuiError::LockPoisoned)?;

        sessions.insert(id, Session::new(id));
        Ok(id)
    }

    /// Get a clone of the session with the given ID.
    pub fn get(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WuiError::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    pub fn contains(&self, id: &SessionId) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WuiError::LockPoisoned)?;
        Ok(sessions.contains_key(id))
    }

    /// Run a closure against a session under the write lock.
    ///
    /// Returns the closure's result, or `SessionNotFound` if the ID is unknown.
    pub fn update<F, T>(&self, id: &SessionId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WuiError::LockPoisoned)?;

        let session = sessions
            .get_mut(id)
            .ok_or_else(|| WuiError::SessionNotFound(id.to_string()))?;

        Ok(f(session))
    }

    /// Touch a session and seed its missing defaults.
    ///
    /// Returns the keys that were populated.
    pub fn ensure_defaults(
        &self,
        id: &SessionId,
        initializer: &SessionInitializer<'_>,
    ) -> Result<Vec<SessionKey>> {
        self.update(id, |session| {
            session.touch();
            initializer.ensure_defaults(&mut session.data)
        })?
    }

    /// Remove a session, returning it if it existed.
    pub fn remove(&self, id: &SessionId) -> Result<Option<Session>> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WuiError::LockPoisoned)?;
        Ok(sessions.remove(id))
    }

    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn list_ids(&self) -> Result<Vec<SessionId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| WuiError::LockPoisoned)?;
        let mut ids: Vec<_> = sessions.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    /// Remove all sessions matching a predicate, returning how many were removed.
    pub fn remove_matching<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Session) -> bool,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| WuiError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, session| !predicate(session));
        Ok(before - sessions.len())
    }

    /// Drop sessions idle for longer than `max_idle`.
    pub fn expire_idle(&self, max_idle: Duration) -> Result<usize> {
        let removed = self.remove_matching(|s| s.idle_duration() > max_idle)?;
        if removed > 0 {
            tracing::debug!(removed, "expired idle sessions");
        }
        Ok(removed)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
