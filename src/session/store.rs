//! The persisted session and its store
//!
//! A [`Session`] is the access/refresh token pair identifying an
//! authenticated client. Exactly zero or one session exists per store;
//! absence means unauthenticated. The record is serialized to JSON and
//! handed to a [`SessionBackend`] for persistence.
//!
//! Readers always re-read the backend rather than caching the session
//! locally, so every component observes login, refresh, and logout
//! immediately.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::backend::{KeyringBackend, MemoryBackend, SessionBackend};

/// The access/refresh token pair for an authenticated session.
///
/// Created from a login response, replaced wholesale by a refresh, and
/// destroyed on logout.
///
/// # Examples
///
/// ```
/// use trimlink::session::Session;
///
/// let session = Session {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
/// };
/// let json = serde_json::to_string(&session).unwrap();
/// let restored: Session = serde_json::from_str(&json).unwrap();
/// assert_eq!(restored, session);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Store holding zero or one [`Session`] behind a persistence backend.
pub struct SessionStore {
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    /// Creates a store over an arbitrary backend.
    pub fn new(backend: Box<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Creates a store backed by the OS credential store under the given
    /// service name.
    pub fn keyring(service: &str) -> Self {
        Self::new(Box::new(KeyringBackend::new(service)))
    }

    /// Creates a process-local store, used by tests and environments
    /// without a keyring.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Synchronous read of the persisted session.
    ///
    /// Returns `None` when no session is stored (unauthenticated).
    ///
    /// # Errors
    ///
    /// Propagates backend failures and a corrupt stored record.
    pub fn current(&self) -> Result<Option<Session>> {
        match self.backend.load()? {
            Some(record) => Ok(Some(serde_json::from_str(&record)?)),
            None => Ok(None),
        }
    }

    /// Persists the session, replacing any existing one.
    pub fn save(&self, session: &Session) -> Result<()> {
        let record = serde_json::to_string(session)?;
        self.backend.save(&record)
    }

    /// Destroys the persisted session. Idempotent; subsequent reads report
    /// unauthenticated.
    pub fn clear(&self) -> Result<()> {
        self.backend.clear()
    }

    /// Whether a session is currently persisted.
    ///
    /// Backend failures count as unauthenticated rather than crashing the
    /// caller; the next explicit read will surface the error.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }
}
