//! Session persistence backends
//!
//! The session record is a single JSON string stored under one well-known
//! key. [`KeyringBackend`] puts it in the OS native credential store
//! (Keychain on macOS, Secret Service on Linux, Windows Credential
//! Manager on Windows). [`MemoryBackend`] keeps it for the process
//! lifetime only and exists for tests and throwaway environments.

use std::sync::Mutex;

use crate::error::{Result, TrimlinkError};

/// The key under which the session record is stored, common to all
/// backends.
pub const SESSION_KEY: &str = "session";

/// Storage seam for the persisted session record.
///
/// Implementations hold at most one record; `load` after `clear` returns
/// `None`, and `clear` on an empty store is a no-op.
pub trait SessionBackend: Send + Sync {
    /// Persists the record, replacing any existing one.
    fn save(&self, record: &str) -> Result<()>;

    /// Loads the stored record, or `None` when nothing is stored.
    fn load(&self) -> Result<Option<String>>;

    /// Deletes the stored record. Idempotent.
    fn clear(&self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// KeyringBackend
// ---------------------------------------------------------------------------

/// OS credential store backend.
///
/// The record lives under `<service>` / [`SESSION_KEY`], so multiple
/// configured service names (say, staging and production) keep separate
/// sessions.
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    /// Creates a backend scoped to the given service name.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, SESSION_KEY)
            .map_err(|e| TrimlinkError::SessionStore(e).into())
    }
}

impl SessionBackend for KeyringBackend {
    fn save(&self, record: &str) -> Result<()> {
        self.entry()?
            .set_password(record)
            .map_err(|e| TrimlinkError::SessionStore(e).into())
    }

    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(record) => Ok(Some(record)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TrimlinkError::SessionStore(e).into()),
        }
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(TrimlinkError::SessionStore(e).into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// In-process backend for tests and environments without a keyring.
#[derive(Default)]
pub struct MemoryBackend {
    record: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn save(&self, record: &str) -> Result<()> {
        let mut slot = self
            .record
            .lock()
            .map_err(|_| TrimlinkError::Api("session backend lock poisoned".to_string()))?;
        *slot = Some(record.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        let slot = self
            .record
            .lock()
            .map_err(|_| TrimlinkError::Api("session backend lock poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .record
            .lock()
            .map_err(|_| TrimlinkError::Api("session backend lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
