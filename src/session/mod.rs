//! Authenticated session: persistence and lifecycle
//!
//! - `backend`: storage seam (OS keyring, in-memory)
//! - `store`: the persisted token pair and its store
//! - `manager`: login/logout/refresh coordination and bearer supply

pub mod backend;
pub mod manager;
pub mod store;

pub use backend::{KeyringBackend, MemoryBackend, SessionBackend};
pub use manager::{Credentials, SessionManager};
pub use store::{Session, SessionStore};
