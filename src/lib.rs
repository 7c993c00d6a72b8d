//! Trimlink - URL shortening service client library
//!
//! This library provides the client-side functionality for the Trimlink
//! CLI: typed API access, session persistence with silent token refresh,
//! a link-resource cache, and the interactive detail/delete dialog flow.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Typed HTTP client, request/response types, and the
//!   success-or-rejected outcome type
//! - `session`: Token persistence (keyring or in-memory) and lifecycle
//!   coordination (login, logout, silent refresh)
//! - `links`: The link cache, detail form, referrer analytics, and the
//!   dialog state machine
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use trimlink::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(std::path::Path::new("config.yaml"))?;
//!     config.validate()?;
//!
//!     // Client usage would go here
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod links;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, ApiOutcome};
pub use config::Config;
pub use error::{Result, TrimlinkError};
pub use links::{DialogController, DialogState, LinkCache, LinkForm};
pub use session::{Credentials, SessionManager, SessionStore};
