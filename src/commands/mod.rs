//! Command handlers for the CLI
//!
//! This module provides command handlers invoked by the CLI entrypoint.
//!
//! It exposes three top-level command modules:
//!
//! - `auth`: Login, logout and registration
//! - `links`: Listing, shortening, the interactive detail view, delete
//!   and QR generation
//! - `profile`: Viewing and editing the user profile
//!
//! These handlers are intentionally small and use the library components:
//! the API client, the session manager, the link cache, and the dialog
//! controller.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{self, Result};
use crate::session::{SessionManager, SessionStore};

pub mod auth;
pub mod links;
pub mod profile;

/// Shared wiring handed to every command handler.
pub struct AppContext {
    pub client: ApiClient,
    pub session: Arc<SessionManager>,
}

/// Builds the client and session manager from validated configuration.
pub fn build_context(config: &Config) -> Result<AppContext> {
    let http = ApiClient::build_http(config.api.timeout_seconds)?;
    let client = ApiClient::new(http, config.parsed_base_url()?);

    let store = match config.session.backend.as_str() {
        "memory" => SessionStore::in_memory(),
        _ => SessionStore::keyring(&config.session.service),
    };
    let session = Arc::new(SessionManager::new(client.clone(), store));

    Ok(AppContext { client, session })
}

/// Turns an authentication failure into a login hint instead of a stack
/// trace.
///
/// By the time this fires the silent refresh has already been attempted
/// and the stored session cleared, so telling the user to log in again is
/// accurate. Any other error propagates unchanged.
pub fn or_login_hint<T>(result: Result<T>) -> Result<Option<T>> {
    use colored::Colorize;

    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if error::is_authentication(&err) => {
            tracing::debug!("authentication failure surfaced to user: {}", err);
            eprintln!(
                "{}",
                "Not logged in (or the session expired). Run `trimlink login` first.".yellow()
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
