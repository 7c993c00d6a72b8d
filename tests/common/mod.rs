//! Shared helpers for integration tests
//!
//! Builds clients and session managers against a wiremock server, with an
//! in-memory session backend so no test touches the OS keyring.

use std::sync::Arc;

use trimlink::api::ApiClient;
use trimlink::links::LinkCache;
use trimlink::session::{Session, SessionManager, SessionStore};

/// Access token the helpers store by default.
#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "valid-access";

/// Refresh token the helpers store by default.
#[allow(dead_code)]
pub const REFRESH_TOKEN: &str = "valid-refresh";

/// Builds an [`ApiClient`] pointed at the given mock server URI.
#[allow(dead_code)]
pub fn make_client(base_url: &str) -> ApiClient {
    ApiClient::new(
        Arc::new(reqwest::Client::new()),
        url::Url::parse(base_url).expect("valid mock server URL"),
    )
}

/// Builds a session manager over an in-memory store with no session.
#[allow(dead_code)]
pub fn make_manager(base_url: &str) -> Arc<SessionManager> {
    Arc::new(SessionManager::new(
        make_client(base_url),
        SessionStore::in_memory(),
    ))
}

/// Builds a session manager whose store already holds a session.
#[allow(dead_code)]
pub fn logged_in_manager(base_url: &str, access: &str, refresh: &str) -> Arc<SessionManager> {
    let manager = make_manager(base_url);
    manager
        .store()
        .save(&Session {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        })
        .expect("seed session");
    manager
}

/// Builds a cache wired to a logged-in session manager.
#[allow(dead_code)]
pub fn make_cache(base_url: &str) -> LinkCache {
    let session = logged_in_manager(base_url, ACCESS_TOKEN, REFRESH_TOKEN);
    LinkCache::new(make_client(base_url), session)
}

/// A link resource body as the list endpoint returns it.
#[allow(dead_code)]
pub fn link_json(uuid: &str, title: &str, clicks: u64) -> serde_json::Value {
    serde_json::json!({
        "uuid": uuid,
        "title": title,
        "long_url": format!("https://example.com/{uuid}"),
        "short_url": format!("https://sho.rt/{uuid}"),
        "clicks": clicks,
        "referrer": {},
        "has_qr_code": false
    })
}
