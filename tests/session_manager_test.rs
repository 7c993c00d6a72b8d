//! Session lifecycle integration tests using wiremock
//!
//! Verifies login persistence, rejected logins, token refresh (including
//! the forced logout on a rejected refresh), and the retry-once behavior
//! of authorized calls.

mod common;

use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{logged_in_manager, make_manager, ACCESS_TOKEN, REFRESH_TOKEN};
use trimlink::session::Credentials;

fn credentials() -> Credentials {
    Credentials {
        username_or_email: "ada".to_string(),
        password: "hunter2".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_persists_the_returned_token_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "username_or_email": "ada",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access",
            "refresh_token": "fresh-refresh",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = make_manager(&server.uri());
    let outcome = manager.login(&credentials()).await.expect("login");
    assert!(outcome.is_success(), "login should succeed");

    let stored = manager
        .store()
        .current()
        .expect("read store")
        .expect("session persisted");
    assert_eq!(stored.access_token, "fresh-access");
    assert_eq!(stored.refresh_token, "fresh-refresh");
}

#[tokio::test]
async fn test_rejected_login_leaves_the_store_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Incorrect username or password"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = make_manager(&server.uri());
    let outcome = manager.login(&credentials()).await.expect("login call");

    assert_eq!(
        outcome.rejection_message(),
        Some("Incorrect username or password")
    );
    assert!(
        !manager.store().is_authenticated(),
        "a rejected login must not create a session"
    );
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_refresh_rotates_access_token_and_keeps_refresh_token() {
    let server = MockServer::start().await;

    // The refresh token travels as the raw request body.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_string(REFRESH_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "rotated-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = logged_in_manager(&server.uri(), ACCESS_TOKEN, REFRESH_TOKEN);
    let session = manager.refresh().await.expect("refresh");

    assert_eq!(session.access_token, "rotated-access");
    // The server omitted a rotated refresh token, so the stored one stays.
    assert_eq!(session.refresh_token, REFRESH_TOKEN);

    let stored = manager
        .store()
        .current()
        .expect("read store")
        .expect("session still present");
    assert_eq!(stored.access_token, "rotated-access");
}

#[tokio::test]
async fn test_rejected_refresh_clears_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = logged_in_manager(&server.uri(), ACCESS_TOKEN, "spent-refresh");
    let err = manager.refresh().await.expect_err("refresh must fail");

    assert!(trimlink::error::is_authentication(&err));
    assert!(
        !manager.store().is_authenticated(),
        "a rejected refresh must log the user out"
    );
}

#[tokio::test]
async fn test_failed_refresh_clears_the_session_even_without_a_server() {
    // Nothing listens on this port, so the refresh dies in transport. The
    // session must still end up cleared: refresh only runs once the access
    // token has been rejected, so the stored pair is unusable either way.
    let manager = logged_in_manager("http://127.0.0.1:9", ACCESS_TOKEN, REFRESH_TOKEN);

    let err = manager.refresh().await.expect_err("refresh must fail");
    assert!(!trimlink::error::is_authentication(&err));
    assert!(
        !manager.store().is_authenticated(),
        "any refresh failure must leave the client logged out"
    );
}

// ---------------------------------------------------------------------------
// Authorized calls: silent refresh and retry-once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_authorized_call_retries_once_after_silent_refresh() {
    let server = MockServer::start().await;

    // The stale token is rejected...
    Mock::given(method("GET"))
        .and(path("/urls/all-urls"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // ...the refresh succeeds...
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_string(REFRESH_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // ...and the retried call carries the fresh token.
    Mock::given(method("GET"))
        .and(path("/urls/all-urls"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([common::link_json("Ab3dEf", "Docs", 3)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manager = logged_in_manager(&server.uri(), "stale-access", REFRESH_TOKEN);
    let client = common::make_client(&server.uri());

    let links = manager
        .authorized(|token| {
            let client = client.clone();
            async move { client.list_links(&token).await }
        })
        .await
        .expect("authorized call");

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].uuid, "Ab3dEf");
}

#[tokio::test]
async fn test_authorized_call_gives_up_when_the_refresh_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/urls/all-urls"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = logged_in_manager(&server.uri(), "stale-access", "spent-refresh");
    let client = common::make_client(&server.uri());

    let err = manager
        .authorized(|token| {
            let client = client.clone();
            async move { client.list_links(&token).await }
        })
        .await
        .expect_err("must fail");

    assert!(trimlink::error::is_authentication(&err));
    // The cascade ends in a clean logout, not a retry loop.
    assert!(!manager.store().is_authenticated());
}
