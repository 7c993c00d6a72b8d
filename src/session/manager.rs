//! Session lifecycle coordination
//!
//! [`SessionManager`] is the single entry point for everything that touches
//! the persisted session: login, registration, logout, silent token
//! refresh, and supplying the bearer credential to authenticated calls.
//!
//! All writers funnel through `login`/`logout`/`refresh`; readers re-read
//! the store on every call instead of caching the token, so there is one
//! writer per mutation and no stale local copies.

use crate::api::types::{LoginRequest, RegisterRequest, RegisteredUser};
use crate::api::{ApiClient, ApiOutcome};
use crate::error::{self, Result, TrimlinkError};
use crate::session::store::{Session, SessionStore};

/// Login credentials as the user supplies them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username_or_email: String,
    pub password: String,
}

/// Owns the API client's auth endpoints and the [`SessionStore`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use trimlink::api::ApiClient;
/// use trimlink::session::{Credentials, SessionManager, SessionStore};
///
/// # async fn example() -> trimlink::error::Result<()> {
/// let client = ApiClient::new(
///     Arc::new(reqwest::Client::new()),
///     url::Url::parse("https://sho.rt/")?,
/// );
/// let manager = SessionManager::new(client, SessionStore::keyring("trimlink"));
///
/// let outcome = manager
///     .login(&Credentials {
///         username_or_email: "ada".to_string(),
///         password: "hunter2".to_string(),
///     })
///     .await?;
/// if outcome.is_success() {
///     println!("logged in");
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    client: ApiClient,
    store: SessionStore,
}

impl SessionManager {
    /// Creates a manager over the given client and store.
    pub fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Submits credentials and persists the returned session on success.
    ///
    /// A rejection (wrong credentials, validation failure) leaves the
    /// stored state untouched and carries the server's message for inline
    /// display.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiOutcome<Session>> {
        let request = LoginRequest {
            username_or_email: credentials.username_or_email.clone(),
            password: credentials.password.clone(),
        };

        let outcome = self.client.login(&request).await?;
        match outcome {
            ApiOutcome::Success(pair) => {
                let session = Session {
                    access_token: pair.access_token,
                    refresh_token: pair.refresh_token,
                };
                self.store.save(&session)?;
                tracing::info!("login succeeded, session persisted");
                Ok(ApiOutcome::Success(session))
            }
            ApiOutcome::Rejected(message) => {
                tracing::debug!("login rejected: {}", message);
                Ok(ApiOutcome::Rejected(message))
            }
        }
    }

    /// Creates a new account. Does not log in; the caller follows up with
    /// [`login`](Self::login) once registration succeeds.
    pub async fn register(&self, form: &RegisterRequest) -> Result<ApiOutcome<RegisteredUser>> {
        self.client.register(form).await
    }

    /// Destroys the persisted session synchronously. Idempotent.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Exchanges the stored refresh token for a fresh session and persists
    /// it.
    ///
    /// When the server omits a rotated refresh token the stored one is
    /// kept. Any refresh failure clears the session: refresh only runs once
    /// an access token has already been rejected, so whatever is stored is
    /// unusable and the caller ends up cleanly logged out.
    pub async fn refresh(&self) -> Result<Session> {
        let current = self.store.current()?.ok_or_else(|| {
            TrimlinkError::Authentication("no active session to refresh".to_string())
        })?;

        match self.client.refresh(&current.refresh_token).await {
            Ok(response) => {
                let session = Session {
                    access_token: response.access_token,
                    refresh_token: response
                        .refresh_token
                        .unwrap_or(current.refresh_token),
                };
                self.store.save(&session)?;
                tracing::debug!("session refreshed");
                Ok(session)
            }
            Err(err) => {
                tracing::warn!("session refresh failed, clearing stored session: {}", err);
                self.store.clear()?;
                Err(err)
            }
        }
    }

    /// Returns the current access token.
    ///
    /// # Errors
    ///
    /// Returns [`TrimlinkError::Authentication`] when no session exists;
    /// callers must not issue an authenticated request in that case and
    /// should direct the user to log in instead.
    pub fn bearer_token(&self) -> Result<String> {
        match self.store.current()? {
            Some(session) => Ok(session.access_token),
            None => Err(TrimlinkError::Authentication(
                "not logged in".to_string(),
            )
            .into()),
        }
    }

    /// Runs an authenticated operation, transparently refreshing the
    /// session once when the access token is rejected.
    ///
    /// The operation receives the bearer token and is retried exactly once
    /// after a successful refresh. If the refresh itself fails the session
    /// has already been cleared and the authentication error propagates,
    /// cascading into the caller's forced-logout path.
    pub async fn authorized<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let token = self.bearer_token()?;
        match op(token).await {
            Err(err) if error::is_authentication(&err) => {
                tracing::debug!("access token rejected, attempting silent refresh");
                let session = self.refresh().await?;
                op(session.access_token).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use url::Url;

    fn make_manager() -> SessionManager {
        let client = ApiClient::new(
            Arc::new(reqwest::Client::new()),
            Url::parse("http://localhost:9").expect("valid url"),
        );
        SessionManager::new(client, SessionStore::in_memory())
    }

    #[test]
    fn test_bearer_token_errors_when_unauthenticated() {
        let manager = make_manager();
        let err = manager.bearer_token().unwrap_err();
        assert!(error::is_authentication(&err));
    }

    #[test]
    fn test_bearer_token_reads_stored_session() {
        let manager = make_manager();
        manager
            .store()
            .save(&Session {
                access_token: "stored-access".to_string(),
                refresh_token: "stored-refresh".to_string(),
            })
            .expect("save");

        assert_eq!(manager.bearer_token().expect("token"), "stored-access");
    }

    #[test]
    fn test_logout_is_idempotent() {
        let manager = make_manager();
        manager.logout().expect("logout with no session");

        manager
            .store()
            .save(&Session {
                access_token: "a".to_string(),
                refresh_token: "r".to_string(),
            })
            .expect("save");
        manager.logout().expect("logout");
        assert!(!manager.store().is_authenticated());
        manager.logout().expect("logout again");
    }

    #[tokio::test]
    async fn test_refresh_without_session_is_an_auth_error() {
        let manager = make_manager();
        let err = manager.refresh().await.unwrap_err();
        assert!(error::is_authentication(&err));
    }

    #[tokio::test]
    async fn test_authorized_fails_fast_when_unauthenticated() {
        // The operation must not run at all without a session.
        let manager = make_manager();
        let result: Result<()> = manager
            .authorized(|_token| async move {
                panic!("operation must not execute without a session")
            })
            .await;
        assert!(error::is_authentication(&result.unwrap_err()));
    }
}
