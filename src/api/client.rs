//! Typed HTTP client for the shortening service
//!
//! One method per endpoint of the remote contract. The client owns no
//! session state; authenticated calls take the bearer token explicitly so
//! the session store stays the single source of credentials.
//!
//! Status mapping is uniform across operations:
//!
//! - 2xx: parsed success value (or an acknowledgement for empty bodies)
//! - 401: [`TrimlinkError::Authentication`], which the caller must turn
//!   into a token refresh or a forced logout
//! - other 4xx: [`ApiOutcome::Rejected`] carrying the server's `message`,
//!   surfaced inline without discarding local state
//! - 5xx and malformed bodies: [`TrimlinkError::Api`]
//! - transport failures: [`TrimlinkError::Http`]

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::outcome::ApiOutcome;
use crate::api::types::{
    ApiMessage, LinkResource, LoginRequest, RefreshResponse, RegisterRequest, RegisteredUser,
    ShortenRequest, TokenPair, UpdateLinkRequest, UpdateProfileRequest, UserProfile,
};
use crate::error::{Result, TrimlinkError};

/// Typed wrapper over a shared `reqwest::Client`.
///
/// Cloning is cheap; all clones share the underlying connection pool.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use trimlink::api::ApiClient;
///
/// # async fn example() -> trimlink::error::Result<()> {
/// let http = Arc::new(reqwest::Client::new());
/// let client = ApiClient::new(http, url::Url::parse("https://sho.rt/")?);
/// let links = client.list_links("my-access-token").await?;
/// println!("{} links", links.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<Client>,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// The base URL is normalised to end with a slash so endpoint paths
    /// join below it.
    pub fn new(http: Arc<Client>, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// Builds a shared HTTP client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TrimlinkError::Api`] if client initialization fails.
    pub fn build_http(timeout_seconds: u64) -> Result<Arc<Client>> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("trimlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrimlinkError::Api(format!("failed to create HTTP client: {}", e)))?;
        Ok(Arc::new(client))
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TrimlinkError::Api(format!("invalid endpoint '{}': {}", path, e)).into())
    }

    /// The deterministic static-asset URL of a link's QR code image.
    ///
    /// QR images are generated out of band; this path is valid once the
    /// resource reports `has_qr_code`.
    pub fn qr_code_url(&self, uuid: &str) -> Result<Url> {
        self.endpoint(&format!("qr_codes/{}_qrcode.png", uuid))
    }

    // -----------------------------------------------------------------------
    // Auth endpoints
    // -----------------------------------------------------------------------

    /// `POST /auth/login`: exchanges credentials for a token pair.
    ///
    /// Wrong credentials come back as `Rejected` with the server message;
    /// there is no session yet, so a 401 here is a rejection rather than an
    /// authentication failure.
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiOutcome<TokenPair>> {
        let response = self
            .http
            .post(self.endpoint("auth/login")?)
            .json(request)
            .send()
            .await?;
        Self::outcome_from(response, true).await
    }

    /// `POST /auth/refresh`: exchanges the refresh token for a new access
    /// token. The token is sent as the raw request body, unframed.
    ///
    /// # Errors
    ///
    /// Any non-2xx response is [`TrimlinkError::Authentication`]: the
    /// refresh token is no longer usable and the caller must drop the
    /// session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let response = self
            .http
            .post(self.endpoint("auth/refresh")?)
            .body(refresh_token.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::failure_message(response).await;
            return Err(TrimlinkError::Authentication(format!(
                "token refresh rejected ({}): {}",
                status, message
            ))
            .into());
        }

        Ok(response.json::<RefreshResponse>().await?)
    }

    /// `POST /auth/register`: creates a new account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiOutcome<RegisteredUser>> {
        let response = self
            .http
            .post(self.endpoint("auth/register")?)
            .json(request)
            .send()
            .await?;
        Self::outcome_from(response, true).await
    }

    // -----------------------------------------------------------------------
    // Link endpoints
    // -----------------------------------------------------------------------

    /// `GET /urls/all-urls`: the authoritative full collection.
    pub async fn list_links(&self, token: &str) -> Result<Vec<LinkResource>> {
        let response = self
            .http
            .get(self.endpoint("urls/all-urls")?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Vec<LinkResource>>().await?);
        }

        let message = Self::failure_message(response).await;
        Err(Self::hard_failure(status, message))
    }

    /// `POST /urls/shorten-url`: creates a shortened link.
    pub async fn shorten(
        &self,
        token: &str,
        request: &ShortenRequest,
    ) -> Result<ApiOutcome<LinkResource>> {
        let response = self
            .http
            .post(self.endpoint("urls/shorten-url")?)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        Self::outcome_from(response, false).await
    }

    /// `PUT /urls/{uuid}`: edits a link's title and destination.
    pub async fn update_link(
        &self,
        token: &str,
        uuid: &str,
        request: &UpdateLinkRequest,
    ) -> Result<ApiOutcome<LinkResource>> {
        let response = self
            .http
            .put(self.endpoint(&format!("urls/{}", uuid))?)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        Self::outcome_from(response, false).await
    }

    /// `DELETE /urls/{uuid}`: removes a link. Success is a bare 204.
    pub async fn delete_link(&self, token: &str, uuid: &str) -> Result<ApiOutcome<()>> {
        let response = self
            .http
            .delete(self.endpoint(&format!("urls/{}", uuid))?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(ApiOutcome::Success(()));
        }
        if status == StatusCode::UNAUTHORIZED {
            let message = Self::failure_message(response).await;
            return Err(TrimlinkError::Authentication(message).into());
        }
        if status.is_client_error() {
            return Ok(ApiOutcome::Rejected(Self::failure_message(response).await));
        }
        let message = Self::failure_message(response).await;
        Err(Self::hard_failure(status, message))
    }

    /// `GET /urls/generate-qr-code/{uuid}`: asks the service to generate a
    /// QR code for the link. Fire and forget: the response body (the image)
    /// is discarded and `has_qr_code` only changes on the next reload,
    /// since generation happens out of band.
    pub async fn generate_qr_code(&self, token: &str, uuid: &str) -> Result<()> {
        let response = self
            .http
            .get(self.endpoint(&format!("urls/generate-qr-code/{}", uuid))?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = Self::failure_message(response).await;
        Err(Self::hard_failure(status, message))
    }

    // -----------------------------------------------------------------------
    // Profile endpoints
    // -----------------------------------------------------------------------

    /// `GET /users/profile`: the authenticated user's profile.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.endpoint("users/profile")?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<UserProfile>().await?);
        }
        let message = Self::failure_message(response).await;
        Err(Self::hard_failure(status, message))
    }

    /// `PUT /users/update-profile`: edits name and custom-domain settings.
    pub async fn update_profile(
        &self,
        token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<ApiOutcome<UserProfile>> {
        let response = self
            .http
            .put(self.endpoint("users/update-profile")?)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        Self::outcome_from(response, false).await
    }

    // -----------------------------------------------------------------------
    // Response mapping
    // -----------------------------------------------------------------------

    /// Maps a response to a parsed outcome.
    ///
    /// `unauthenticated` marks endpoints called without a session (login,
    /// register): a 401 from those is a rejection of the submitted form,
    /// not a sign that stored credentials went stale.
    async fn outcome_from<T: DeserializeOwned>(
        response: Response,
        unauthenticated: bool,
    ) -> Result<ApiOutcome<T>> {
        let status = response.status();

        if status.is_success() {
            return Ok(ApiOutcome::Success(response.json::<T>().await?));
        }

        if status == StatusCode::UNAUTHORIZED && !unauthenticated {
            let message = Self::failure_message(response).await;
            return Err(TrimlinkError::Authentication(message).into());
        }

        if status.is_client_error() {
            return Ok(ApiOutcome::Rejected(Self::failure_message(response).await));
        }

        let message = Self::failure_message(response).await;
        Err(Self::hard_failure(status, message))
    }

    /// Extracts the `{ "message": ... }` envelope, falling back to the
    /// status line when the body is empty or not JSON.
    async fn failure_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ApiMessage>().await {
            Ok(envelope) => envelope.message,
            Err(_) => status.to_string(),
        }
    }

    /// Maps a non-rejection failure status to the error taxonomy.
    fn hard_failure(status: StatusCode, message: String) -> anyhow::Error {
        let err = match status {
            StatusCode::UNAUTHORIZED => TrimlinkError::Authentication(message),
            StatusCode::NOT_FOUND => TrimlinkError::NotFound(message),
            _ => TrimlinkError::Api(format!("unexpected status {}: {}", status, message)),
        };
        tracing::warn!("API request failed: {}", err);
        err.into()
    }
}
