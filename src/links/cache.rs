//! Session-scoped cache of the user's link resources
//!
//! The remote collection is authoritative: clicks, referrer counts and
//! timestamps are recomputed server-side, so every structural mutation or
//! field update is followed by a wholesale reload rather than a local
//! patch. The cache never merges a response with stale data; whichever
//! reload resolves last wins outright.

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::types::{LinkResource, ShortenRequest, UpdateLinkRequest};
use crate::api::{ApiClient, ApiOutcome};
use crate::error::Result;
use crate::session::SessionManager;

/// In-memory snapshot of the authenticated user's links.
///
/// Bearer credentials are re-read from the session manager on every call;
/// the cache never holds a token of its own. On any request failure the
/// last-known-good snapshot is retained and the error is surfaced to the
/// caller instead of crashing the view.
///
/// Invariant: no two cached entries share a `uuid`.
pub struct LinkCache {
    client: ApiClient,
    session: Arc<SessionManager>,
    links: Vec<LinkResource>,
    generation: u64,
}

impl LinkCache {
    /// Creates an empty cache. Call [`reload`](Self::reload) once after
    /// construction to populate it.
    pub fn new(client: ApiClient, session: Arc<SessionManager>) -> Self {
        Self {
            client,
            session,
            links: Vec::new(),
            generation: 0,
        }
    }

    /// Fetches the full collection, replacing the cache wholesale.
    ///
    /// Runs once on startup and again after every mutation. On failure the
    /// previous snapshot is kept and the error propagates; an
    /// authentication failure means the silent refresh already gave up and
    /// the caller must fall back to the login flow.
    pub async fn reload(&mut self) -> Result<()> {
        let client = &self.client;
        let fetched = self
            .session
            .authorized(|token| async move { client.list_links(&token).await })
            .await;

        match fetched {
            Ok(list) => {
                self.links = dedupe_by_uuid(list);
                self.generation += 1;
                tracing::debug!(
                    "cache reloaded: {} links (generation {})",
                    self.links.len(),
                    self.generation
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!("reload failed, keeping last-known-good snapshot: {}", err);
                Err(err)
            }
        }
    }

    /// Creates a shortened link, then reloads.
    ///
    /// A rejection (invalid URL, missing title) leaves the cache untouched
    /// and carries the server's message.
    pub async fn shorten(
        &mut self,
        url: &str,
        title: &str,
    ) -> Result<ApiOutcome<LinkResource>> {
        let request = ShortenRequest {
            url: url.to_string(),
            title: title.to_string(),
        };
        let client = &self.client;
        // Borrow so the retried closure can reuse the request.
        let request = &request;
        let outcome = self
            .session
            .authorized(|token| async move { client.shorten(&token, request).await })
            .await?;

        if outcome.is_success() {
            self.reload().await?;
        }
        Ok(outcome)
    }

    /// Submits a partial edit, then reloads on success so the view picks
    /// up server-recomputed fields.
    ///
    /// A rejection leaves the cache untouched; the caller keeps the dialog
    /// open with the message so the user can correct the input.
    pub async fn update(
        &mut self,
        uuid: &str,
        request: &UpdateLinkRequest,
    ) -> Result<ApiOutcome<LinkResource>> {
        let client = &self.client;
        let outcome = self
            .session
            .authorized(|token| async move { client.update_link(&token, uuid, request).await })
            .await?;

        if outcome.is_success() {
            self.reload().await?;
        }
        Ok(outcome)
    }

    /// Deletes a link (acked by an empty 204), then reloads.
    pub async fn delete(&mut self, uuid: &str) -> Result<ApiOutcome<()>> {
        let client = &self.client;
        let outcome = self
            .session
            .authorized(|token| async move { client.delete_link(&token, uuid).await })
            .await?;

        if outcome.is_success() {
            self.reload().await?;
        }
        Ok(outcome)
    }

    /// Asks the service to generate a QR code for the link.
    ///
    /// Fire and forget: `has_qr_code` is NOT flipped locally, because
    /// generation happens out of band; observers reload to see the new
    /// state.
    pub async fn request_qr_code(&self, uuid: &str) -> Result<()> {
        let client = &self.client;
        self.session
            .authorized(|token| async move { client.generate_qr_code(&token, uuid).await })
            .await
    }

    /// The current snapshot, in server order.
    pub fn links(&self) -> &[LinkResource] {
        &self.links
    }

    /// Looks up a cached resource by identifier.
    pub fn get(&self, uuid: &str) -> Option<&LinkResource> {
        self.links.iter().find(|link| link.uuid == uuid)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of reloads applied so far; observable ordering for tests.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The API client, for derived URLs (QR assets).
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Replaces the snapshot directly, bypassing the network.
    #[cfg(test)]
    pub(crate) fn seed(&mut self, links: Vec<LinkResource>) {
        self.links = dedupe_by_uuid(links);
        self.generation += 1;
    }
}

/// Drops later duplicates so the uuid uniqueness invariant holds even when
/// the server misbehaves.
fn dedupe_by_uuid(list: Vec<LinkResource>) -> Vec<LinkResource> {
    let mut seen = HashSet::with_capacity(list.len());
    let mut links = Vec::with_capacity(list.len());
    for link in list {
        if seen.insert(link.uuid.clone()) {
            links.push(link);
        } else {
            tracing::warn!("dropping duplicate resource '{}' from list response", link.uuid);
        }
    }
    links
}
