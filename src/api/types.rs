//! Wire types for the shortening-service HTTP contract
//!
//! Request and response bodies exchanged with the remote API, kept lenient
//! on deserialization (`#[serde(default)]`) where the server is known to
//! omit fields, so one missing key never takes down a whole list response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Link resources
// ---------------------------------------------------------------------------

/// A shortened-URL record owned by the authenticated user.
///
/// `uuid` is server-assigned and immutable; `clicks`, `referrer` and the
/// timestamps are recomputed server-side on every mutation, which is why the
/// client reloads the collection instead of patching entries locally.
///
/// The referrer map is held as a `BTreeMap` so its traversal order is
/// deterministic; ranking ties in the analytics view inherit that order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkResource {
    /// Server-assigned unique identifier; doubles as the short-URL slug.
    pub uuid: String,

    /// User-supplied display title (at most 20 characters).
    #[serde(default)]
    pub title: String,

    /// The destination URL (at most 999 characters).
    pub long_url: String,

    /// The fully-qualified shortened URL.
    #[serde(default)]
    pub short_url: String,

    /// Total click count.
    #[serde(default)]
    pub clicks: u64,

    /// Click counts grouped by originating source label.
    #[serde(default)]
    pub referrer: BTreeMap<String, u64>,

    /// Whether a QR code has been generated for this link.
    #[serde(default)]
    pub has_qr_code: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LinkResource {
    /// Returns the referrer map as a sequence of `(label, count)` pairs in
    /// the map's traversal order, ready for ranking.
    pub fn referrer_entries(&self) -> Vec<(String, u64)> {
        self.referrer
            .iter()
            .map(|(label, count)| (label.clone(), *count))
            .collect()
    }
}

/// Body of `POST /urls/shorten-url`.
#[derive(Debug, Clone, Serialize)]
pub struct ShortenRequest {
    pub url: String,
    pub title: String,
}

/// Body of `PUT /urls/{uuid}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateLinkRequest {
    pub url: String,
    pub title: String,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Successful login response: the token pair that becomes the session.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,

    #[serde(default)]
    pub token_type: Option<String>,
}

/// Successful refresh response.
///
/// The server rotates the access token on refresh but may keep the refresh
/// token unchanged, in which case the field is absent and the stored one
/// stays in effect.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub email: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// User profile
// ---------------------------------------------------------------------------

/// Response of `GET /users/profile` and `PUT /users/update-profile`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub custom_domain: Option<String>,
}

/// Body of `PUT /users/update-profile`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub firstname: String,
    pub lastname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,

    pub remove_custom_domain: bool,
}

// ---------------------------------------------------------------------------
// Failure envelope
// ---------------------------------------------------------------------------

/// The server's failure envelope: every rejected request carries a single
/// human-readable `message` field.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_resource_deserializes_full_object() {
        let body = json!({
            "uuid": "Ab3dEf",
            "title": "My blog",
            "long_url": "https://example.com/a/very/long/path",
            "short_url": "https://sho.rt/Ab3dEf",
            "clicks": 42,
            "referrer": {"Unknowns": 12, "twitter": 30},
            "has_qr_code": true,
            "created_at": "2024-03-01T09:30:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        });

        let link: LinkResource = serde_json::from_value(body).expect("deserialize");
        assert_eq!(link.uuid, "Ab3dEf");
        assert_eq!(link.clicks, 42);
        assert_eq!(link.referrer.get("twitter"), Some(&30));
        assert!(link.has_qr_code);
        assert!(link.created_at.is_some());
    }

    #[test]
    fn test_link_resource_tolerates_missing_optional_fields() {
        let body = json!({
            "uuid": "Ab3dEf",
            "long_url": "https://example.com"
        });

        let link: LinkResource = serde_json::from_value(body).expect("deserialize");
        assert_eq!(link.title, "");
        assert_eq!(link.clicks, 0);
        assert!(link.referrer.is_empty());
        assert!(!link.has_qr_code);
        assert!(link.created_at.is_none());
    }

    #[test]
    fn test_referrer_entries_follow_map_order() {
        let body = json!({
            "uuid": "x",
            "long_url": "https://example.com",
            "referrer": {"qr": 1, "direct": 5, "twitter": 3}
        });
        let link: LinkResource = serde_json::from_value(body).expect("deserialize");

        // BTreeMap traversal is key order, so the sequence is deterministic.
        let entries = link.referrer_entries();
        assert_eq!(
            entries,
            vec![
                ("direct".to_string(), 5),
                ("qr".to_string(), 1),
                ("twitter".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_refresh_response_without_rotated_refresh_token() {
        let body = json!({"access_token": "new-access"});
        let parsed: RefreshResponse = serde_json::from_value(body).expect("deserialize");
        assert_eq!(parsed.access_token, "new-access");
        assert!(parsed.refresh_token.is_none());
    }

    #[test]
    fn test_update_profile_request_omits_absent_custom_domain() {
        let request = UpdateProfileRequest {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            custom_domain: None,
            remove_custom_domain: false,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value.get("custom_domain").is_none());
        assert_eq!(value["remove_custom_domain"], json!(false));
    }
}
