//! Detail projection: one link resource as an editable form
//!
//! Bridges a cached [`LinkResource`] snapshot into the two fields the user
//! may edit. Read-only fields (clicks, timestamps, referrer, short URL)
//! are displayed straight from the snapshot and never pass through the
//! form.

use url::Url;

use crate::api::types::{LinkResource, UpdateLinkRequest};

/// Maximum title length accepted by the service.
pub const MAX_TITLE_LEN: usize = 20;

/// Maximum destination-URL length accepted by the service.
pub const MAX_URL_LEN: usize = 999;

/// The editable form backing a link's detail dialog.
///
/// Valid only while the dialog views the resource with the same `uuid`;
/// switching targets re-projects a fresh form so stale field values from a
/// previously viewed resource can never leak into a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkForm {
    /// Identifier of the resource this form was projected from.
    pub uuid: String,

    pub title: String,
    pub long_url: String,
}

impl LinkForm {
    /// Projects a resource's editable fields into a fresh form.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimlink::api::types::LinkResource;
    /// use trimlink::links::detail::LinkForm;
    ///
    /// let resource: LinkResource = serde_json::from_value(serde_json::json!({
    ///     "uuid": "Ab3dEf",
    ///     "title": "My blog",
    ///     "long_url": "https://example.com"
    /// }))
    /// .unwrap();
    ///
    /// let form = LinkForm::project(&resource);
    /// assert_eq!(form.title, "My blog");
    /// assert_eq!(form.long_url, "https://example.com");
    /// ```
    pub fn project(resource: &LinkResource) -> Self {
        Self {
            uuid: resource.uuid.clone(),
            title: resource.title.clone(),
            long_url: resource.long_url.clone(),
        }
    }

    /// Whether this form was projected from the given resource.
    pub fn targets(&self, uuid: &str) -> bool {
        self.uuid == uuid
    }

    /// Client-side validation mirroring the service's form rules.
    ///
    /// Returns the message to surface inline when a field is rejected, so
    /// an obviously invalid edit never reaches the network.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(format!(
                "Title cannot be more than {} characters",
                MAX_TITLE_LEN
            ));
        }
        if self.long_url.trim().is_empty() {
            return Err("URL is required".to_string());
        }
        if self.long_url.chars().count() > MAX_URL_LEN {
            return Err(format!("URL cannot be more than {} characters", MAX_URL_LEN));
        }
        if Url::parse(&self.long_url).is_err() {
            return Err("A valid URL is required".to_string());
        }
        Ok(())
    }

    /// The request body for submitting this form.
    pub fn to_update_request(&self) -> UpdateLinkRequest {
        UpdateLinkRequest {
            url: self.long_url.clone(),
            title: self.title.clone(),
        }
    }
}
