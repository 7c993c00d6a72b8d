//! Dialog state machine for viewing and mutating a single link
//!
//! Coordinates which dialog is active (detail/edit or delete
//! confirmation) and routes user actions (save, delete, regenerate QR)
//! to the [`LinkCache`]. Exactly one state is active at a time:
//!
//! ```text
//!            open_detail(uuid)                request_delete
//!  Closed ---------------------> Viewing(uuid) --------------> ConfirmingDelete(uuid)
//!    ^        save (success)         |                              |
//!    +-------------------------------+        cancel / confirm      |
//!    +--------------------------------------------------------------+
//! ```
//!
//! Failed saves and failed deletes keep their state and attach the server
//! message inline; `cancel` from the confirmation always lands on
//! `Closed`, never back on the detail view.

use crate::api::ApiOutcome;
use crate::error::Result;
use crate::links::cache::LinkCache;
use crate::links::detail::LinkForm;

/// Which dialog is currently visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// No dialog is open. Initial state; also the state after logout.
    Closed,

    /// The detail/edit dialog for the identified resource.
    Viewing(String),

    /// The delete confirmation for the identified resource.
    ConfirmingDelete(String),
}

impl DialogState {
    /// The uuid the dialog is about, when one is open.
    pub fn target(&self) -> Option<&str> {
        match self {
            DialogState::Closed => None,
            DialogState::Viewing(uuid) | DialogState::ConfirmingDelete(uuid) => Some(uuid),
        }
    }
}

/// State machine driving the detail and delete-confirmation dialogs.
///
/// Lives for the duration of an interactive session; there is no terminal
/// state. The form is only populated while a resource is being viewed,
/// and always re-projected when the target changes.
pub struct DialogController {
    state: DialogState,
    form: Option<LinkForm>,
    error: Option<String>,
}

impl Default for DialogController {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogController {
    /// Creates a controller in the `Closed` state.
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            form: None,
            error: None,
        }
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// The editable form, populated while a resource is being viewed.
    pub fn form(&self) -> Option<&LinkForm> {
        self.form.as_ref()
    }

    /// The inline error message attached to the current dialog, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismisses the inline error without touching the dialog state.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Opens the detail dialog for a cached resource, projecting a fresh
    /// form from its snapshot.
    ///
    /// Re-projection happens even when the same uuid is reopened, so the
    /// form always reflects the latest cached snapshot and never keeps
    /// stale values from a previously viewed resource.
    ///
    /// Returns `false` (and closes with an inline error) when the uuid is
    /// not in the cache.
    pub fn open_detail(&mut self, cache: &LinkCache, uuid: &str) -> bool {
        match cache.get(uuid) {
            Some(resource) => {
                self.state = DialogState::Viewing(uuid.to_string());
                self.form = Some(LinkForm::project(resource));
                self.error = None;
                true
            }
            None => {
                tracing::debug!("open_detail: '{}' not in cache", uuid);
                self.close();
                self.error = Some(format!("no link with id '{}'", uuid));
                false
            }
        }
    }

    /// Edits the form's title. Only meaningful while viewing.
    pub fn edit_title(&mut self, title: &str) -> bool {
        match (&self.state, self.form.as_mut()) {
            (DialogState::Viewing(_), Some(form)) => {
                form.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    /// Edits the form's destination URL. Only meaningful while viewing.
    pub fn edit_long_url(&mut self, long_url: &str) -> bool {
        match (&self.state, self.form.as_mut()) {
            (DialogState::Viewing(_), Some(form)) => {
                form.long_url = long_url.to_string();
                true
            }
            _ => false,
        }
    }

    /// Submits the edited form.
    ///
    /// On success the dialog closes and the cache has already reloaded.
    /// On rejection the dialog stays open (`Viewing` unchanged) with the
    /// server's message attached and the cache untouched, so the user can
    /// correct the input without losing other field state.
    ///
    /// Returns `true` when the save went through.
    pub async fn save(&mut self, cache: &mut LinkCache) -> Result<bool> {
        let (uuid, form) = match (&self.state, &self.form) {
            (DialogState::Viewing(uuid), Some(form)) if form.targets(uuid) => {
                (uuid.clone(), form.clone())
            }
            _ => {
                self.error = Some("nothing is being edited".to_string());
                return Ok(false);
            }
        };

        if let Err(message) = form.validate() {
            self.error = Some(message);
            return Ok(false);
        }

        match cache.update(&uuid, &form.to_update_request()).await? {
            ApiOutcome::Success(_) => {
                self.close();
                Ok(true)
            }
            ApiOutcome::Rejected(message) => {
                self.error = Some(message);
                Ok(false)
            }
        }
    }

    /// Moves from the detail view to the delete confirmation.
    pub fn request_delete(&mut self) -> bool {
        match &self.state {
            DialogState::Viewing(uuid) => {
                self.state = DialogState::ConfirmingDelete(uuid.clone());
                self.error = None;
                true
            }
            _ => false,
        }
    }

    /// Dismisses the delete confirmation.
    ///
    /// Always lands on `Closed`; cancelling never restores the prior
    /// detail view.
    pub fn cancel(&mut self) -> bool {
        match &self.state {
            DialogState::ConfirmingDelete(_) => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Confirms the pending delete.
    ///
    /// On success the dialog closes and the cache has reloaded without the
    /// deleted entry. On rejection the confirmation stays open with the
    /// message attached.
    pub async fn confirm_delete(&mut self, cache: &mut LinkCache) -> Result<bool> {
        let uuid = match &self.state {
            DialogState::ConfirmingDelete(uuid) => uuid.clone(),
            _ => {
                self.error = Some("no delete pending".to_string());
                return Ok(false);
            }
        };

        match cache.delete(&uuid).await? {
            ApiOutcome::Success(()) => {
                self.close();
                Ok(true)
            }
            ApiOutcome::Rejected(message) => {
                self.error = Some(message);
                Ok(false)
            }
        }
    }

    /// Requests QR generation for the viewed resource. The dialog state is
    /// unchanged; the new `has_qr_code` only shows up after a reload.
    pub async fn request_qr_code(&mut self, cache: &LinkCache) -> Result<bool> {
        let uuid = match &self.state {
            DialogState::Viewing(uuid) => uuid.clone(),
            _ => {
                self.error = Some("no link is being viewed".to_string());
                return Ok(false);
            }
        };
        cache.request_qr_code(&uuid).await?;
        Ok(true)
    }

    /// Closes whatever dialog is open, dropping the form and any error.
    /// Also invoked on logout: no dialog is valid without a session.
    pub fn close(&mut self) {
        self.state = DialogState::Closed;
        self.form = None;
        self.error = None;
    }
}
