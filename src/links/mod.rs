//! Link resources: cache, detail editing, analytics, dialog flow
//!
//! - `cache`: session-scoped snapshot of the remote collection
//! - `detail`: the editable form projected from one resource
//! - `analytics`: referrer ranking for the stats view
//! - `dialog`: the detail/delete dialog state machine

pub mod analytics;
pub mod cache;
pub mod detail;
pub mod dialog;

pub use cache::LinkCache;
pub use detail::LinkForm;
pub use dialog::{DialogController, DialogState};
