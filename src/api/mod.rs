//! HTTP contract with the shortening service
//!
//! - `types`: request/response bodies for every endpoint
//! - `outcome`: the discriminated success/rejection result
//! - `client`: the typed `reqwest` wrapper

pub mod client;
pub mod outcome;
pub mod types;

pub use client::ApiClient;
pub use outcome::ApiOutcome;
