//! `sitedesk-client` — composition root for the client core.
//!
//! A host shell (browser bundle, desktop app, test harness) builds a
//! [`ClientCore`] once, keeps it for the life of the process, and calls
//! [`ClientCore::pump`] between UI turns to drain session events into theme
//! resolution.

pub mod app;

pub use app::ClientCore;

/// API base URL from the environment, with a local-development default.
pub fn api_url_from_env() -> String {
    std::env::var("SITEDESK_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}
