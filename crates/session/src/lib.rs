//! `sitedesk-session` — credential lifecycle and the live session.
//!
//! The session store is the single owner of the `Session`: login, logout,
//! startup rehydration, and profile refresh all go through it. Theme
//! resolution is decoupled behind `SessionEvent`s on the bus.

pub mod api;
pub mod http;
pub mod store;

pub use api::{AuthApi, AuthApiError, LoginResponse, Profile, UserRecord};
pub use http::HttpAuthApi;
pub use store::{LoginError, LoginSurface, RefreshError, SessionStore};
