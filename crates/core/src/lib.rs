//! `sitedesk-core` — client domain foundation.
//!
//! Strongly-typed identifiers and the core error model shared by the session
//! and theme crates. No infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{CoreError, CoreResult};
pub use id::{TenantId, UserId};
