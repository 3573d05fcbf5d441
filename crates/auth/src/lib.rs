//! `sitedesk-auth` — pure session and permission model.
//!
//! This crate is intentionally decoupled from HTTP and storage: it holds the
//! `Session` record and the stateless permission evaluator, nothing else.

pub mod evaluate;
pub mod roles;
pub mod session;

pub use evaluate::{has_all, has_any, has_permission};
pub use roles::Role;
pub use session::{Session, SessionSnapshot};
