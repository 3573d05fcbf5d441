use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sitedesk_core::{TenantId, UserId};

use crate::Role;

/// The live authenticated session.
///
/// # Invariants
/// - At most one `Session` exists at a time; it is owned by the session store.
/// - A superuser session has no tenant (`tenant` is `None`).
/// - `permissions` is the server-granted set; superusers bypass it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub is_superuser: bool,
    pub tenant: Option<TenantId>,
    pub tenant_slug: Option<String>,
    pub permissions: HashSet<String>,
}

impl Session {
    /// Capture the immutable fields theme resolution needs.
    ///
    /// Asynchronous resolutions receive a snapshot rather than a reference to
    /// mutable session state, and compare it against the live state only at
    /// the completion boundary.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tenant: self.tenant,
            is_superuser: self.is_superuser,
        }
    }
}

/// Immutable view of the session fields relevant to theme resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tenant: Option<TenantId>,
    pub is_superuser: bool,
}
