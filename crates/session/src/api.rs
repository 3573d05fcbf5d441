//! Remote auth API contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sitedesk_core::{TenantId, UserId};

/// The user record as the backend returns and this client persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserRecord,
    pub role: String,
    pub permissions: Vec<String>,
    pub tenant_id: Option<TenantId>,
    pub tenant_slug: Option<String>,
    pub is_super_admin: bool,
}

/// Authoritative profile, re-fetched by `refresh()`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user: UserRecord,
    pub role: String,
    pub permissions: Vec<String>,
    pub tenant: Option<TenantId>,
    pub tenant_slug: Option<String>,
    pub onboarding_completed: bool,
    pub is_superuser: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthApiError {
    /// The backend rejected the credentials (or token). Carries the message
    /// the UI renders.
    #[error("credentials rejected: {0}")]
    Credentials(String),

    /// Transport failure or server error.
    #[error("auth service unreachable: {0}")]
    Network(String),
}

/// Remote auth endpoints.
///
/// Tokens are passed explicitly so implementations stay stateless; the
/// session store is the only holder of credential state.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthApiError>;

    /// Invalidate the server-side session. Callers treat failure as
    /// best-effort; this method must still report it honestly.
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthApiError>;

    async fn profile(&self, access_token: &str) -> Result<Profile, AuthApiError>;
}
