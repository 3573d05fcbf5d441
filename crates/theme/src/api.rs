//! Remote theme API contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::theme::TenantTheme;

/// Classified outcome of a theme fetch.
///
/// `Unauthenticated` and `NotConfigured` are expected states (pre-login
/// handshake, genuinely unbranded tenant), not failures of this subsystem;
/// only `Infrastructure` represents something actually going wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeApiError {
    /// HTTP 401: the backend has not seen valid credentials yet.
    #[error("not yet authenticated")]
    Unauthenticated,

    /// HTTP 403/404: the tenant has no theme configured.
    #[error("tenant has no theme configured")]
    NotConfigured,

    /// Transport failure or 5xx.
    #[error("theme service unavailable: {0}")]
    Infrastructure(String),
}

/// Remote theme endpoint, scoped to the authenticated tenant.
#[async_trait]
pub trait ThemeApi: Send + Sync {
    async fn current_tenant_theme(&self, access_token: &str) -> Result<TenantTheme, ThemeApiError>;
}
