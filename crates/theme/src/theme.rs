//! Tenant branding record and the two code-defined themes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sitedesk_core::TenantId;

use crate::color::HexColor;

/// A tenant's visual branding.
///
/// # Invariants
/// - When a session and a theme both exist, the theme's `tenant_id` equals
///   the session's tenant.
/// - A superuser session never holds a `TenantTheme` fetched from the
///   backend; it uses the fixed operator theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTheme {
    pub tenant_id: Option<TenantId>,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub primary_color: HexColor,
    pub secondary_color: HexColor,
}

/// Fixed branding for platform operators. Never fetched.
pub fn operator_theme() -> TenantTheme {
    TenantTheme {
        tenant_id: None,
        company_name: "SiteDesk Operations".to_string(),
        logo_url: None,
        primary_color: HexColor::from_rgb(0x25, 0x63, 0xeb),
        secondary_color: HexColor::from_rgb(0x1e, 0x40, 0xaf),
    }
}

/// Generic branding substituted only on infrastructure failure with cached
/// fallback enabled. Distinct from the operator theme.
pub fn default_theme() -> TenantTheme {
    TenantTheme {
        tenant_id: None,
        company_name: "SiteDesk".to_string(),
        logo_url: None,
        primary_color: HexColor::from_rgb(0x3b, 0x82, 0xf6),
        secondary_color: HexColor::from_rgb(0x64, 0x74, 0x8b),
    }
}

/// Last successfully resolved theme, persisted for fallback reuse.
///
/// Fallback only ever reuses an entry whose tenant matches the requesting
/// session's tenant; cross-tenant reuse is forbidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTheme {
    pub theme: TenantTheme,
    pub cached_at: DateTime<Utc>,
}

impl CachedTheme {
    pub fn now(theme: TenantTheme) -> Self {
        Self {
            theme,
            cached_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_and_default_themes_are_distinct() {
        assert_ne!(operator_theme(), default_theme());
    }

    #[test]
    fn cached_theme_roundtrips_through_json() {
        let cached = CachedTheme::now(TenantTheme {
            tenant_id: Some(TenantId::new()),
            company_name: "Acme Build Co".to_string(),
            logo_url: Some("https://cdn.sitedesk.test/acme.png".to_string()),
            primary_color: "#112233".parse().unwrap(),
            secondary_color: "#445566".parse().unwrap(),
        });

        let json = serde_json::to_string(&cached).unwrap();
        let back: CachedTheme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cached);
    }
}
