//! Reqwest-backed theme API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use sitedesk_core::TenantId;

use crate::api::{ThemeApi, ThemeApiError};
use crate::color::HexColor;
use crate::theme::TenantTheme;

/// HTTP client for the remote theme endpoint.
///
/// No timeout is imposed here; configure one on the `reqwest::Client` if the
/// deployment wants fetches to give up.
pub struct HttpThemeApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeDto {
    tenant_id: Option<TenantId>,
    company_name: String,
    logo_url: Option<String>,
    primary_color: HexColor,
    secondary_color: HexColor,
}

impl From<ThemeDto> for TenantTheme {
    fn from(dto: ThemeDto) -> Self {
        TenantTheme {
            tenant_id: dto.tenant_id,
            company_name: dto.company_name,
            logo_url: dto.logo_url,
            primary_color: dto.primary_color,
            secondary_color: dto.secondary_color,
        }
    }
}

impl HttpThemeApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ThemeApi for HttpThemeApi {
    async fn current_tenant_theme(&self, access_token: &str) -> Result<TenantTheme, ThemeApiError> {
        let url = format!("{}/api/tenant/theme", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ThemeApiError::Infrastructure(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ThemeApiError::Unauthenticated),
            StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Err(ThemeApiError::NotConfigured),
            status if status.is_success() => {
                let dto: ThemeDto = response
                    .json()
                    .await
                    .map_err(|e| ThemeApiError::Infrastructure(e.to_string()))?;
                Ok(dto.into())
            }
            status => Err(ThemeApiError::Infrastructure(format!(
                "unexpected status {status} from {url}"
            ))),
        }
    }
}
