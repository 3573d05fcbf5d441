//! Reqwest-backed auth API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::api::{AuthApi, AuthApiError, LoginResponse, Profile};

/// HTTP client for the remote auth endpoints.
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutBody<'a> {
    refresh_token: &'a str,
}

impl HttpAuthApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&LoginBody { email, password })
            .send()
            .await
            .map_err(|e| AuthApiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "invalid credentials".to_string());
                Err(AuthApiError::Credentials(message))
            }
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| AuthApiError::Network(e.to_string())),
            status => Err(AuthApiError::Network(format!(
                "unexpected status {status} from login"
            ))),
        }
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthApiError> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .json(&LogoutBody { refresh_token })
            .send()
            .await
            .map_err(|e| AuthApiError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthApiError::Network(format!(
                "unexpected status {} from logout",
                response.status()
            )))
        }
    }

    async fn profile(&self, access_token: &str) -> Result<Profile, AuthApiError> {
        let response = self
            .client
            .get(self.url("/api/auth/profile"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthApiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AuthApiError::Credentials(
                "session expired".to_string(),
            )),
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| AuthApiError::Network(e.to_string())),
            status => Err(AuthApiError::Network(format!(
                "unexpected status {status} from profile"
            ))),
        }
    }
}
