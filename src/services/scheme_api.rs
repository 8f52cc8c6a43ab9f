//! Client for the scheme endpoints: the public listing plus the
//! token-guarded admin mutations.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::scheme::{Scheme, SchemeInput, SchemeListResponse};
use crate::models::session::AdminToken;
use crate::services::api_error::ApiError;

/// Header carrying the admin session token on every mutation.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    expires_in_secs: Option<i64>,
}

#[derive(Clone)]
pub struct SchemeApiService {
    client: Client,
    base_url: String,
}

impl SchemeApiService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            base_url,
        }
    }

    /// Fetch schemes. Admin views pass `active_only = false` to see every
    /// record; public views pass `true`.
    pub async fn list_schemes(&self, active_only: bool) -> Result<Vec<Scheme>, ApiError> {
        let url = format!("{}/api/schemes", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("active_only", active_only.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let data: SchemeListResponse = response.json().await?;
        Ok(data.schemes)
    }

    /// Exchange the admin password for a session token. The password is
    /// dropped as soon as this returns.
    pub async fn login(&self, password: &str) -> Result<AdminToken, ApiError> {
        let url = format!("{}/api/admin/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let body: LoginResponse = response.json().await?;
        let ttl = body.expires_in_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        tracing::info!("Admin session opened, token valid for {}s", ttl);
        Ok(AdminToken::new(body.token, ttl))
    }

    pub async fn create_scheme(
        &self,
        token: &AdminToken,
        input: &SchemeInput,
    ) -> Result<Scheme, ApiError> {
        let url = format!("{}/api/admin/schemes", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(ADMIN_TOKEN_HEADER, token.value())
            .json(input)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let scheme: Scheme = response.json().await?;
        tracing::info!("Created scheme {} ({})", scheme.title, scheme.id);
        Ok(scheme)
    }

    pub async fn update_scheme(
        &self,
        token: &AdminToken,
        id: &str,
        input: &SchemeInput,
    ) -> Result<Scheme, ApiError> {
        let url = format!("{}/api/admin/schemes/{}", self.base_url, id);

        let response = self
            .client
            .put(&url)
            .header(ADMIN_TOKEN_HEADER, token.value())
            .json(input)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let scheme: Scheme = response.json().await?;
        tracing::info!("Updated scheme {}", scheme.id);
        Ok(scheme)
    }

    pub async fn delete_scheme(&self, token: &AdminToken, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/admin/schemes/{}", self.base_url, id);

        let response = self
            .client
            .delete(&url)
            .header(ADMIN_TOKEN_HEADER, token.value())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        tracing::info!("Deleted scheme {}", id);
        Ok(())
    }
}
