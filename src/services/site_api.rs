use reqwest::Client;
use std::time::Duration;

use crate::models::site::{SiteSettings, SubscribeOutcome, SubscribeRequest, SubscribeResponse};
use crate::services::api_error::ApiError;

/// Client for the site-wide endpoints: settings and the newsletter signup.
#[derive(Clone)]
pub struct SiteApiService {
    client: Client,
    base_url: String,
}

impl SiteApiService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            base_url,
        }
    }

    pub async fn settings(&self) -> Result<SiteSettings, ApiError> {
        let url = format!("{}/api/settings", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let settings: SiteSettings = response.json().await?;
        Ok(settings)
    }

    pub async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, ApiError> {
        let url = format!("{}/api/newsletter/subscribe", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&SubscribeRequest {
                email: email.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let body: SubscribeResponse = response.json().await?;
        tracing::info!("Subscribe result for {}: {}", email, body.message);
        Ok(body.outcome())
    }
}
