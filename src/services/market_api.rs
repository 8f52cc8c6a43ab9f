use reqwest::Client;
use std::time::Duration;

use crate::models::market::{CoinSnapshot, GlobalStats, TopCoinsResponse, TrendingCoin, TrendingResponse};
use crate::services::api_error::ApiError;

/// Client for the backend's crypto market endpoints.
#[derive(Clone)]
pub struct MarketApiService {
    client: Client,
    base_url: String,
}

impl MarketApiService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            base_url,
        }
    }

    pub async fn top_coins(&self, limit: u32) -> Result<Vec<CoinSnapshot>, ApiError> {
        let url = format!("{}/api/crypto/top-coins", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let data: TopCoinsResponse = response.json().await?;
        tracing::debug!("Fetched {} coins from {}", data.coins.len(), url);
        Ok(data.coins)
    }

    pub async fn global_stats(&self) -> Result<GlobalStats, ApiError> {
        let url = format!("{}/api/crypto/global", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let stats: GlobalStats = response.json().await?;
        Ok(stats)
    }

    pub async fn trending(&self) -> Result<Vec<TrendingCoin>, ApiError> {
        let url = format!("{}/api/crypto/trending", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        let data: TrendingResponse = response.json().await?;
        Ok(data.trending)
    }
}
