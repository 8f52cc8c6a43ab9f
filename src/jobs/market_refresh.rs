//! Market Refresh Feed
//!
//! Runs the three-request market batch (top coins, global stats, trending)
//! immediately and then once per interval, applying results to a shared
//! `MarketView` behind its generation check.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::jobs::RefreshHandle;
use crate::models::market::CoinSnapshot;
use crate::pages::market::{CoinRow, MarketBatch, MarketView, StatCard};
use crate::services::api_error::ApiError;
use crate::services::market_api::MarketApiService;

/// Shared owner of the market dashboard state. Clones share one view.
#[derive(Clone)]
pub struct MarketFeed {
    api: MarketApiService,
    view: Arc<RwLock<MarketView>>,
    limit: u32,
    poll_interval: Duration,
}

impl MarketFeed {
    pub fn new(api: MarketApiService, limit: u32, poll_interval: Duration) -> Self {
        Self {
            api,
            view: Arc::new(RwLock::new(MarketView::new())),
            limit,
            poll_interval,
        }
    }

    /// Spawn the polling loop. The returned handle aborts it on drop.
    pub fn start(&self) -> RefreshHandle {
        let feed = self.clone();
        let handle = tokio::spawn(async move {
            tracing::info!(
                "Starting market refresh (every {}s)",
                feed.poll_interval.as_secs()
            );
            let mut interval = interval(feed.poll_interval);
            loop {
                // first tick completes immediately
                interval.tick().await;
                feed.refresh_now().await;
            }
        });
        RefreshHandle::new(handle)
    }

    /// Issue one batch and apply it if it is still the newest. Every
    /// failure ends here: logged, view data untouched.
    pub async fn refresh_now(&self) {
        let generation = self.view.write().begin_fetch();
        match self.fetch_batch().await {
            Ok(batch) => {
                if self.view.write().apply(generation, batch) {
                    tracing::debug!("Applied market batch {}", generation);
                }
            }
            Err(e) => {
                tracing::error!("Market batch {} failed: {}", generation, e);
                self.view.write().fail(generation);
            }
        }
    }

    /// The three reads run concurrently; any failure fails the whole
    /// batch, a partial one is never built.
    async fn fetch_batch(&self) -> Result<MarketBatch, ApiError> {
        let (coins, global, trending) = tokio::join!(
            self.api.top_coins(self.limit),
            self.api.global_stats(),
            self.api.trending(),
        );
        Ok(MarketBatch {
            coins: coins?,
            global: global?,
            trending: trending?,
        })
    }

    pub fn is_loading(&self) -> bool {
        self.view.read().is_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.view.read().is_refreshing()
    }

    pub fn coins(&self) -> Vec<CoinSnapshot> {
        self.view.read().coins().to_vec()
    }

    pub fn table_rows(&self) -> Vec<CoinRow> {
        self.view.read().table_rows()
    }

    pub fn stat_cards(&self) -> Vec<StatCard> {
        self.view.read().stat_cards()
    }

    pub fn trending_labels(&self) -> Vec<String> {
        self.view.read().trending_labels()
    }

    pub fn last_updated(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.view.read().last_updated()
    }
}
