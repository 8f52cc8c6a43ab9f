//! Ticker Feed
//!
//! The second, independent poller: fetches the small top-coin list on the
//! same period as the market feed but shares no state with it.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::jobs::RefreshHandle;
use crate::pages::ticker::{TickerItem, TickerTape};
use crate::services::market_api::MarketApiService;

#[derive(Clone)]
pub struct TickerFeed {
    api: MarketApiService,
    tape: Arc<RwLock<TickerTape>>,
    limit: u32,
    poll_interval: Duration,
}

impl TickerFeed {
    pub fn new(api: MarketApiService, limit: u32, poll_interval: Duration) -> Self {
        Self {
            api,
            tape: Arc::new(RwLock::new(TickerTape::new())),
            limit,
            poll_interval,
        }
    }

    /// Spawn the polling loop. The returned handle aborts it on drop.
    pub fn start(&self) -> RefreshHandle {
        let feed = self.clone();
        let handle = tokio::spawn(async move {
            tracing::info!(
                "Starting ticker refresh (every {}s)",
                feed.poll_interval.as_secs()
            );
            let mut interval = interval(feed.poll_interval);
            loop {
                // first tick completes immediately
                interval.tick().await;
                feed.poll_once().await;
            }
        });
        RefreshHandle::new(handle)
    }

    /// One fetch. Failures are logged and swallowed; the last good strip
    /// keeps rendering.
    pub async fn poll_once(&self) {
        match self.api.top_coins(self.limit).await {
            Ok(coins) => self.tape.write().apply(coins),
            Err(e) => tracing::error!("Ticker fetch failed: {}", e),
        }
    }

    pub fn has_data(&self) -> bool {
        self.tape.read().has_data()
    }

    pub fn items(&self) -> Vec<TickerItem> {
        self.tape.read().items()
    }

    pub fn strip_line(&self) -> Option<String> {
        self.tape.read().strip_line()
    }
}
