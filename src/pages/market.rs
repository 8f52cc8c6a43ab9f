//! Market dashboard state: top coins, global stats and trending coins,
//! refreshed in three-request batches. A fetch generation counter keeps
//! overlapping refreshes from applying out of order: only the newest
//! issued batch may land.

use chrono::{DateTime, Utc};
use tabled::Tabled;
use tracing::debug;

use crate::format::{
    format_compact_usd, format_count, format_percent_1dp, format_percent_with_arrow, format_price,
    format_signed_percent, sparkline_strip,
};
use crate::models::market::{CoinSnapshot, GlobalStats, TrendingCoin};

/// The result of one settled three-request batch. All three requests must
/// have succeeded; a partial batch is never constructed.
#[derive(Debug, Clone)]
pub struct MarketBatch {
    pub coins: Vec<CoinSnapshot>,
    pub global: GlobalStats,
    pub trending: Vec<TrendingCoin>,
}

/// One row of the top-coins table.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct CoinRow {
    #[tabled(rename = "#")]
    pub rank: String,
    #[tabled(rename = "Coin")]
    pub coin: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "24h %")]
    pub change_24h: String,
    #[tabled(rename = "Market Cap")]
    pub market_cap: String,
    #[tabled(rename = "Volume")]
    pub volume: String,
    #[tabled(rename = "7d Chart")]
    pub chart: String,
}

/// One headline stat, with an optional 24h change line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub change: Option<String>,
}

pub struct MarketView {
    coins: Vec<CoinSnapshot>,
    global: Option<GlobalStats>,
    trending: Vec<TrendingCoin>,
    loading: bool,
    refreshing: bool,
    issued: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for MarketView {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketView {
    pub fn new() -> Self {
        Self {
            coins: Vec::new(),
            global: None,
            trending: Vec::new(),
            loading: true,
            refreshing: false,
            issued: 0,
            last_updated: None,
        }
    }

    /// Register a batch about to be issued and return its generation.
    /// Anything but the very first batch counts as a background refresh.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        if !self.loading {
            self.refreshing = true;
        }
        self.issued
    }

    /// Apply a settled batch, but only if it is still the newest issued
    /// one. A stale generation is dropped whole and the method returns
    /// false.
    pub fn apply(&mut self, generation: u64, batch: MarketBatch) -> bool {
        if generation != self.issued {
            debug!(
                "Dropping market batch from generation {} (newest is {})",
                generation, self.issued
            );
            return false;
        }
        self.coins = batch.coins;
        self.global = Some(batch.global);
        self.trending = batch.trending;
        self.loading = false;
        self.refreshing = false;
        self.last_updated = Some(Utc::now());
        true
    }

    /// Record a failed batch. Visible data stays exactly as it was; only
    /// the in-flight indicators clear, and only for the newest generation.
    pub fn fail(&mut self, generation: u64) {
        if generation != self.issued {
            return;
        }
        self.loading = false;
        self.refreshing = false;
    }

    pub fn coins(&self) -> &[CoinSnapshot] {
        &self.coins
    }

    pub fn global(&self) -> Option<&GlobalStats> {
        self.global.as_ref()
    }

    pub fn trending(&self) -> &[TrendingCoin] {
        &self.trending
    }

    /// True until the first batch settles, success or failure.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while a background refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Table rows for the top-coins listing. Rank falls back to the list
    /// position when the backend sent none.
    pub fn table_rows(&self) -> Vec<CoinRow> {
        self.coins
            .iter()
            .enumerate()
            .map(|(i, coin)| CoinRow {
                rank: coin
                    .market_cap_rank
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| (i + 1).to_string()),
                coin: format!("{} {}", coin.name, coin.symbol),
                price: format_price(coin.current_price.unwrap_or(0.0)),
                change_24h: format_percent_with_arrow(
                    coin.price_change_percentage_24h.unwrap_or(0.0),
                ),
                market_cap: format_compact_usd(coin.market_cap.unwrap_or(0.0)),
                volume: format_compact_usd(coin.total_volume.unwrap_or(0.0)),
                chart: sparkline_strip(&coin.sparkline_in_7d),
            })
            .collect()
    }

    /// The four headline stats, present once global data has loaded.
    pub fn stat_cards(&self) -> Vec<StatCard> {
        let Some(global) = &self.global else {
            return Vec::new();
        };
        vec![
            StatCard {
                label: "Total Market Cap",
                value: format_compact_usd(global.total_market_cap),
                change: Some(format_signed_percent(global.market_cap_change_24h)),
            },
            StatCard {
                label: "24h Volume",
                value: format_compact_usd(global.total_volume),
                change: None,
            },
            StatCard {
                label: "BTC Dominance",
                value: format_percent_1dp(global.btc_dominance),
                change: None,
            },
            StatCard {
                label: "Active Cryptos",
                value: format_count(global.active_cryptocurrencies),
                change: None,
            },
        ]
    }

    /// Labels for the trending strip, rank falling back to `N/A`.
    pub fn trending_labels(&self) -> Vec<String> {
        self.trending
            .iter()
            .map(|coin| {
                let rank = coin
                    .market_cap_rank
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                format!("{} #{}", coin.name, rank)
            })
            .collect()
    }
}
