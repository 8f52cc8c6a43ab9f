use serde::{Deserialize, Serialize};

/// One coin row from the markets endpoint. Prices and caps are nullable
/// upstream, so every numeric field is optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Vec<f64>,
}

/// Aggregate market figures from the global endpoint, USD-denominated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub total_market_cap: f64,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default)]
    pub market_cap_change_24h: f64,
    #[serde(default)]
    pub active_cryptocurrencies: u64,
    #[serde(default)]
    pub markets: u64,
    #[serde(default)]
    pub btc_dominance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    pub thumb: Option<String>,
    pub market_cap_rank: Option<u32>,
}

/// Response envelope for `GET /api/crypto/top-coins`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCoinsResponse {
    pub coins: Vec<CoinSnapshot>,
}

/// Response envelope for `GET /api/crypto/trending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub trending: Vec<TrendingCoin>,
}
