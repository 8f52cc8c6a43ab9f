use std::env;
use std::time::Duration;

/// Default contact link shown when the backend has no override configured.
pub const DEFAULT_TELEGRAM_LINK: &str = "https://t.me/wealthx_invest";

/// Runtime configuration, read once at startup from the environment
/// (`.env` is loaded by `main` via dotenvy before this runs).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the WealthX backend, `/api` is appended per request.
    pub api_base_url: String,
    /// Period of the market and ticker refresh loops.
    pub refresh_interval: Duration,
    /// How many coins the market dashboard requests.
    pub top_coins_limit: u32,
    /// How many coins the ticker strip requests.
    pub ticker_coins_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url =
            env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        let refresh_secs = env_parsed("MARKET_REFRESH_SECS", 120u64);
        let top_coins_limit = env_parsed("TOP_COINS_LIMIT", 20u32);
        let ticker_coins_limit = env_parsed("TICKER_COINS_LIMIT", 10u32);

        Self {
            api_base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            top_coins_limit,
            ticker_coins_limit,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            refresh_interval: Duration::from_secs(120),
            top_coins_limit: 20,
            ticker_coins_limit: 10,
        }
    }
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring unparseable {}='{}', using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
