use crate::format::{format_signed_percent, format_ticker_price};
use crate::models::market::CoinSnapshot;

/// One rendered ticker entry: `BTC $67,234.12 +4.20%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerItem {
    pub symbol: String,
    pub price: String,
    pub change: String,
}

/// The scrolling price strip. Holds the last successful coin list and
/// renders it duplicated once for a seamless loop; renders nothing at all
/// until the first successful fetch.
#[derive(Default)]
pub struct TickerTape {
    coins: Vec<CoinSnapshot>,
}

impl TickerTape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held list wholesale; there is no merging. A successful
    /// empty fetch clears the strip again.
    pub fn apply(&mut self, coins: Vec<CoinSnapshot>) {
        self.coins = coins;
    }

    pub fn has_data(&self) -> bool {
        !self.coins.is_empty()
    }

    /// The visual items: the coin sequence duplicated exactly once, so a
    /// fetch of N coins yields 2N items. Empty before any successful fetch.
    pub fn items(&self) -> Vec<TickerItem> {
        if self.coins.is_empty() {
            return Vec::new();
        }
        self.coins
            .iter()
            .chain(self.coins.iter())
            .map(|coin| TickerItem {
                symbol: coin.symbol.clone(),
                price: format_ticker_price(coin.current_price.unwrap_or(0.0)),
                change: format_signed_percent(coin.price_change_percentage_24h.unwrap_or(0.0)),
            })
            .collect()
    }

    /// The whole strip as one line, or `None` while there is nothing to
    /// show.
    pub fn strip_line(&self) -> Option<String> {
        let items = self.items();
        if items.is_empty() {
            return None;
        }
        let parts: Vec<String> = items
            .iter()
            .map(|item| format!("{} {} {}", item.symbol, item.price, item.change))
            .collect();
        Some(parts.join("  ·  "))
    }
}
