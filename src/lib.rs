// src/lib.rs

use config::AppConfig;
use services::{market_api::MarketApiService, scheme_api::SchemeApiService, site_api::SiteApiService};

/// The three API clients the console talks through, built once from config
/// and cloned into whichever page or job needs them.
#[derive(Clone)]
pub struct AppServices {
    pub market: MarketApiService,
    pub schemes: SchemeApiService,
    pub site: SiteApiService,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            market: MarketApiService::new(config.api_base_url.clone()),
            schemes: SchemeApiService::new(config.api_base_url.clone()),
            site: SiteApiService::new(config.api_base_url.clone()),
        }
    }
}

pub mod services {
    pub mod api_error;
    pub mod market_api;
    pub mod scheme_api;
    pub mod site_api;
}

pub mod config;
pub mod format;
pub mod jobs;
pub mod models;
pub mod pages;
