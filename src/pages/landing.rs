//! Landing view data: the active scheme cards and the contact link, plus
//! the newsletter signup.

use tracing::error;

use crate::config::DEFAULT_TELEGRAM_LINK;
use crate::format::format_inr_compact;
use crate::models::scheme::Scheme;
use crate::models::site::SubscribeOutcome;
use crate::pages::Notice;
use crate::services::scheme_api::SchemeApiService;
use crate::services::site_api::SiteApiService;

/// One landing scheme card, strings pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeCard {
    pub title: String,
    pub returns: String,
    pub duration: String,
    pub min: String,
    pub max: String,
    pub description: String,
    pub popular: bool,
}

pub struct LandingView {
    schemes: Vec<Scheme>,
    telegram_link: String,
    loading: bool,
}

impl Default for LandingView {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingView {
    pub fn new() -> Self {
        Self {
            schemes: Vec::new(),
            telegram_link: DEFAULT_TELEGRAM_LINK.to_string(),
            loading: true,
        }
    }

    /// Fetch active schemes and site settings concurrently. Each result is
    /// handled on its own: a failed scheme read logs and leaves the list
    /// empty, a failed or empty settings read keeps the default link.
    pub async fn load(&mut self, schemes_api: &SchemeApiService, site_api: &SiteApiService) {
        let (schemes, settings) =
            tokio::join!(schemes_api.list_schemes(true), site_api.settings());

        match schemes {
            Ok(list) => self.schemes = list,
            Err(e) => error!("Failed to load schemes: {}", e),
        }
        match settings {
            Ok(settings) => {
                if let Some(link) = settings.telegram_link {
                    if !link.is_empty() {
                        self.telegram_link = link;
                    }
                }
            }
            Err(e) => error!("Failed to load settings: {}", e),
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn telegram_link(&self) -> &str {
        &self.telegram_link
    }

    /// Card view-models with compact INR bounds.
    pub fn cards(&self) -> Vec<SchemeCard> {
        self.schemes
            .iter()
            .map(|scheme| SchemeCard {
                title: scheme.title.clone(),
                returns: format!("{}% returns", scheme.return_percentage),
                duration: format!(
                    "Duration: {} month{}",
                    scheme.duration_months,
                    if scheme.duration_months > 1 { "s" } else { "" }
                ),
                min: format!("Min: {}", format_inr_compact(scheme.min_investment)),
                max: format!("Max: {}", format_inr_compact(scheme.max_investment)),
                description: scheme.description.clone(),
                popular: scheme.is_popular,
            })
            .collect()
    }
}

/// Validate and submit a newsletter signup. Obviously malformed addresses
/// are rejected locally and never reach the network.
pub async fn subscribe_newsletter(api: &SiteApiService, email: &str) -> Notice {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Notice::error("Please enter a valid email address");
    }
    match api.subscribe(email).await {
        Ok(SubscribeOutcome::Subscribed) => Notice::success("Successfully subscribed!"),
        Ok(SubscribeOutcome::AlreadySubscribed) => Notice::info("You're already subscribed!"),
        Err(e) => {
            error!("Subscribe failed for {}: {}", email, e);
            Notice::error("Failed to subscribe. Try again later.")
        }
    }
}
