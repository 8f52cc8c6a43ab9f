use serde::{Deserialize, Serialize};

/// Site-wide settings served by the backend. Fields are optional so a
/// partially configured backend still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub telegram_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// What a subscribe call means for the caller: a brand new signup or a
/// repeat of an address the backend already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

impl SubscribeResponse {
    pub fn outcome(&self) -> SubscribeOutcome {
        match self.status.as_deref() {
            Some("exists") => SubscribeOutcome::AlreadySubscribed,
            _ => SubscribeOutcome::Subscribed,
        }
    }
}
