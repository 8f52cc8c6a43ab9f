use chrono::{DateTime, Duration, Utc};

/// A short-lived admin session token. The password it was exchanged for is
/// never kept; mutations carry only this value.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AdminToken {
    pub fn new(token: String, expires_in_secs: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    pub fn value(&self) -> &str {
        &self.token
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
