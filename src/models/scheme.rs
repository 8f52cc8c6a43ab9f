use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An investment-plan record as the backend stores it. `id` is assigned
/// server-side; everything else is admin-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: String,
    pub title: String,
    pub min_investment: i64,
    pub max_investment: i64,
    pub return_percentage: f64,
    pub duration_months: i64,
    pub description: String,
    pub is_popular: bool,
    pub is_active: bool,
}

/// Response envelope for `GET /api/schemes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeListResponse {
    pub schemes: Vec<Scheme>,
}

/// Mutation payload for create/update: every `Scheme` field except `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeInput {
    pub title: String,
    pub min_investment: i64,
    pub max_investment: i64,
    pub return_percentage: f64,
    pub duration_months: i64,
    pub description: String,
    pub is_popular: bool,
    pub is_active: bool,
}

/// Rejected admin form input. While the form fails to parse, no request is
/// sent and the typed-in text stays untouched for correction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemeFormError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("{field} must be a whole number")]
    InvalidInteger { field: &'static str },
    #[error("{field} must be a number")]
    InvalidNumber { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("Minimum investment cannot exceed maximum investment")]
    BoundsReversed,
    #[error("Duration must be at least 1 month")]
    NonPositiveDuration,
}

/// Admin form state. Numeric fields hold exactly the text the admin typed;
/// parsing happens once, on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeForm {
    pub title: String,
    pub min_investment: String,
    pub max_investment: String,
    pub return_percentage: String,
    pub duration_months: String,
    pub description: String,
    pub is_popular: bool,
    pub is_active: bool,
}

impl Default for SchemeForm {
    /// The blank create form: 40% return over 1 month, active, not popular.
    fn default() -> Self {
        Self {
            title: String::new(),
            min_investment: String::new(),
            max_investment: String::new(),
            return_percentage: "40".to_string(),
            duration_months: "1".to_string(),
            description: String::new(),
            is_popular: false,
            is_active: true,
        }
    }
}

impl SchemeForm {
    /// Populate the form verbatim from an existing record, numerics via
    /// their string representation so an untouched edit round-trips.
    pub fn from_scheme(scheme: &Scheme) -> Self {
        Self {
            title: scheme.title.clone(),
            min_investment: scheme.min_investment.to_string(),
            max_investment: scheme.max_investment.to_string(),
            return_percentage: scheme.return_percentage.to_string(),
            duration_months: scheme.duration_months.to_string(),
            description: scheme.description.clone(),
            is_popular: scheme.is_popular,
            is_active: scheme.is_active,
        }
    }

    /// Parse and validate the typed fields into a mutation payload.
    ///
    /// Every failure is typed; NaN or otherwise unparseable numbers never
    /// reach the network layer.
    pub fn parse(&self) -> Result<SchemeInput, SchemeFormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SchemeFormError::EmptyTitle);
        }

        let min_investment = parse_integer_field(&self.min_investment, "Minimum investment")?;
        let max_investment = parse_integer_field(&self.max_investment, "Maximum investment")?;
        if min_investment > max_investment {
            return Err(SchemeFormError::BoundsReversed);
        }

        let return_percentage = parse_number_field(&self.return_percentage, "Return percentage")?;
        let duration_months = parse_integer_field(&self.duration_months, "Duration")?;
        if duration_months < 1 {
            return Err(SchemeFormError::NonPositiveDuration);
        }

        Ok(SchemeInput {
            title: title.to_string(),
            min_investment,
            max_investment,
            return_percentage,
            duration_months,
            description: self.description.trim().to_string(),
            is_popular: self.is_popular,
            is_active: self.is_active,
        })
    }
}

fn parse_integer_field(raw: &str, field: &'static str) -> Result<i64, SchemeFormError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| SchemeFormError::InvalidInteger { field })?;
    if value < 0 {
        return Err(SchemeFormError::Negative { field });
    }
    Ok(value)
}

fn parse_number_field(raw: &str, field: &'static str) -> Result<f64, SchemeFormError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| SchemeFormError::InvalidNumber { field })?;
    // "NaN" and "inf" parse successfully, so finiteness is its own check
    if !value.is_finite() {
        return Err(SchemeFormError::InvalidNumber { field });
    }
    if value < 0.0 {
        return Err(SchemeFormError::Negative { field });
    }
    Ok(value)
}
