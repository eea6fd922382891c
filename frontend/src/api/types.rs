use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::time::parse_timestamp;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub const VALIDATION: &'static str = "VALIDATION_ERROR";
    pub const REQUEST_FAILED: &'static str = "REQUEST_FAILED";
    pub const HTTP: &'static str = "HTTP_ERROR";
    pub const DECODE: &'static str = "DECODE_ERROR";
    pub const UNKNOWN: &'static str = "UNKNOWN";

    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::VALIDATION)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::UNKNOWN)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::REQUEST_FAILED)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::with_code(msg, Self::DECODE)
    }

    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::with_code(msg, Self::HTTP)
        }
    }

    pub fn is_validation(&self) -> bool {
        self.code == Self::VALIDATION
    }
}

/// Anything that sits in a pending list and can be removed from it by id.
pub trait PendingItem {
    fn item_id(&self) -> i64;
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRecord {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub purchase_date: String,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub cancellation_date: Option<String>,
    pub status: String,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub approved_at: Option<String>,
    pub payment_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimRecord {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub product_id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub claim_amount: f64,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingPolicy {
    pub id: i64,
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub purchase_date: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub cancellation_date: Option<DateTime<Utc>>,
    pub status: String,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub payment_status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingClaim {
    pub id: i64,
    pub user_id: Option<i64>,
    pub product_id: i64,
    pub claim_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl PendingItem for PendingPolicy {
    fn item_id(&self) -> i64 {
        self.id
    }
}

impl PendingItem for PendingClaim {
    fn item_id(&self) -> i64 {
        self.id
    }
}

impl TryFrom<PolicyRecord> for PendingPolicy {
    type Error = ApiError;

    fn try_from(record: PolicyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            product_id: record.product_id,
            purchase_date: required_timestamp("purchase_date", record.id, &record.purchase_date)?,
            valid_until: optional_timestamp("valid_until", record.id, record.valid_until)?,
            cancellation_date: optional_timestamp(
                "cancellation_date",
                record.id,
                record.cancellation_date,
            )?,
            status: record.status,
            approved_by: record.approved_by,
            approved_at: optional_timestamp("approved_at", record.id, record.approved_at)?,
            payment_status: record.payment_status,
        })
    }
}

impl TryFrom<ClaimRecord> for PendingClaim {
    type Error = ApiError;

    fn try_from(record: ClaimRecord) -> Result<Self, Self::Error> {
        if !record.claim_amount.is_finite() || record.claim_amount < 0.0 {
            return Err(ApiError::decode(format!(
                "Claim {} has an invalid amount: {}",
                record.id, record.claim_amount
            )));
        }
        Ok(Self {
            id: record.id,
            user_id: record.user_id,
            product_id: record.product_id,
            claim_amount: record.claim_amount,
            status: record.status,
            created_at: required_timestamp("created_at", record.id, &record.created_at)?,
        })
    }
}

fn required_timestamp(field: &str, id: i64, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    parse_timestamp(raw).ok_or_else(|| {
        ApiError::decode(format!("Record {} has an invalid {}: {:?}", id, field, raw))
    })
}

// Blank values count as absent; anything else must parse.
fn optional_timestamp(
    field: &str,
    id: i64,
    raw: Option<String>,
) -> Result<Option<DateTime<Utc>>, ApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => required_timestamp(field, id, value).map(Some),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Number(f64),
    Text(String),
}

// Decimal columns may be serialized as strings.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match AmountRepr::deserialize(deserializer)? {
        AmountRepr::Number(value) => Ok(value),
        AmountRepr::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid claim amount: {:?}", raw))),
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PolicyDecisionRequest {
    pub decision: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimDecisionRequest {
    pub decision: bool,
    pub rejection_reason: Option<String>,
}
