use crate::api::{ApiClient, ApiError, PendingClaim, PendingItem, PendingPolicy};
use serde_json::Value;
use std::{collections::HashSet, rc::Rc};

pub const REJECTION_REASON_REQUIRED: &str = "Rejection reason is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Policy,
    Claim,
}

impl ItemKind {
    fn label(self) -> &'static str {
        match self {
            ItemKind::Policy => "Policy",
            ItemKind::Claim => "Claim",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub message: String,
}

impl DecisionOutcome {
    fn from_response(kind: ItemKind, approve: bool, response: &Value) -> Self {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                let verb = if approve { "approved" } else { "rejected" };
                format!("{} {} successfully", kind.label(), verb)
            });
        Self { message }
    }
}

/// A denial needs a reason; returns it trimmed.
pub fn validate_rejection_reason(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ApiError::validation(REJECTION_REASON_REQUIRED))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Converts every wire record, failing on the first bad one or on a
/// repeated id.
pub fn decode_batch<R, T>(records: Vec<R>) -> Result<Vec<T>, ApiError>
where
    T: TryFrom<R, Error = ApiError> + PendingItem,
{
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        let item = T::try_from(record)?;
        if !seen.insert(item.item_id()) {
            return Err(ApiError::decode(format!(
                "Duplicate id {} in pending list",
                item.item_id()
            )));
        }
        items.push(item);
    }
    Ok(items)
}

#[derive(Clone)]
pub struct ReviewRepository {
    client: Rc<ApiClient>,
}

impl ReviewRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn load_pending_policies(&self) -> Result<Vec<PendingPolicy>, ApiError> {
        decode_batch(self.client.get_pending_policies().await?)
    }

    pub async fn load_pending_claims(&self) -> Result<Vec<PendingClaim>, ApiError> {
        decode_batch(self.client.get_pending_claims().await?)
    }

    /// Issues both list requests together and waits for both.
    pub async fn load_all(
        &self,
    ) -> (
        Result<Vec<PendingPolicy>, ApiError>,
        Result<Vec<PendingClaim>, ApiError>,
    ) {
        futures::join!(self.load_pending_policies(), self.load_pending_claims())
    }

    pub async fn decide_policy(&self, id: i64, approve: bool) -> Result<DecisionOutcome, ApiError> {
        let response = self.client.approve_policy(id, approve).await?;
        Ok(DecisionOutcome::from_response(ItemKind::Policy, approve, &response))
    }

    /// Denials are validated before anything goes over the wire.
    pub async fn decide_claim(
        &self,
        id: i64,
        approve: bool,
        reason: &str,
    ) -> Result<DecisionOutcome, ApiError> {
        let rejection_reason = if approve {
            None
        } else {
            Some(validate_rejection_reason(reason)?)
        };
        let response = self
            .client
            .approve_claim(id, approve, rejection_reason)
            .await?;
        Ok(DecisionOutcome::from_response(ItemKind::Claim, approve, &response))
    }
}
