use serde_json::Value;

use super::{
    client::ApiClient,
    types::{ApiError, ClaimDecisionRequest, ClaimRecord, PolicyDecisionRequest, PolicyRecord},
};

impl ApiClient {
    pub async fn get_pending_policies(&self) -> Result<Vec<PolicyRecord>, ApiError> {
        self.get_json("/admin/pendingPolicies").await
    }

    pub async fn get_pending_claims(&self) -> Result<Vec<ClaimRecord>, ApiError> {
        self.get_json("/admin/pendingClaims").await
    }

    pub async fn approve_policy(&self, policy_id: i64, decision: bool) -> Result<Value, ApiError> {
        self.post_json(
            &format!("/admin/approvePolicy/{}", policy_id),
            &PolicyDecisionRequest { decision },
        )
        .await
    }

    pub async fn approve_claim(
        &self,
        claim_id: i64,
        decision: bool,
        rejection_reason: Option<String>,
    ) -> Result<Value, ApiError> {
        self.post_json(
            &format!("/admin/approveClaim/{}", claim_id),
            &ClaimDecisionRequest {
                decision,
                rejection_reason,
            },
        )
        .await
    }
}
