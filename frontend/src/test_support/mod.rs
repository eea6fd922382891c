#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::SessionUser;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use serde_json::{json, Value};

    pub fn admin_user() -> SessionUser {
        SessionUser {
            id: 1,
            name: "Asha Admin".into(),
            role: "admin".into(),
        }
    }

    pub fn regular_user() -> SessionUser {
        SessionUser {
            id: 2,
            name: "Ravi Customer".into(),
            role: "customer".into(),
        }
    }

    /// Unsigned JWT-shaped token carrying `claims` as its payload.
    pub fn token_with_claims(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    pub fn token_expiring_at(exp: i64) -> String {
        token_with_claims(json!({ "id": 1, "role": "admin", "exp": exp }))
    }

    /// Expires 2100-01-01.
    pub fn far_future_token() -> String {
        token_expiring_at(4_102_444_800)
    }

    pub fn policy_json(id: i64) -> Value {
        json!({
            "id": id,
            "user_id": 10 + id,
            "product_id": 5,
            "purchase_date": "2024-01-01T10:30:00.000Z",
            "valid_until": "2025-01-01T00:00:00.000Z",
            "cancellation_date": null,
            "status": "pending",
            "approved_by": null,
            "approved_at": null,
            "payment_status": "pending"
        })
    }

    pub fn claim_json(id: i64) -> Value {
        json!({
            "id": id,
            "user_id": 10 + id,
            "product_id": 3,
            "claim_amount": "2500.00",
            "status": "pending",
            "created_at": "2024-03-15T08:00:00.000Z"
        })
    }
}
