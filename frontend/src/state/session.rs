use base64::{
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine as _,
};
use chrono::{DateTime, Utc};
use leptos::*;
use serde_json::Value;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{ApiError, SessionUser};
use crate::utils::storage::{BrowserStorage, KeyValueStore, MemoryStorage};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token does not have three segments")]
    Shape,
    #[error("token payload is not base64")]
    Encoding,
    #[error("token payload is not a JSON object")]
    Payload,
    #[error("token has no numeric exp claim")]
    MissingExpiry,
}

/// Reads the `exp` claim (seconds since epoch) without verifying the
/// signature; the backend stays the authority on token validity.
pub fn token_expiry(token: &str) -> Result<f64, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Shape);
    }
    let payload = segments[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|_| TokenError::Encoding)?;
    let claims: Value = serde_json::from_slice(&decoded).map_err(|_| TokenError::Payload)?;
    claims
        .as_object()
        .ok_or(TokenError::Payload)?
        .get("exp")
        .and_then(Value::as_f64)
        .ok_or(TokenError::MissingExpiry)
}

/// Persisted authentication state: bearer token plus the signed-in user.
///
/// Handles are cheap to clone and share one backend. Nothing is cached in
/// memory; every accessor reads the backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Browser storage in the wasm build, an in-memory map on the host.
    pub fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }

    /// Writes token and user together. A partial write is rolled back.
    pub fn save(&self, token: &str, user: &SessionUser) -> Result<(), ApiError> {
        let user_json = serde_json::to_string(user)
            .map_err(|_| ApiError::unknown("Failed to serialize user profile"))?;
        let stored = self
            .backend
            .set_item(TOKEN_KEY, token)
            .and_then(|_| self.backend.set_item(USER_KEY, &user_json));
        if let Err(err) = stored {
            self.clear();
            return Err(ApiError::unknown(err));
        }
        Ok(())
    }

    pub fn clear(&self) {
        self.backend.remove_item(TOKEN_KEY);
        self.backend.remove_item(USER_KEY);
    }

    pub fn token(&self) -> Option<String> {
        self.backend
            .get_item(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        let raw = self.backend.get_item(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match token_expiry(&token) {
            Ok(exp) => exp * 1000.0 > now.timestamp_millis() as f64,
            Err(err) => {
                log::debug!("Stored token rejected: {}", err);
                false
            }
        }
    }
}

pub fn use_session() -> SessionStore {
    match use_context::<SessionStore>() {
        Some(session) => session,
        None => {
            let session = SessionStore::platform_default();
            provide_context(session.clone());
            session
        }
    }
}
