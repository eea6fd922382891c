use leptos::*;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;

use crate::{
    api::types::ApiError,
    config,
    state::session::{use_session, SessionStore},
};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Per-call settings for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            headers: HeaderMap::new(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
            on_unauthorized: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session,
            on_unauthorized: None,
        }
    }

    /// Runs `handler` after a 401 has cleared the session.
    pub fn with_unauthorized_handler(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(handler));
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => config::await_api_base_url().await,
        }
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
        }
    }

    /// Sends one request to `path` under the API base URL and decodes the
    /// JSON response into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let base_url = self.resolved_base_url().await;
        let headers = merge_headers(&options.headers, self.session.token().as_deref())?;
        let mut builder = self
            .client
            .request(options.method, format!("{}{}", base_url, path))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            log::error!("API Error ({}): {}", path, err);
            ApiError::request_failed(format!("Request failed: {}", err))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            log::error!("API Error ({}): {}", path, err);
            ApiError::request_failed(format!("Failed to read response: {}", err))
        })?;

        if !status.is_success() {
            self.handle_unauthorized_status(status);
            let error = error_from_body(status, &body);
            log::error!("API Error ({}): {} {}", path, status.as_u16(), error.error);
            return Err(error);
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|err| {
            log::error!("API Error ({}): unexpected response shape: {}", path, err);
            ApiError::decode(format!("Unexpected response from {}: {}", path, err))
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::unknown(format!("Failed to encode request: {}", err)))?;
        self.request(path, RequestOptions::post(body)).await
    }
}

/// Caller headers first, then the computed content type and bearer token,
/// which always win.
pub(crate) fn merge_headers(caller: &HeaderMap, token: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = caller.clone();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::unknown("Invalid token format"))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

pub(crate) fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    ApiError::http(status.as_u16(), message)
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(use_session()))
}
