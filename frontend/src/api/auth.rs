use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, LoginResponse, SessionUser},
};

impl ApiClient {
    /// Authenticates and persists the returned token and user.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionUser, ApiError> {
        let response: LoginResponse = self.post_json("/auth/login", &request).await?;
        let user = response
            .user
            .filter(|user| !user.role.trim().is_empty())
            .ok_or_else(|| ApiError::decode("Invalid user data received"))?;
        if response.token.trim().is_empty() {
            return Err(ApiError::decode("Invalid user data received"));
        }
        self.session().save(&response.token, &user)?;
        log::info!("Signed in as user {}", user.id);
        Ok(user)
    }

    /// Logout is client-side only; the backend keeps no session.
    pub fn logout(&self) {
        self.session().clear();
    }
}
