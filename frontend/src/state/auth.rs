use crate::{
    api::{use_api_client, ApiClient, ApiError, LoginRequest, SessionUser},
    state::session::{use_session, SessionStore},
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// Snapshot of the session store. An expired or malformed token
    /// destroys the stored session.
    pub fn from_session(session: &SessionStore) -> Self {
        if session.is_valid() {
            Self {
                user: session.current_user(),
                is_authenticated: true,
            }
        } else {
            if session.token().is_some() {
                log::info!("Stored session expired; signing out");
                session.clear();
            }
            Self::default()
        }
    }
}

fn create_auth_context() -> AuthContext {
    let session = use_session();
    create_signal(AuthState::from_session(&session))
}

/// Provides the auth signals and re-provides the API client so that a 401
/// from any endpoint signs the user out.
pub fn provide_auth_context() -> AuthContext {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    let (_, set_auth) = ctx;
    let api = use_api_client().with_unauthorized_handler(move || {
        log::info!("Session rejected by the API; signing out");
        set_auth.set(AuthState::default());
    });
    provide_context(api);
    ctx
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    provide_auth_context();
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(create_auth_context)
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let user = api.login(request).await?;
    set_auth_state.set(AuthState {
        user: Some(user),
        is_authenticated: true,
    });
    Ok(())
}

pub fn logout(api: &ApiClient, set_auth_state: WriteSignal<AuthState>) {
    api.logout();
    set_auth_state.set(AuthState::default());
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, far_future_token, token_expiring_at};
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn use_auth_without_provider_reads_empty_session() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[test]
    fn valid_session_is_authenticated() {
        let session = SessionStore::in_memory();
        session.save(&far_future_token(), &admin_user()).unwrap();
        let state = AuthState::from_session(&session);
        assert!(state.is_authenticated);
        assert_eq!(state.user, Some(admin_user()));
    }

    #[test]
    fn expired_session_is_cleared() {
        let session = SessionStore::in_memory();
        session.save(&token_expiring_at(1), &admin_user()).unwrap();
        let state = AuthState::from_session(&session);
        assert_eq!(state, AuthState::default());
        assert!(session.token().is_none());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn logout_clears_store_and_state() {
        with_runtime(|| {
            let session = SessionStore::in_memory();
            session.save(&far_future_token(), &admin_user()).unwrap();
            let api = ApiClient::new_with_base_url("http://unused", session.clone());
            let (state, set_state) = create_signal(AuthState::from_session(&session));
            assert!(state.get_untracked().is_authenticated);

            logout(&api, set_state);

            assert!(!state.get_untracked().is_authenticated);
            assert!(session.token().is_none());
        });
    }
}
