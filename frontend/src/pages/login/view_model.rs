use super::utils::{self, LoginFormState};
use crate::api::{ApiError, LoginRequest};
use crate::state::auth;
use crate::utils::navigation::redirect_to;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    /// Returns false when the form was rejected before dispatch.
    pub fn submit(&self) -> bool {
        if self.login_action.pending().get_untracked() {
            return false;
        }
        let email = self.form.email.get_untracked();
        let password = self.form.password.get_untracked();
        if let Err(msg) = utils::validate_credentials(&email, &password) {
            self.error.set(Some(msg));
            return false;
        }
        self.error.set(None);
        self.login_action.dispatch(LoginRequest {
            email: email.trim().to_string(),
            password,
        });
        true
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                    redirect_to("/");
                }
                Err(err) => error.set(Some(err.error)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}
