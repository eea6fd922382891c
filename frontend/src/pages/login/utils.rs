use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    Ok(())
}
