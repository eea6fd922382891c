use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    pages::{login::LoginPage, review::ReviewPage},
    state::{auth::AuthProvider, session::SessionStore},
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login"];

pub fn mount_app() {
    mount_to_body(|| app_root(SessionStore::browser()));
}

/// Installs the session and API client contexts and the route table.
pub fn app_root(session: SessionStore) -> impl IntoView {
    provide_meta_context();
    provide_context(session.clone());
    provide_context(ApiClient::new(session));
    view! {
        <Title text="Claims Management" />
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ReviewPage/>
                    <Route path="/login" view=LoginPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
