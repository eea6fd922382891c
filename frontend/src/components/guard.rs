use crate::{
    api::{SessionUser, ADMIN_ROLE},
    state::{
        auth::use_auth,
        session::{use_session, SessionStore},
    },
    utils::navigation::redirect_to,
};
use leptos::*;

pub fn is_admin_user(user: &SessionUser) -> bool {
    user.role == ADMIN_ROLE
}

/// True iff a user record is stored and carries the admin role.
pub fn is_admin(session: &SessionStore) -> bool {
    session
        .current_user()
        .map(|user| is_admin_user(&user))
        .unwrap_or(false)
}

pub fn can_view_admin(session: &SessionStore) -> bool {
    session.is_valid() && is_admin(session)
}

/// Re-evaluated whenever the auth state changes (login, logout, 401).
pub fn use_admin_access() -> Memo<bool> {
    let session = use_session();
    let (auth, _) = use_auth();
    create_memo(move |_| {
        auth.track();
        can_view_admin(&session)
    })
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let allowed = use_admin_access();
    create_effect(move |_| {
        if !allowed.get() {
            redirect_to("/login");
        }
    });
    view! {
        <Show when=move || allowed.get() fallback=|| ()>
            {children()}
        </Show>
    }
}
