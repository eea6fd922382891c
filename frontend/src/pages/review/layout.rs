use crate::{
    api::use_api_client,
    state::auth::{self, use_auth},
    utils::navigation::redirect_to,
};
use leptos::*;

#[component]
pub fn ReviewHeader() -> impl IntoView {
    let (auth_state, set_auth) = use_auth();
    let api = use_api_client();
    let display_name = move || {
        auth_state
            .get()
            .user
            .map(|user| user.name)
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        auth::logout(&api, set_auth);
        redirect_to("/login");
    };

    view! {
        <header class="bg-white shadow-sm border-b border-gray-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-gray-900">"Claims Management"</h1>
                    <div class="flex items-center gap-4">
                        <span class="text-sm text-gray-600">
                            {move || format!("Welcome, {}", display_name())}
                        </span>
                        <button
                            type="button"
                            on:click=on_logout
                            class="px-3 py-2 rounded-md text-sm font-medium text-gray-600 hover:text-gray-900 hover:bg-gray-100"
                        >
                            "Logout"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn ReviewFrame(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <ReviewHeader />
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}
