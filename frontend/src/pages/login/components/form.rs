use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    email: Signal<String>,
    password: Signal<String>,
    error: Signal<Option<String>>,
    pending: Signal<bool>,
    on_email_input: Callback<String>,
    on_password_input: Callback<String>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                        {"Admin Login"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-gray-600">
                        {"Claims Management"}
                    </p>
                </div>
                <form class="mt-8 space-y-6" on:submit=move |ev| on_submit.call(ev)>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="email" class="sr-only">{"Email"}</label>
                            <input
                                id="email"
                                name="email"
                                type="email"
                                autocomplete="username"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-gray-300 placeholder-gray-500 text-gray-900 rounded-t-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 focus:z-10 sm:text-sm"
                                placeholder="Email"
                                prop:value=move || email.get()
                                on:input=move |ev| on_email_input.call(event_target_value(&ev))
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">{"Password"}</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-gray-300 placeholder-gray-500 text-gray-900 rounded-b-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 focus:z-10 sm:text-sm"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| on_password_input.call(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    {move || error.get().map(|msg| view! {
                        <div class="bg-red-50 border border-red-200 text-red-800 px-4 py-3 rounded" role="alert">
                            {msg}
                        </div>
                    })}

                    <div>
                        <button
                            type="submit"
                            disabled=move || pending.get()
                            class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-white bg-blue-600 hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-blue-500 disabled:opacity-50"
                        >
                            {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_fields_and_error() {
        let html = render_to_string(move || {
            view! {
                <LoginForm
                    email=Signal::derive(|| "admin@example.com".to_string())
                    password=Signal::derive(String::new)
                    error=Signal::derive(|| Some("Invalid credentials".to_string()))
                    pending=Signal::derive(|| false)
                    on_email_input=Callback::new(|_| {})
                    on_password_input=Callback::new(|_| {})
                    on_submit=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("id=\"email\""));
        assert!(html.contains("id=\"password\""));
        assert!(html.contains("Invalid credentials"));
        assert!(html.contains("Sign in"));
    }
}
