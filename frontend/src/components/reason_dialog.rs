use leptos::ev::KeyboardEvent;
use leptos::*;

/// Modal asking for a free-text reason before a destructive decision.
#[component]
pub fn ReasonDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] prompt: MaybeSignal<String>,
    reason: RwSignal<String>,
    error: Signal<Option<String>>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] submit_disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let cancel_on_backdrop = on_cancel;
    let cancel_on_esc = on_cancel;
    let cancel_on_footer_button = on_cancel;
    let title = Signal::derive(move || title.get());
    let prompt = Signal::derive(move || prompt.get());
    let submit_disabled = Signal::derive(move || submit_disabled.get());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-black/40"
                    on:click=move |_| cancel_on_backdrop.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-xl bg-white shadow-xl p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            cancel_on_esc.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-gray-900">{move || title.get()}</h2>
                    <label for="decision-reason" class="block text-sm text-gray-600">
                        {move || prompt.get()}
                    </label>
                    <textarea
                        id="decision-reason"
                        rows="3"
                        class="w-full rounded-md border border-gray-300 p-2 text-sm"
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    ></textarea>
                    {move || error.get().map(|msg| view! {
                        <p class="text-sm text-red-600">{msg}</p>
                    })}
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="px-4 py-2 rounded-md text-sm font-semibold bg-gray-100 text-gray-700 hover:bg-gray-200"
                            on:click=move |_| cancel_on_footer_button.call(())
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="button"
                            class="px-4 py-2 rounded-md text-sm font-semibold bg-red-500 text-white hover:bg-red-600 disabled:opacity-50"
                            disabled=move || submit_disabled.get()
                            on:click=move |_| on_submit.call(())
                        >
                            {"Reject"}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn open_dialog_renders_prompt_and_error() {
        let html = render_to_string(move || {
            let reason = create_rw_signal(String::new());
            view! {
                <ReasonDialog
                    is_open=Signal::derive(|| true)
                    title="Reject claim #3"
                    prompt="Please enter the reason for rejection:"
                    reason=reason
                    error=Signal::derive(|| Some("Rejection reason is required".to_string()))
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Reject claim #3"));
        assert!(html.contains("Please enter the reason for rejection:"));
        assert!(html.contains("Rejection reason is required"));
    }

    #[test]
    fn closed_dialog_renders_nothing() {
        let html = render_to_string(move || {
            let reason = create_rw_signal(String::new());
            view! {
                <ReasonDialog
                    is_open=Signal::derive(|| false)
                    title="Reject"
                    prompt="Why?"
                    reason=reason
                    error=Signal::derive(|| None)
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(!html.contains("role=\"dialog\""));
    }
}
