use crate::{
    api::PendingPolicy,
    components::feedback::{EmptyState, LoadingSpinner},
    pages::review::utils::{display_id, payment_badge_class, status_badge_class},
    utils::time::{format_date, format_optional_date},
};
use leptos::*;

#[component]
fn PolicyCard(
    policy: PendingPolicy,
    disabled: Signal<bool>,
    on_decide: Callback<(i64, bool)>,
) -> impl IntoView {
    let id = policy.id;
    view! {
        <div class="bg-white shadow rounded-lg p-6">
            <div class="flex justify-between items-start">
                <div class="space-y-1">
                    <h3 class="text-lg font-semibold text-gray-900">{format!("Policy #{}", id)}</h3>
                    <p class="text-sm text-gray-600">{format!("User ID: {}", display_id(policy.user_id))}</p>
                    <p class="text-sm text-gray-600">{format!("Product ID: {}", policy.product_id)}</p>
                    <p class="text-sm text-gray-600">
                        {format!("Purchase Date: {}", format_date(&policy.purchase_date))}
                    </p>
                    <p class="text-sm text-gray-600">
                        {format!("Valid Until: {}", format_optional_date(policy.valid_until.as_ref()))}
                    </p>
                    <div class="flex gap-2 pt-2">
                        <span class=status_badge_class(&policy.status)>{policy.status.clone()}</span>
                        <span class=payment_badge_class(&policy.payment_status)>
                            {format!("Payment: {}", policy.payment_status)}
                        </span>
                    </div>
                </div>
                <div class="flex gap-2">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-green-500 text-white hover:bg-green-600 disabled:opacity-50"
                        disabled=move || disabled.get()
                        on:click=move |_| on_decide.call((id, true))
                    >
                        "Approve"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-red-500 text-white hover:bg-red-600 disabled:opacity-50"
                        disabled=move || disabled.get()
                        on:click=move |_| on_decide.call((id, false))
                    >
                        "Reject"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn PolicyList(
    policies: Signal<Vec<PendingPolicy>>,
    loading: Signal<bool>,
    disabled: Signal<bool>,
    on_decide: Callback<(i64, bool)>,
) -> impl IntoView {
    move || {
        if loading.get() {
            return view! { <LoadingSpinner /> }.into_view();
        }
        if policies.with(Vec::is_empty) {
            return view! { <EmptyState message="No pending policies to review" /> }.into_view();
        }
        view! {
            <div class="space-y-4">
                <For
                    each=move || policies.get()
                    key=|policy| policy.id
                    children=move |policy: PendingPolicy| {
                        view! { <PolicyCard policy=policy disabled=disabled on_decide=on_decide /> }
                    }
                />
            </div>
        }
        .into_view()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::PolicyRecord;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    fn render_list(records: serde_json::Value, loading: bool) -> String {
        let records: Vec<PolicyRecord> = serde_json::from_value(records).unwrap();
        let policies: Vec<PendingPolicy> = records
            .into_iter()
            .map(|record| PendingPolicy::try_from(record).unwrap())
            .collect();
        let html = render_to_string(move || {
            view! {
                <PolicyList
                    policies=Signal::derive(move || policies.clone())
                    loading=Signal::derive(move || loading)
                    disabled=Signal::derive(|| false)
                    on_decide=Callback::new(|_| {})
                />
            }
        });
        // SSR escapes `/` in text nodes.
        html.replace("&#x2F;", "/")
    }

    #[test]
    fn missing_valid_until_and_user_render_na() {
        let html = render_list(
            json!([{
                "id": 1,
                "user_id": null,
                "product_id": 5,
                "purchase_date": "2024-01-01",
                "valid_until": null,
                "status": "pending",
                "payment_status": "pending"
            }]),
            false,
        );
        assert!(html.contains("Policy #1"));
        assert!(html.contains("User ID: N/A"));
        assert!(html.contains("Product ID: 5"));
        assert!(html.contains("Purchase Date: 01/01/2024"));
        assert!(html.contains("Valid Until: N/A"));
        assert!(html.contains("Approve"));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render_list(json!([]), false);
        assert!(html.contains("No pending policies to review"));
    }

    #[test]
    fn loading_shows_spinner_only() {
        let html = render_list(json!([]), true);
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("No pending policies to review"));
    }
}
