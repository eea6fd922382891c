use crate::{
    api::PendingClaim,
    components::feedback::{EmptyState, LoadingSpinner},
    pages::review::utils::{display_id, format_amount, status_badge_class},
    utils::time::format_date,
};
use leptos::*;

#[component]
fn ClaimCard(
    claim: PendingClaim,
    disabled: Signal<bool>,
    on_approve: Callback<i64>,
    on_reject: Callback<i64>,
) -> impl IntoView {
    let id = claim.id;
    view! {
        <div class="bg-white shadow rounded-lg p-6">
            <div class="flex justify-between items-start">
                <div class="space-y-1">
                    <h3 class="text-lg font-semibold text-gray-900">{format!("Claim #{}", id)}</h3>
                    <p class="text-sm text-gray-600">{format!("User ID: {}", display_id(claim.user_id))}</p>
                    <p class="text-sm text-gray-600">{format!("Product ID: {}", claim.product_id)}</p>
                    <p class="text-sm text-gray-600">
                        {format!("Claim Amount: {}", format_amount(claim.claim_amount))}
                    </p>
                    <p class="text-sm text-gray-600">
                        {format!("Filed: {}", format_date(&claim.created_at))}
                    </p>
                    <div class="pt-2">
                        <span class=status_badge_class(&claim.status)>{claim.status.clone()}</span>
                    </div>
                </div>
                <div class="flex gap-2">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-green-500 text-white hover:bg-green-600 disabled:opacity-50"
                        disabled=move || disabled.get()
                        on:click=move |_| on_approve.call(id)
                    >
                        "Approve"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 rounded-md text-sm font-semibold bg-red-500 text-white hover:bg-red-600 disabled:opacity-50"
                        disabled=move || disabled.get()
                        on:click=move |_| on_reject.call(id)
                    >
                        "Reject"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ClaimList(
    claims: Signal<Vec<PendingClaim>>,
    loading: Signal<bool>,
    disabled: Signal<bool>,
    on_approve: Callback<i64>,
    on_reject: Callback<i64>,
) -> impl IntoView {
    move || {
        if loading.get() {
            return view! { <LoadingSpinner /> }.into_view();
        }
        if claims.with(Vec::is_empty) {
            return view! { <EmptyState message="No pending claims to review" /> }.into_view();
        }
        view! {
            <div class="space-y-4">
                <For
                    each=move || claims.get()
                    key=|claim| claim.id
                    children=move |claim: PendingClaim| {
                        view! {
                            <ClaimCard
                                claim=claim
                                disabled=disabled
                                on_approve=on_approve
                                on_reject=on_reject
                            />
                        }
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
    use crate::api::ClaimRecord;
    use crate::test_support::helpers::claim_json;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    fn render_claims(records: serde_json::Value) -> String {
        let records: Vec<ClaimRecord> = serde_json::from_value(records).unwrap();
        let claims: Vec<PendingClaim> = records
            .into_iter()
            .map(|record| PendingClaim::try_from(record).unwrap())
            .collect();
        render_to_string(move || {
            view! {
                <ClaimList
                    claims=Signal::derive(move || claims.clone())
                    loading=Signal::derive(|| false)
                    disabled=Signal::derive(|| true)
                    on_approve=Callback::new(|_| {})
                    on_reject=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn claim_card_shows_grouped_amount() {
        let mut record = claim_json(3);
        record["claim_amount"] = json!(1500);
        let html = render_claims(json!([record]));
        assert!(html.contains("Claim #3"));
        assert!(html.contains("Claim Amount: ₹1,500"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn empty_claims_show_empty_state() {
        let html = render_claims(json!([]));
        assert!(html.contains("No pending claims to review"));
    }
}
