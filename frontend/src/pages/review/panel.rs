use crate::{
    components::{notice::NoticeBanner, reason_dialog::ReasonDialog},
    pages::review::{
        components::{ClaimList, PolicyList, ReviewTabs},
        layout::ReviewFrame,
        utils::ReviewTab,
        view_model::ReviewViewModel,
    },
};
use leptos::*;

#[component]
pub fn ReviewPanel(vm: ReviewViewModel) -> impl IntoView {
    let state = vm.state;
    let policy_pending = vm.policy_action.pending();
    let claim_pending = vm.claim_action.pending();
    let dialog_open = Signal::derive(move || vm.rejecting_claim.get().is_some());
    let dialog_title = Signal::derive(move || {
        vm.rejecting_claim
            .get()
            .map(|id| format!("Reject claim #{}", id))
            .unwrap_or_default()
    });

    view! {
        <ReviewFrame>
            <NoticeBanner notice=state.notice />
            <ReviewTabs active=vm.active_tab />
            {move || match vm.active_tab.get() {
                ReviewTab::Policies => view! {
                    <PolicyList
                        policies=state.policies.into()
                        loading=state.policies_loading.into()
                        disabled=policy_pending.into()
                        on_decide=Callback::new(move |(id, approve): (i64, bool)| vm.decide_policy(id, approve))
                    />
                }
                .into_view(),
                ReviewTab::Claims => view! {
                    <ClaimList
                        claims=state.claims.into()
                        loading=state.claims_loading.into()
                        disabled=claim_pending.into()
                        on_approve=Callback::new(move |id: i64| vm.approve_claim(id))
                        on_reject=Callback::new(move |id: i64| vm.request_claim_rejection(id))
                    />
                }
                .into_view(),
            }}
            <ReasonDialog
                is_open=dialog_open
                title=dialog_title
                prompt="Please enter the reason for rejection:"
                reason=vm.rejection_reason
                error=vm.rejection_error.into()
                on_submit=Callback::new(move |_| vm.submit_claim_rejection())
                on_cancel=Callback::new(move |_| vm.cancel_claim_rejection())
                submit_disabled=claim_pending
            />
        </ReviewFrame>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::SessionStore;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn panel_starts_on_policies_tab_with_spinner() {
        let html = render_to_string(move || {
            provide_context(SessionStore::in_memory());
            let vm = ReviewViewModel::new();
            view! { <ReviewPanel vm=vm /> }
        });
        assert!(html.contains("Claims Management"));
        assert!(html.contains("Pending Policies"));
        assert!(html.contains("animate-spin"));
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn rejection_dialog_opens_for_selected_claim() {
        let html = render_to_string(move || {
            provide_context(SessionStore::in_memory());
            let vm = ReviewViewModel::new();
            vm.select_tab(ReviewTab::Claims);
            vm.request_claim_rejection(12);
            view! { <ReviewPanel vm=vm /> }
        });
        assert!(html.contains("Reject claim #12"));
        assert!(html.contains("decision-reason"));
    }
}
