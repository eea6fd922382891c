use crate::api::{use_api_client, ApiError, PendingClaim, PendingItem, PendingPolicy};
use crate::components::notice::Notice;
use crate::config;
use crate::pages::review::{
    repository::{validate_rejection_reason, DecisionOutcome, ReviewRepository},
    utils::{remove_pending, BrowserTimer, FetchSequencer, PollGuard, PollTimer, ReviewTab},
};
use leptos::*;
use std::{future::Future, rc::Rc, time::Duration};

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimDecision {
    pub id: i64,
    pub approve: bool,
    pub reason: String,
}

/// Both pending lists plus the bookkeeping that keeps them consistent
/// with the backend.
#[derive(Clone, Copy)]
pub struct ReviewState {
    pub policies: RwSignal<Vec<PendingPolicy>>,
    pub claims: RwSignal<Vec<PendingClaim>>,
    pub policies_loading: RwSignal<bool>,
    pub claims_loading: RwSignal<bool>,
    pub notice: RwSignal<Option<Notice>>,
    policy_fetches: StoredValue<FetchSequencer>,
    claim_fetches: StoredValue<FetchSequencer>,
}

impl ReviewState {
    pub fn new() -> Self {
        Self {
            policies: create_rw_signal(Vec::new()),
            claims: create_rw_signal(Vec::new()),
            policies_loading: create_rw_signal(true),
            claims_loading: create_rw_signal(true),
            notice: create_rw_signal(None),
            policy_fetches: store_value(FetchSequencer::new()),
            claim_fetches: store_value(FetchSequencer::new()),
        }
    }

    pub fn begin_policy_fetch(&self) -> u64 {
        self.policy_fetches.with_value(FetchSequencer::begin)
    }

    pub fn begin_claim_fetch(&self) -> u64 {
        self.claim_fetches.with_value(FetchSequencer::begin)
    }

    /// Returns false when the result was stale and dropped.
    pub fn apply_policies(&self, ticket: u64, result: Result<Vec<PendingPolicy>, ApiError>) -> bool {
        apply_list(
            self.policy_fetches,
            self.policies,
            self.policies_loading,
            self.notice,
            ticket,
            result,
        )
    }

    pub fn apply_claims(&self, ticket: u64, result: Result<Vec<PendingClaim>, ApiError>) -> bool {
        apply_list(
            self.claim_fetches,
            self.claims,
            self.claims_loading,
            self.notice,
            ticket,
            result,
        )
    }

    pub fn apply_policy_decision(&self, id: i64, result: &Result<DecisionOutcome, ApiError>) {
        apply_decision(self.policy_fetches, self.policies, self.notice, id, result);
    }

    pub fn apply_claim_decision(&self, id: i64, result: &Result<DecisionOutcome, ApiError>) {
        apply_decision(self.claim_fetches, self.claims, self.notice, id, result);
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_list<T: 'static>(
    fetches: StoredValue<FetchSequencer>,
    list: RwSignal<Vec<T>>,
    loading: RwSignal<bool>,
    notice: RwSignal<Option<Notice>>,
    ticket: u64,
    result: Result<Vec<T>, ApiError>,
) -> bool {
    if !fetches.with_value(|seq| seq.is_current(ticket)) {
        log::debug!("Dropping stale fetch result (ticket {})", ticket);
        return false;
    }
    match result {
        Ok(items) => list.set(items),
        Err(err) => {
            log::error!("Error fetching data: {}", err);
            notice.set(Some(Notice::error(format!("Failed to load data: {}", err.error))));
        }
    }
    loading.set(false);
    true
}

fn apply_decision<T: PendingItem + 'static>(
    fetches: StoredValue<FetchSequencer>,
    list: RwSignal<Vec<T>>,
    notice: RwSignal<Option<Notice>>,
    id: i64,
    result: &Result<DecisionOutcome, ApiError>,
) {
    match result {
        Ok(outcome) => {
            // A fetch started before the decision may still list the item.
            fetches.with_value(FetchSequencer::invalidate);
            list.update(|items| {
                remove_pending(items, id);
            });
            notice.set(Some(Notice::success(outcome.message.clone())));
        }
        Err(err) => {
            log::error!("Decision for item {} failed: {}", id, err);
            notice.set(Some(Notice::error(err.error.clone())));
        }
    }
}

#[derive(Clone, Copy)]
pub struct ReviewViewModel {
    pub state: ReviewState,
    pub active_tab: RwSignal<ReviewTab>,
    pub rejecting_claim: RwSignal<Option<i64>>,
    pub rejection_reason: RwSignal<String>,
    pub rejection_error: RwSignal<Option<String>>,
    pub policy_action: Action<(i64, bool), Result<DecisionOutcome, ApiError>>,
    pub claim_action: Action<ClaimDecision, Result<DecisionOutcome, ApiError>>,
    repository: StoredValue<ReviewRepository>,
}

impl ReviewViewModel {
    pub fn new() -> Self {
        let repository = ReviewRepository::new_with_client(Rc::new(use_api_client()));
        let state = ReviewState::new();

        let repo = repository.clone();
        let policy_action = create_action(move |(id, approve): &(i64, bool)| {
            let repo = repo.clone();
            let (id, approve) = (*id, *approve);
            async move {
                let result = repo.decide_policy(id, approve).await;
                state.apply_policy_decision(id, &result);
                result
            }
        });

        let repo = repository.clone();
        let claim_action = create_action(move |decision: &ClaimDecision| {
            let repo = repo.clone();
            let decision = decision.clone();
            async move {
                let result = repo
                    .decide_claim(decision.id, decision.approve, &decision.reason)
                    .await;
                state.apply_claim_decision(decision.id, &result);
                result
            }
        });

        Self {
            state,
            active_tab: create_rw_signal(ReviewTab::default()),
            rejecting_claim: create_rw_signal(None),
            rejection_reason: create_rw_signal(String::new()),
            rejection_error: create_rw_signal(None),
            policy_action,
            claim_action,
            repository: store_value(repository),
        }
    }

    /// Loads both lists once and applies whatever is still current.
    pub async fn reload(&self) {
        let state = self.state;
        let repository = self.repository.get_value();
        let policy_ticket = state.begin_policy_fetch();
        let claim_ticket = state.begin_claim_fetch();
        let (policies, claims) = repository.load_all().await;
        state.apply_policies(policy_ticket, policies);
        state.apply_claims(claim_ticket, claims);
    }

    pub fn refresh(&self) {
        let vm = *self;
        spawn_local(async move { vm.reload().await });
    }

    /// Loads on mount, then again every configured poll interval until
    /// the owner is cleaned up.
    pub fn start_polling(&self) {
        let vm = *self;
        create_effect(move |_| {
            let guard = vm.start_polling_with(BrowserTimer, async {
                config::init().await;
                config::poll_interval()
            });
            on_cleanup(move || guard.stop());
        });
    }

    /// Loads immediately; the timer is created once `period` resolves.
    pub fn start_polling_with<T, P>(&self, timer: T, period: P) -> PollGuard
    where
        T: PollTimer + 'static,
        P: Future<Output = Duration> + 'static,
    {
        let vm = *self;
        let guard = PollGuard::default();
        vm.refresh();

        let task_guard = guard.clone();
        spawn_local(async move {
            let period = period.await;
            if !task_guard.is_active() {
                return;
            }
            log::debug!("Polling pending items every {:?}", period);
            let tick_guard = task_guard.clone();
            let handle = timer.every(
                period,
                Box::new(move || {
                    if tick_guard.is_active() {
                        vm.refresh();
                    }
                }),
            );
            task_guard.hold(handle);
        });
        guard
    }

    pub fn select_tab(&self, tab: ReviewTab) {
        self.active_tab.set(tab);
    }

    pub fn decide_policy(&self, id: i64, approve: bool) {
        if self.policy_action.pending().get_untracked() {
            return;
        }
        self.state.notice.set(None);
        self.policy_action.dispatch((id, approve));
    }

    pub fn approve_claim(&self, id: i64) {
        if self.claim_action.pending().get_untracked() {
            return;
        }
        self.state.notice.set(None);
        self.claim_action.dispatch(ClaimDecision {
            id,
            approve: true,
            reason: String::new(),
        });
    }

    pub fn request_claim_rejection(&self, id: i64) {
        self.rejection_reason.set(String::new());
        self.rejection_error.set(None);
        self.rejecting_claim.set(Some(id));
    }

    pub fn cancel_claim_rejection(&self) {
        self.rejecting_claim.set(None);
        self.rejection_error.set(None);
    }

    /// Validates the reason locally; only a non-blank reason is dispatched.
    pub fn submit_claim_rejection(&self) {
        let Some(id) = self.rejecting_claim.get_untracked() else {
            return;
        };
        if self.claim_action.pending().get_untracked() {
            return;
        }
        match validate_rejection_reason(&self.rejection_reason.get_untracked()) {
            Err(err) => self.rejection_error.set(Some(err.error)),
            Ok(reason) => {
                self.cancel_claim_rejection();
                self.state.notice.set(None);
                self.claim_action.dispatch(ClaimDecision {
                    id,
                    approve: false,
                    reason,
                });
            }
        }
    }
}

impl Default for ReviewViewModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_review_view_model() -> ReviewViewModel {
    match use_context::<ReviewViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = ReviewViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
