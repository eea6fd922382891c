use crate::api::ApiError;
use gloo_timers::callback::Timeout;
use leptos::*;
use std::{cell::RefCell, rc::Rc};

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient, dismissible feedback shown above the dashboard lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

impl From<ApiError> for Notice {
    fn from(error: ApiError) -> Self {
        Self::error(error.error)
    }
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => {
            "flex items-start justify-between gap-3 bg-green-50 border border-green-200 text-green-800 px-4 py-3 rounded-lg mb-4"
        }
        NoticeKind::Error => {
            "flex items-start justify-between gap-3 bg-red-50 border border-red-200 text-red-800 px-4 py-3 rounded-lg mb-4"
        }
    }
}

/// Clears `notice` only if it still shows `shown`; a newer notice stays.
pub fn dismiss_if_current(notice: RwSignal<Option<Notice>>, shown: &Notice) -> bool {
    if notice.get_untracked().as_ref() == Some(shown) {
        notice.set(None);
        true
    } else {
        false
    }
}

#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let pending = Rc::new(RefCell::new(None::<Timeout>));
    let slot = pending.clone();
    create_effect(move |_| {
        if let Some(current) = notice.get() {
            // Replacing the handle cancels the previous countdown.
            let timeout = Timeout::new(AUTO_DISMISS_MS, move || {
                dismiss_if_current(notice, &current);
            });
            slot.borrow_mut().replace(timeout);
        }
    });
    on_cleanup(move || {
        pending.borrow_mut().take();
    });

    view! {
        <div aria-live="polite">
            {move || notice.get().map(|current| view! {
                <div class=notice_class(current.kind) role="status">
                    <p class="text-sm">{current.message}</p>
                    <button
                        type="button"
                        aria-label="Dismiss"
                        class="text-sm opacity-70 hover:opacity-100"
                        on:click=move |_| notice.set(None)
                    >
                        {"✕"}
                    </button>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn dismiss_clears_only_the_notice_it_was_scheduled_for() {
        with_runtime(|| {
            let first = Notice::success("Policy approved successfully");
            let second = Notice::error("Server exploded");
            let notice = create_rw_signal(Some(second.clone()));

            assert!(!dismiss_if_current(notice, &first));
            assert_eq!(notice.get_untracked(), Some(second.clone()));

            assert!(dismiss_if_current(notice, &second));
            assert_eq!(notice.get_untracked(), None);
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_error_notice_text() {
        let html = render_to_string(move || {
            let notice = create_rw_signal(Some(Notice::from(ApiError::validation(
                "Rejection reason is required",
            ))));
            view! { <NoticeBanner notice=notice /> }
        });
        assert!(html.contains("Rejection reason is required"));
        assert!(html.contains("bg-red-50"));
    }

    #[test]
    fn renders_nothing_without_notice() {
        let html = render_to_string(move || {
            let notice = create_rw_signal(None::<Notice>);
            view! { <NoticeBanner notice=notice /> }
        });
        assert!(!html.contains("role=\"status\""));
    }
}
