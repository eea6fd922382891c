use crate::components::guard::RequireAdmin;
use leptos::*;

pub mod components;
pub mod layout;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::ReviewPanel;

#[component]
pub fn ReviewPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <ReviewDashboard />
        </RequireAdmin>
    }
}

#[component]
fn ReviewDashboard() -> impl IntoView {
    let vm = view_model::use_review_view_model();
    vm.start_polling();
    view! { <ReviewPanel vm=vm /> }
}
