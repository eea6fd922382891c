use crate::pages::review::utils::ReviewTab;
use leptos::*;

fn tab_class(selected: bool) -> &'static str {
    if selected {
        "px-4 py-2 text-sm font-medium border-b-2 border-blue-500 text-blue-600"
    } else {
        "px-4 py-2 text-sm font-medium border-b-2 border-transparent text-gray-500 hover:text-gray-700"
    }
}

#[component]
pub fn ReviewTabs(active: RwSignal<ReviewTab>) -> impl IntoView {
    let tab_button = move |tab: ReviewTab| {
        view! {
            <button
                type="button"
                role="tab"
                aria-selected=move || (active.get() == tab).to_string()
                class=move || tab_class(active.get() == tab)
                on:click=move |_| active.set(tab)
            >
                {tab.label()}
            </button>
        }
    };

    view! {
        <div class="flex border-b border-gray-200 mb-6" role="tablist">
            {tab_button(ReviewTab::Policies)}
            {tab_button(ReviewTab::Claims)}
        </div>
    }
}
