use crate::pages::admin_roster::utils::RosterTab;
use leptos::*;

#[component]
pub fn RosterTabs(active: RwSignal<RosterTab>) -> impl IntoView {
    view! {
        <nav class="flex gap-2 border-b border-border mb-4">
            {RosterTab::ALL
                .into_iter()
                .map(|tab| {
                    let class = move || {
                        if active.get() == tab {
                            "px-3 py-2 text-sm font-medium border-b-2 border-action-primary-bg text-fg"
                        } else {
                            "px-3 py-2 text-sm font-medium text-fg-muted hover:text-fg"
                        }
                    };
                    view! {
                        <button type="button" class=class on:click=move |_| active.set(tab)>
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
