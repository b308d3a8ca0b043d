use super::utils::RosterTab;
use leptos::*;

#[component]
pub fn AdminRosterFrame(
    active_tab: Signal<RosterTab>,
    add_open: Signal<bool>,
    loading: Signal<bool>,
    on_open_add: Callback<()>,
    on_refresh: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <div class="flex flex-col gap-3 md:flex-row md:items-center md:justify-between">
                <h1 class="text-2xl font-bold text-fg">
                    {move || format!("Admin Page/{}", active_tab.get().label())}
                </h1>
                <div class="flex items-center gap-2">
                    <Show when=move || !add_open.get()>
                        <button
                            type="button"
                            class="px-4 py-2 text-sm rounded bg-action-primary-bg text-action-primary-text"
                            on:click=move |_| on_open_add.call(())
                        >
                            {"Add Admins"}
                        </button>
                    </Show>
                    <button
                        type="button"
                        class="px-4 py-2 text-sm rounded border border-border disabled:opacity-50"
                        aria-label="Refresh admins"
                        disabled=move || loading.get()
                        on:click=move |_| on_refresh.call(())
                    >
                        {move || if loading.get() { "Loading..." } else { "🔄" }}
                    </button>
                </div>
            </div>
            {children()}
        </div>
    }
}
