use crate::{
    api::AdminRecord,
    components::{empty_state::EmptyState, layout::LoadingSpinner},
    pages::admin_roster::utils::photo_or_placeholder,
};
use leptos::*;

#[component]
pub fn AdminList(
    admins: Signal<Vec<AdminRecord>>,
    loading: Signal<bool>,
    on_edit: Callback<AdminRecord>,
    on_remove: Callback<AdminRecord>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <Show when=move || loading.get() && admins.get().is_empty()>
                <LoadingSpinner />
            </Show>
            <Show when=move || !loading.get() && admins.get().is_empty()>
                <EmptyState
                    title="No admins found."
                    description="Use Add Admins to grant admin access to an account."
                />
            </Show>
            <ul class="divide-y divide-border">
                <For
                    each=move || admins.get()
                    key=|admin: &AdminRecord| admin.uid.clone()
                    children=move |admin: AdminRecord| {
                        let edit_target = admin.clone();
                        let remove_target = admin.clone();
                        let name = admin.display_name();
                        view! {
                            <li class="flex items-center justify-between gap-4 py-4">
                                <div class="flex items-center gap-3">
                                    <img
                                        class="h-12 w-12 rounded-full object-cover"
                                        src=photo_or_placeholder(&admin)
                                        alt=name.clone()
                                    />
                                    <div>
                                        <p class="text-sm font-semibold text-fg">{name}</p>
                                        <p class="text-sm text-fg-muted">{admin.email.clone()}</p>
                                        <p class="text-xs text-fg-muted">{admin.uid.clone()}</p>
                                    </div>
                                </div>
                                <div class="flex flex-col gap-2">
                                    <button
                                        type="button"
                                        class="px-3 py-1 text-sm rounded border border-border hover:bg-surface-muted disabled:opacity-50"
                                        disabled=move || loading.get()
                                        on:click=move |_| on_edit.call(edit_target.clone())
                                    >
                                        {"Update"}
                                    </button>
                                    <button
                                        type="button"
                                        class="px-3 py-1 text-sm rounded bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50"
                                        disabled=move || loading.get()
                                        on:click=move |_| on_remove.call(remove_target.clone())
                                    >
                                        {"Remove"}
                                    </button>
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
