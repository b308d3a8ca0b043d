use crate::{
    api::ApiError,
    pages::admin_roster::utils::AddAdminFormState,
};
use leptos::{ev, *};

#[component]
pub fn AddAdminModal(
    open: RwSignal<bool>,
    form_state: RwSignal<AddAdminFormState>,
    add_action: Action<(), Result<(), ApiError>>,
) -> impl IntoView {
    let pending = add_action.pending();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        add_action.dispatch(());
    };

    view! {
        <Show when=move || open.get()>
            <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-medium text-fg">{"Add New Admin"}</h2>
                    <button
                        type="button"
                        class="text-sm text-fg-muted hover:text-fg"
                        on:click=move |_| open.set(false)
                    >
                        {"Close"}
                    </button>
                </div>
                <form class="grid grid-cols-1 md:grid-cols-2 gap-4" on:submit=on_submit>
                    <div>
                        <label class="block text-sm font-medium text-fg" for="email">{"Email"}</label>
                        <input
                            id="email"
                            type="email"
                            required
                            class="mt-1 w-full border rounded px-2 py-1"
                            prop:value=move || form_state.get().email
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form_state.update(|state| state.email = value);
                            }
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-fg" for="firstName">{"First Name"}</label>
                        <input
                            id="firstName"
                            required
                            class="mt-1 w-full border rounded px-2 py-1"
                            prop:value=move || form_state.get().first_name
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form_state.update(|state| state.first_name = value);
                            }
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-fg" for="lastName">{"Last Name"}</label>
                        <input
                            id="lastName"
                            required
                            class="mt-1 w-full border rounded px-2 py-1"
                            prop:value=move || form_state.get().last_name
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form_state.update(|state| state.last_name = value);
                            }
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-fg" for="photoURL">{"Photo URL (optional)"}</label>
                        <input
                            id="photoURL"
                            class="mt-1 w-full border rounded px-2 py-1"
                            prop:value=move || form_state.get().photo_url
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form_state.update(|state| state.photo_url = value);
                            }
                        />
                    </div>
                    <div class="md:col-span-2">
                        <button
                            type="submit"
                            disabled=move || pending.get()
                            class="px-4 py-2 bg-action-primary-bg text-action-primary-text rounded disabled:opacity-50"
                        >
                            {move || if pending.get() { "Adding Admin..." } else { "Add Admin" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
