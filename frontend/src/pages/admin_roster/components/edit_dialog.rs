use crate::{
    api::ApiError,
    components::layout::ErrorMessage,
    pages::admin_roster::utils::{MessageState, UpdateAdminDraft},
};
use leptos::{ev, *};

/// Collects new name and photo values for one admin. Closing the dialog
/// without saving sends nothing.
#[component]
pub fn UpdateAdminDialog(
    draft: RwSignal<Option<UpdateAdminDraft>>,
    messages: RwSignal<MessageState>,
    update_action: Action<UpdateAdminDraft, Result<(), ApiError>>,
) -> impl IntoView {
    let pending = update_action.pending();
    let close = move |_: ev::MouseEvent| draft.set(None);
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(current) = draft.get_untracked() {
            update_action.dispatch(current);
        }
    };
    let edit = move |apply: fn(&mut UpdateAdminDraft, String)| {
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            draft.update(|state| {
                if let Some(state) = state.as_mut() {
                    apply(state, value);
                }
            });
        }
    };
    let field = move |read: fn(&UpdateAdminDraft) -> String| {
        move || draft.with(|state| state.as_ref().map(read).unwrap_or_default())
    };

    view! {
        <Show when=move || draft.get().is_some()>
            <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                <div class="absolute inset-0 bg-overlay-backdrop" on:click=close></div>
                <div
                    class="relative w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                >
                    <h2 class="text-lg font-semibold text-fg">{"Update Admin"}</h2>
                    <p class="text-xs text-fg-muted">{move || draft.get().map(|state| state.uid).unwrap_or_default()}</p>
                    <Show when=move || messages.get().error.is_some()>
                        <ErrorMessage message={messages.get().error.unwrap_or_default()} />
                    </Show>
                    <form class="space-y-3" on:submit=on_submit>
                        <div>
                            <label class="block text-sm font-medium text-fg">{"First Name"}</label>
                            <input
                                class="mt-1 w-full border rounded px-2 py-1"
                                prop:value=field(|state| state.first_name.clone())
                                on:input=edit(|state, value| state.first_name = value)
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg">{"Last Name"}</label>
                            <input
                                class="mt-1 w-full border rounded px-2 py-1"
                                prop:value=field(|state| state.last_name.clone())
                                on:input=edit(|state, value| state.last_name = value)
                            />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-fg">{"Photo URL (optional)"}</label>
                            <input
                                class="mt-1 w-full border rounded px-2 py-1"
                                prop:value=field(|state| state.photo_url.clone())
                                on:input=edit(|state, value| state.photo_url = value)
                            />
                        </div>
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="px-4 py-2 text-sm rounded bg-surface-muted text-fg"
                                on:click=close
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="submit"
                                disabled=move || pending.get()
                                class="px-4 py-2 text-sm rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                            >
                                {move || if pending.get() { "Saving..." } else { "Save" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    fn render(draft: Option<UpdateAdminDraft>, error: Option<&'static str>) -> String {
        render_to_string(move || {
            let update_action =
                create_action(|_: &UpdateAdminDraft| async { Ok::<(), ApiError>(()) });
            let messages = create_rw_signal(MessageState {
                error: error.map(str::to_string),
                success: None,
            });
            view! {
                <UpdateAdminDialog
                    draft=create_rw_signal(draft)
                    messages=messages
                    update_action=update_action
                />
            }
        })
    }

    #[test]
    fn hidden_without_draft() {
        assert!(!render(None, None).contains("Update Admin"));
    }

    #[test]
    fn renders_prefilled_draft_and_error() {
        let draft = UpdateAdminDraft {
            uid: "u1".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            photo_url: String::new(),
        };
        let html = render(Some(draft), Some("First name and last name are required"));
        assert!(html.contains("Update Admin"));
        assert!(html.contains("u1"));
        assert!(html.contains("First name and last name are required"));
        assert!(html.contains("role=\"dialog\""));
    }
}
