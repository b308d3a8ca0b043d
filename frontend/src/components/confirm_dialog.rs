use leptos::ev::KeyboardEvent;
use leptos::*;

const PRIMARY_BUTTON: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50";
const DANGER_BUTTON: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50";

/// Modal yes/no prompt. While `busy` is set the confirm button is disabled
/// and confirmation is ignored, so a second request cannot be queued from
/// the dialog.
#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] busy: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let title = store_value(title);
    let confirm_label = store_value(confirm_label);
    let confirm_class = if destructive { DANGER_BUTTON } else { PRIMARY_BUTTON };
    let confirm = move || {
        if !busy.get_untracked() {
            on_confirm.call(());
        }
    };

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        match ev.key().as_str() {
                            "Escape" => {
                                ev.prevent_default();
                                on_cancel.call(());
                            }
                            "Enter" => {
                                ev.prevent_default();
                                confirm();
                            }
                            _ => {}
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{title.get_value()}</h2>
                    <p class="text-sm text-fg-muted">{move || message.get()}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_cancel.call(())
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="button"
                            class=confirm_class
                            disabled=move || busy.get()
                            aria-busy=move || busy.get().to_string()
                            on:click=move |_| confirm()
                        >
                            {move || if busy.get() { "Working...".to_string() } else { confirm_label.get_value() }}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
