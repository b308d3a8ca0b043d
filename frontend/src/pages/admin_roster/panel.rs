use crate::{
    api::AdminRecord,
    components::{
        confirm_dialog::ConfirmDialog,
        layout::{ErrorMessage, Layout, SuccessMessage},
    },
};
use leptos::*;
use leptos_meta::Title;

use super::{
    components::{
        add_form::AddAdminModal, edit_dialog::UpdateAdminDialog, list::AdminList, tabs::RosterTabs,
    },
    layout::AdminRosterFrame,
    utils::UpdateAdminDraft,
    view_model::use_admin_roster_view_model,
};

#[component]
pub fn AdminRosterPage() -> impl IntoView {
    let vm = use_admin_roster_view_model();
    let messages = vm.signals.messages;
    let loading: Signal<bool> = vm.signals.loading.into();
    let admins: Signal<Vec<AdminRecord>> = vm.signals.admins.into();

    let open_add = Callback::new(move |_: ()| vm.add_modal_open.set(true));
    let refresh = Callback::new(move |_: ()| vm.refresh_action.dispatch(()));
    let edit_admin = Callback::new(move |admin: AdminRecord| {
        messages.update(|state| state.clear());
        vm.edit_draft.set(Some(UpdateAdminDraft::from_record(&admin)));
    });
    let request_removal = Callback::new(move |admin: AdminRecord| {
        vm.pending_removal.set(Some(admin));
    });
    let confirm_removal = Callback::new(move |_: ()| {
        if let Some(admin) = vm.pending_removal.get_untracked() {
            vm.pending_removal.set(None);
            vm.remove_action.dispatch(admin.email);
        }
    });
    let cancel_removal = Callback::new(move |_: ()| vm.pending_removal.set(None));
    let removal_message = Signal::derive(move || {
        vm.pending_removal
            .get()
            .map(|admin| format!("Remove admin privileges from {}?", admin.email))
            .unwrap_or_default()
    });

    view! {
        <Title text="Admin Page" />
        <Layout>
            <AdminRosterFrame
                active_tab=vm.active_tab.into()
                add_open=vm.add_modal_open.into()
                loading=loading
                on_open_add=open_add
                on_refresh=refresh
            >
                <Show when=move || messages.get().error.is_some()>
                    <ErrorMessage message={messages.get().error.unwrap_or_default()} />
                </Show>
                <Show when=move || messages.get().success.is_some()>
                    <SuccessMessage message={messages.get().success.unwrap_or_default()} />
                </Show>
                <AddAdminModal
                    open=vm.add_modal_open
                    form_state=vm.add_form
                    add_action=vm.add_action
                />
                <div>
                    <RosterTabs active=vm.active_tab />
                    <AdminList
                        admins=admins
                        loading=loading
                        on_edit=edit_admin
                        on_remove=request_removal
                    />
                </div>
            </AdminRosterFrame>
            <UpdateAdminDialog
                draft=vm.edit_draft
                messages=messages
                update_action=vm.update_action
            />
            <ConfirmDialog
                is_open=Signal::derive(move || vm.pending_removal.get().is_some())
                title="Remove admin"
                message=removal_message
                confirm_label="Remove"
                busy=loading
                on_confirm=confirm_removal
                on_cancel=cancel_removal
                destructive=true
            />
        </Layout>
    }
}
