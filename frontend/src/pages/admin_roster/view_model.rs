use super::{
    repository::AdminRosterRepository,
    utils::{validate_removal, AddAdminFormState, MessageState, RosterTab, UpdateAdminDraft},
};
use crate::{
    api::{AdminRecord, ApiClient, ApiError, BUSY, UNAUTHENTICATED},
    state::{
        auth::use_session,
        session::{SessionProvider, SessionUser, NOT_AUTHENTICATED},
    },
};
use leptos::*;
use std::rc::Rc;

pub const OPERATION_IN_PROGRESS: &str = "Another request is already in progress";

/// Reactive state the roster operations write to.
#[derive(Clone, Copy)]
pub struct RosterSignals {
    pub admins: RwSignal<Vec<AdminRecord>>,
    pub loading: RwSignal<bool>,
    pub messages: RwSignal<MessageState>,
    /// Bumped on every session transition; fetches started under an older
    /// value drop their result.
    pub session_epoch: RwSignal<u64>,
    /// Set when a sign-in arrives while another operation holds the guard;
    /// that operation re-fetches before releasing it.
    pub refetch_pending: RwSignal<bool>,
}

impl RosterSignals {
    pub fn new() -> Self {
        Self {
            admins: create_rw_signal(Vec::new()),
            loading: create_rw_signal(false),
            messages: create_rw_signal(MessageState::default()),
            session_epoch: create_rw_signal(0),
            refetch_pending: create_rw_signal(false),
        }
    }
}

impl Default for RosterSignals {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(context: &str, err: &ApiError) -> String {
    let passthrough = context.is_empty()
        || err.is_validation()
        || err.code == UNAUTHENTICATED
        || err.code == BUSY;
    if passthrough {
        err.error.clone()
    } else {
        format!("{}: {}", context, err.error)
    }
}

/// Session gate plus the fetch and mutation flows of the roster screen.
///
/// Only one operation runs at a time: `loading` doubles as the in-flight
/// guard and stays set across a mutation and the re-fetch that follows it.
/// The roster is only ever replaced by a successful fetch.
#[derive(Clone)]
pub struct RosterController {
    repository: AdminRosterRepository,
    session: Rc<dyn SessionProvider>,
    signals: RosterSignals,
}

impl RosterController {
    pub fn new(
        repository: AdminRosterRepository,
        session: Rc<dyn SessionProvider>,
        signals: RosterSignals,
    ) -> Self {
        Self {
            repository,
            session,
            signals,
        }
    }

    pub fn signals(&self) -> RosterSignals {
        self.signals
    }

    fn fail(&self, err: ApiError, context: &str) -> ApiError {
        let message = describe(context, &err);
        self.signals.messages.update(|state| state.set_error(message));
        err
    }

    fn begin(&self) -> Result<(), ApiError> {
        if self.signals.loading.get_untracked() {
            log::debug!("rejecting roster operation while another is in flight");
            return Err(self.fail(ApiError::busy(OPERATION_IN_PROGRESS), ""));
        }
        self.signals.loading.set(true);
        self.signals.messages.update(MessageState::clear);
        Ok(())
    }

    /// Releases the guard, first running any roster fetch a session change
    /// deferred while the guard was held.
    async fn finish(&self) {
        while self.signals.refetch_pending.get_untracked() {
            self.signals.refetch_pending.set(false);
            if self.session.current_user().is_none() {
                break;
            }
            log::info!("running roster fetch deferred by a session change");
            // Failures are already recorded in the message state.
            let _ = self.load_roster().await;
        }
        self.signals.loading.set(false);
    }

    /// Applies a sign-in/sign-out transition. Returns `true` when the caller
    /// should fetch the roster now. A sign-in that lands while an operation
    /// is in flight is queued instead and fetched when that operation ends.
    pub fn handle_session_change(&self, user: Option<&SessionUser>) -> bool {
        self.signals
            .session_epoch
            .update(|epoch| *epoch = epoch.wrapping_add(1));
        match user {
            Some(user) if self.signals.loading.get_untracked() => {
                log::info!("roster session started for {}; fetch deferred", user.uid);
                self.signals.refetch_pending.set(true);
                false
            }
            Some(user) => {
                log::info!("roster session started for {}", user.uid);
                true
            }
            None => {
                log::info!("roster session ended; clearing roster");
                self.signals.refetch_pending.set(false);
                self.signals.admins.set(Vec::new());
                false
            }
        }
    }

    async fn load_roster(&self) -> Result<(), ApiError> {
        let epoch = self.signals.session_epoch.get_untracked();
        match self.repository.fetch_admins().await {
            Ok(admins) => {
                if self.signals.session_epoch.get_untracked() != epoch {
                    log::info!("discarding roster fetched under a previous session");
                    return Ok(());
                }
                log::debug!("roster refreshed with {} admins", admins.len());
                self.signals.admins.set(admins);
                Ok(())
            }
            Err(err) => Err(self.fail(err, "Error fetching admins")),
        }
    }

    pub async fn fetch_roster(&self) -> Result<(), ApiError> {
        if self.session.current_user().is_none() {
            return Err(self.fail(ApiError::unauthenticated(NOT_AUTHENTICATED), ""));
        }
        self.begin()?;
        let result = self.load_roster().await;
        self.finish().await;
        result
    }

    /// Submits the add form. The fields are cleared only when the backend
    /// accepted the new admin.
    pub async fn add_admin(&self, form: RwSignal<AddAdminFormState>) -> Result<(), ApiError> {
        let request = form
            .with_untracked(AddAdminFormState::validate)
            .map_err(|err| self.fail(err, ""))?;
        self.begin()?;
        let result = match self.repository.add_admin(request).await {
            Ok(()) => {
                form.update(AddAdminFormState::reset);
                self.signals
                    .messages
                    .update(|state| state.set_success("Admin added"));
                self.load_roster().await
            }
            Err(err) => Err(self.fail(err, "Error adding admin")),
        };
        self.finish().await;
        result
    }

    pub async fn remove_admin(&self, email: String) -> Result<(), ApiError> {
        let request = validate_removal(&email).map_err(|err| self.fail(err, ""))?;
        self.begin()?;
        let result = match self.repository.remove_admin(request).await {
            Ok(()) => {
                self.signals
                    .messages
                    .update(|state| state.set_success("Admin removed"));
                self.load_roster().await
            }
            Err(err) => Err(self.fail(err, "Error removing admin")),
        };
        self.finish().await;
        result
    }

    pub async fn update_admin(&self, draft: UpdateAdminDraft) -> Result<(), ApiError> {
        let request = draft.validate().map_err(|err| self.fail(err, ""))?;
        self.begin()?;
        let result = match self.repository.update_admin(request).await {
            Ok(()) => {
                self.signals
                    .messages
                    .update(|state| state.set_success("Admin updated"));
                self.load_roster().await
            }
            Err(err) => Err(self.fail(err, "Error updating admin details")),
        };
        self.finish().await;
        result
    }
}

#[derive(Clone, Copy)]
pub struct AdminRosterViewModel {
    pub signals: RosterSignals,
    pub active_tab: RwSignal<RosterTab>,
    pub add_modal_open: RwSignal<bool>,
    pub add_form: RwSignal<AddAdminFormState>,
    pub edit_draft: RwSignal<Option<UpdateAdminDraft>>,
    pub pending_removal: RwSignal<Option<AdminRecord>>,
    pub refresh_action: Action<(), Result<(), ApiError>>,
    pub add_action: Action<(), Result<(), ApiError>>,
    pub remove_action: Action<String, Result<(), ApiError>>,
    pub update_action: Action<UpdateAdminDraft, Result<(), ApiError>>,
}

pub fn use_admin_roster_view_model() -> AdminRosterViewModel {
    let session = use_session();
    let repository =
        AdminRosterRepository::new_with_client(Rc::new(ApiClient::new(session.clone())));
    let controller = RosterController::new(repository, session.clone(), RosterSignals::new());

    let active_tab = create_rw_signal(RosterTab::default());
    let add_modal_open = create_rw_signal(false);
    let add_form = create_rw_signal(AddAdminFormState::default());
    let edit_draft = create_rw_signal(None::<UpdateAdminDraft>);
    let pending_removal = create_rw_signal(None::<AdminRecord>);

    let ctrl_for_refresh = controller.clone();
    let refresh_action = create_action(move |_: &()| {
        let ctrl = ctrl_for_refresh.clone();
        async move { ctrl.fetch_roster().await }
    });

    let ctrl_for_add = controller.clone();
    let add_action = create_action(move |_: &()| {
        let ctrl = ctrl_for_add.clone();
        async move { ctrl.add_admin(add_form).await }
    });

    let ctrl_for_remove = controller.clone();
    let remove_action = create_action(move |email: &String| {
        let ctrl = ctrl_for_remove.clone();
        let email = email.clone();
        async move { ctrl.remove_admin(email).await }
    });

    let ctrl_for_update = controller.clone();
    let update_action = create_action(move |draft: &UpdateAdminDraft| {
        let ctrl = ctrl_for_update.clone();
        let draft = draft.clone();
        async move { ctrl.update_admin(draft).await }
    });

    // Effects
    create_effect(move |_| {
        if let Some(Ok(())) = add_action.value().get() {
            add_modal_open.set(false);
        }
    });
    create_effect(move |_| {
        if let Some(Ok(())) = update_action.value().get() {
            edit_draft.set(None);
        }
    });

    let ctrl_for_session = controller.clone();
    let subscription = session.subscribe(Rc::new(move |user: Option<SessionUser>| {
        if ctrl_for_session.handle_session_change(user.as_ref()) {
            refresh_action.dispatch(());
        }
    }));
    on_cleanup(move || subscription.unsubscribe());

    AdminRosterViewModel {
        signals: controller.signals(),
        active_tab,
        add_modal_open,
        add_form,
        edit_draft,
        pending_removal,
        refresh_action,
        add_action,
        remove_action,
        update_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{REQUEST_FAILED, VALIDATION_ERROR},
        pages::admin_roster::utils::{MISSING_ADD_FIELDS, MISSING_REMOVE_EMAIL, MISSING_UPDATE_NAMES},
        state::session::MemorySession,
        test_support::helpers::{
            admin_json, admin_record, client_for, root_user, signed_in_session, TOKEN,
        },
    };
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn controller(server: &MockServer, session: &MemorySession) -> RosterController {
        let repository =
            AdminRosterRepository::new_with_client(Rc::new(client_for(server.base_url(), session)));
        RosterController::new(repository, Rc::new(session.clone()), RosterSignals::new())
    }

    fn error_of(ctrl: &RosterController) -> Option<String> {
        ctrl.signals().messages.get_untracked().error
    }

    fn filled_form() -> AddAdminFormState {
        AddAdminFormState {
            email: "a@b.com".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            photo_url: String::new(),
        }
    }

    #[tokio::test]
    async fn fetch_without_session_sets_error_and_skips_backend() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([]));
            })
            .await;
        let session = MemorySession::signed_out();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![admin_record("u1", "a@b.com")]);

        let err = ctrl.fetch_roster().await.unwrap_err();

        assert_eq!(err.code, UNAUTHENTICATED);
        assert_eq!(error_of(&ctrl).as_deref(), Some(NOT_AUTHENTICATED));
        assert_eq!(ctrl.signals().admins.get_untracked().len(), 1);
        assert!(!ctrl.signals().loading.get_untracked());
        assert_eq!(list.hits_async().await, 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn fetch_replaces_roster_and_clears_previous_error() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200)
                    .json_body(json!([admin_json("u2", "c@d.com"), admin_json("u3", "e@f.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![admin_record("stale", "old@b.com")]);
        ctrl.signals()
            .messages
            .update(|state| state.set_error("previous failure"));

        ctrl.fetch_roster().await.unwrap();

        let uids: Vec<String> = ctrl
            .signals()
            .admins
            .get_untracked()
            .into_iter()
            .map(|admin| admin.uid)
            .collect();
        assert_eq!(uids, vec!["u2", "u3"]);
        assert!(error_of(&ctrl).is_none());
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn fetch_failure_keeps_prior_roster() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(500).json_body(json!({"error": "database offline"}));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![admin_record("u1", "a@b.com")]);

        let err = ctrl.fetch_roster().await.unwrap_err();

        assert_eq!(err.code, REQUEST_FAILED);
        assert_eq!(
            error_of(&ctrl).as_deref(),
            Some("Error fetching admins: database offline")
        );
        assert_eq!(ctrl.signals().admins.get_untracked()[0].uid, "u1");
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn fetch_with_empty_roster_yields_empty_list() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![admin_record("u1", "a@b.com")]);

        ctrl.fetch_roster().await.unwrap();

        assert!(ctrl.signals().admins.get_untracked().is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn add_success_clears_form_and_refetches_once() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method(POST).path("/add-admin").json_body(json!({
                    "email": "a@b.com",
                    "firstName": "A",
                    "lastName": "B",
                    "photoURL": ""
                }));
                then.status(200).json_body(json!({"uid": "u9"}));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([admin_json("u9", "a@b.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        let form = create_rw_signal(filled_form());

        ctrl.add_admin(form).await.unwrap();

        add.assert_async().await;
        assert_eq!(list.hits_async().await, 1);
        assert_eq!(form.get_untracked(), AddAdminFormState::default());
        assert_eq!(ctrl.signals().admins.get_untracked()[0].uid, "u9");
        assert_eq!(
            ctrl.signals().messages.get_untracked().success.as_deref(),
            Some("Admin added")
        );
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn add_with_missing_field_never_calls_backend() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let add = server
            .mock_async(|when, then| {
                when.method(POST).path("/add-admin");
                then.status(200);
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        let form = create_rw_signal(AddAdminFormState {
            first_name: String::new(),
            ..filled_form()
        });

        let err = ctrl.add_admin(form).await.unwrap_err();

        assert_eq!(err.code, VALIDATION_ERROR);
        assert_eq!(error_of(&ctrl).as_deref(), Some(MISSING_ADD_FIELDS));
        assert_eq!(add.hits_async().await, 0);
        assert_eq!(session.token_requests(), 0);
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn add_failure_keeps_typed_values_and_skips_refetch() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/add-admin");
                then.status(409).json_body(json!({"error": "email already exists"}));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        let form = create_rw_signal(filled_form());

        ctrl.add_admin(form).await.unwrap_err();

        assert_eq!(form.get_untracked(), filled_form());
        assert_eq!(
            error_of(&ctrl).as_deref(),
            Some("Error adding admin: email already exists")
        );
        assert_eq!(list.hits_async().await, 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn remove_unknown_email_surfaces_backend_payload() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let remove = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/remove-admin")
                    .json_body(json!({"email": "ghost@b.com"}));
                then.status(404).json_body(json!({"error": "User not found"}));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![admin_record("u1", "a@b.com")]);

        ctrl.remove_admin("ghost@b.com".into()).await.unwrap_err();

        remove.assert_async().await;
        assert_eq!(list.hits_async().await, 0);
        assert_eq!(
            error_of(&ctrl).as_deref(),
            Some("Error removing admin: User not found")
        );
        assert_eq!(ctrl.signals().admins.get_untracked().len(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn remove_success_reflects_refetch_only() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/remove-admin");
                then.status(200).body("removed");
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([admin_json("u2", "c@d.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);
        ctrl.signals().admins.set(vec![
            admin_record("u1", "a@b.com"),
            admin_record("u2", "c@d.com"),
        ]);

        ctrl.remove_admin("a@b.com".into()).await.unwrap();

        assert_eq!(list.hits_async().await, 1);
        assert_eq!(
            ctrl.signals().admins.get_untracked(),
            vec![crate::api::AdminRecord {
                photo_url: Some(String::new()),
                ..admin_record("u2", "c@d.com")
            }]
        );
        runtime.dispose();
    }

    #[tokio::test]
    async fn remove_and_update_validate_before_calling() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let any_post = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let err = ctrl.remove_admin("   ".into()).await.unwrap_err();
        assert_eq!(err.error, MISSING_REMOVE_EMAIL);

        let draft = UpdateAdminDraft {
            uid: "u1".into(),
            first_name: "A".into(),
            last_name: String::new(),
            photo_url: String::new(),
        };
        let err = ctrl.update_admin(draft).await.unwrap_err();
        assert_eq!(err.error, MISSING_UPDATE_NAMES);
        assert_eq!(error_of(&ctrl).as_deref(), Some(MISSING_UPDATE_NAMES));

        assert_eq!(any_post.hits_async().await, 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn update_success_refetches_and_failure_reports() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(POST).path("/update-admin").json_body(json!({
                    "uid": "u1",
                    "firstName": "Grace",
                    "lastName": "Hopper",
                    "photoURL": ""
                }));
                then.status(200);
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([{
                    "uid": "u1",
                    "email": "a@b.com",
                    "firstName": "Grace",
                    "lastName": "Hopper"
                }]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let draft = UpdateAdminDraft {
            uid: "u1".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            photo_url: String::new(),
        };
        ctrl.update_admin(draft.clone()).await.unwrap();
        update.assert_async().await;
        assert_eq!(list.hits_async().await, 1);
        assert_eq!(
            ctrl.signals().admins.get_untracked()[0].display_name(),
            "Grace Hopper"
        );

        session.sign_out();
        ctrl.update_admin(draft).await.unwrap_err();
        assert_eq!(error_of(&ctrl).as_deref(), Some(NOT_AUTHENTICATED));
        assert_eq!(update.hits_async().await, 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn in_flight_guard_rejects_second_operation() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200)
                    .delay(Duration::from_millis(200))
                    .json_body(json!([admin_json("u1", "a@b.com")]));
            })
            .await;
        let remove = server
            .mock_async(|when, then| {
                when.method(POST).path("/remove-admin");
                then.status(200);
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let second = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(ctrl.signals().loading.get_untracked());
            ctrl.remove_admin("a@b.com".into()).await
        };
        let (first, second) = tokio::join!(ctrl.fetch_roster(), second);

        first.unwrap();
        let err = second.unwrap_err();
        assert_eq!(err.code, BUSY);
        assert_eq!(remove.hits_async().await, 0);
        assert_eq!(list.hits_async().await, 1);
        assert!(!ctrl.signals().loading.get_untracked());
        assert_eq!(ctrl.signals().admins.get_untracked().len(), 1);
        runtime.dispose();
    }

    #[tokio::test]
    async fn sign_out_during_fetch_discards_result() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200)
                    .delay(Duration::from_millis(200))
                    .json_body(json!([admin_json("u1", "a@b.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let sign_out = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(!ctrl.handle_session_change(None));
        };
        let (fetched, ()) = tokio::join!(ctrl.fetch_roster(), sign_out);

        fetched.unwrap();
        assert!(ctrl.signals().admins.get_untracked().is_empty());
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn sign_in_during_fetch_loads_roster_for_new_session() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200)
                    .delay(Duration::from_millis(200))
                    .json_body(json!([admin_json("u1", "a@b.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let switch_user = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.sign_out();
            assert!(!ctrl.handle_session_change(None));
            session.sign_in(root_user(), TOKEN);
            assert!(!ctrl.handle_session_change(Some(&root_user())));
            assert!(ctrl.signals().refetch_pending.get_untracked());
        };
        let (fetched, ()) = tokio::join!(ctrl.fetch_roster(), switch_user);

        fetched.unwrap();
        assert_eq!(list.hits_async().await, 2);
        assert_eq!(ctrl.signals().admins.get_untracked().len(), 1);
        assert!(error_of(&ctrl).is_none());
        assert!(!ctrl.signals().refetch_pending.get_untracked());
        assert!(!ctrl.signals().loading.get_untracked());
        runtime.dispose();
    }

    async fn loading_after_50ms(ctrl: &RosterController) -> bool {
        tokio::time::sleep(Duration::from_millis(50)).await;
        ctrl.signals().loading.get_untracked()
    }

    #[tokio::test]
    async fn loading_spans_each_mutation_round_trip() {
        let runtime = create_runtime();
        let server = MockServer::start_async().await;
        for path in ["/add-admin", "/remove-admin", "/update-admin"] {
            server
                .mock_async(|when, then| {
                    when.method(POST).path(path);
                    then.status(200).delay(Duration::from_millis(200));
                })
                .await;
        }
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/admin-users");
                then.status(200).json_body(json!([admin_json("u1", "a@b.com")]));
            })
            .await;
        let session = signed_in_session();
        let ctrl = controller(&server, &session);

        let form = create_rw_signal(filled_form());
        let (added, busy) = tokio::join!(ctrl.add_admin(form), loading_after_50ms(&ctrl));
        added.unwrap();
        assert!(busy);
        assert!(!ctrl.signals().loading.get_untracked());

        let (removed, busy) = tokio::join!(
            ctrl.remove_admin("a@b.com".into()),
            loading_after_50ms(&ctrl)
        );
        removed.unwrap();
        assert!(busy);
        assert!(!ctrl.signals().loading.get_untracked());

        let draft = UpdateAdminDraft::from_record(&admin_record("u1", "a@b.com"));
        let (updated, busy) = tokio::join!(ctrl.update_admin(draft), loading_after_50ms(&ctrl));
        updated.unwrap();
        assert!(busy);
        assert!(!ctrl.signals().loading.get_untracked());

        assert_eq!(list.hits_async().await, 3);
        runtime.dispose();
    }

    #[test]
    fn session_transitions_bump_epoch_and_clear_roster() {
        let runtime = create_runtime();
        let session = signed_in_session();
        let repository = AdminRosterRepository::new_with_client(Rc::new(client_for(
            "http://unused.invalid",
            &session,
        )));
        let ctrl = RosterController::new(repository, Rc::new(session), RosterSignals::new());
        ctrl.signals().admins.set(vec![admin_record("u1", "a@b.com")]);

        assert!(ctrl.handle_session_change(Some(&SessionUser::new("root"))));
        assert_eq!(ctrl.signals().admins.get_untracked().len(), 1);
        assert!(!ctrl.handle_session_change(None));
        assert!(ctrl.signals().admins.get_untracked().is_empty());
        assert_eq!(ctrl.signals().session_epoch.get_untracked(), 2);
        runtime.dispose();
    }

    #[test]
    fn view_model_starts_idle_when_signed_out() {
        let runtime = create_runtime();
        let session = MemorySession::signed_out();
        crate::test_support::helpers::provide_session(&session);

        let vm = use_admin_roster_view_model();

        assert_eq!(session.listener_count(), 1);
        assert!(vm.signals.admins.get_untracked().is_empty());
        assert!(!vm.signals.loading.get_untracked());
        assert_eq!(vm.active_tab.get_untracked(), RosterTab::Admins);
        assert!(!vm.add_modal_open.get_untracked());
        assert!(vm.edit_draft.get_untracked().is_none());
        runtime.dispose();
    }
}
